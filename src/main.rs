use amz_desk::{gui, Config};
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "amz-desk")]
#[command(about = "Search Amazon products by price range and export them to a spreadsheet")]
#[command(version)]
struct Cli {
    /// Path to config file (default: ./config.toml or XDG config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output spreadsheet path
    #[arg(short, long)]
    output: Option<String>,

    /// USD to INR exchange rate used for price bounds
    #[arg(long)]
    rate: Option<f64>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, env = "AMZ_DESK_PROXY")]
    proxy: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load configuration: file, then env, then CLI flags
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if let Some(rate) = cli.rate {
        if rate > 0.0 {
            config.usd_to_inr = rate;
        }
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    gui::run(config)
}
