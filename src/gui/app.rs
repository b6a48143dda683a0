//! The application controller owning all UI state.
//!
//! One search runs start to finish on the UI thread: the frame that shows
//! "Searching..." is painted first, then the next frame performs the blocking
//! fetch+extract+export before the interface becomes responsive again.

use crate::amazon::{Product, ScrapeError};
use crate::commands::SearchCommand;
use crate::config::Config;
use crate::export;
use anyhow::{Context, Result};
use eframe::egui::{self, Align2, Color32, RichText};
use egui_extras::{Column, TableBuilder};
use std::path::Path;
use tokio::runtime::Runtime;
use tracing::error;

/// Launches the desktop app.
pub fn run(config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([880.0, 560.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    let app = SearchApp::new(config)?;

    eframe::run_native(
        "Amazon Scraper",
        options,
        Box::new(|cc| {
            // Amazon-toned dark theme
            let mut visuals = egui::Visuals::dark();
            visuals.panel_fill = Color32::from_rgb(0x23, 0x2F, 0x3E);
            cc.egui_ctx.set_visuals(visuals);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}

/// Status line state, colored by outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Idle,
    Busy(String),
    Success(String),
    Error(String),
}

impl Status {
    /// The message text, empty when idle.
    pub fn text(&self) -> &str {
        match self {
            Status::Idle => "",
            Status::Busy(s) | Status::Success(s) | Status::Error(s) => s,
        }
    }

    fn color(&self) -> Color32 {
        match self {
            Status::Idle => Color32::GRAY,
            Status::Busy(_) => Color32::LIGHT_BLUE,
            Status::Success(_) => Color32::LIGHT_GREEN,
            Status::Error(_) => Color32::LIGHT_RED,
        }
    }
}

/// The form, its state, and the handlers wiring search/export/display.
pub struct SearchApp {
    config: Config,
    runtime: Runtime,

    // form inputs
    query: String,
    price_from: String,
    price_to: String,

    // current search results (one search's worth, discarded on the next)
    products: Vec<Product>,

    status: Status,
    // set by the Search handler; the blocking search runs on the next frame
    // so the busy message is visible first
    pending_search: bool,
    show_open_prompt: bool,
}

impl SearchApp {
    /// Creates the controller with an owned runtime for the blocking fetches.
    pub fn new(config: Config) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to start async runtime")?;

        Ok(Self {
            config,
            runtime,
            query: String::new(),
            price_from: String::new(),
            price_to: String::new(),
            products: Vec::new(),
            status: Status::Idle,
            pending_search: false,
            show_open_prompt: false,
        })
    }

    /// Search action: validate bounds, then schedule the blocking search.
    ///
    /// Validation failures never touch the network.
    fn on_search(&mut self, ctx: &egui::Context) {
        match parse_price_bounds(&self.price_from, &self.price_to) {
            Ok(_) => {
                self.status = Status::Busy("Searching...".to_string());
                self.pending_search = true;
                ctx.request_repaint();
            }
            Err(msg) => {
                self.status = Status::Error(msg);
            }
        }
    }

    /// Clear action: empty inputs, table, and status.
    fn on_clear(&mut self) {
        self.query.clear();
        self.price_from.clear();
        self.price_to.clear();
        self.products.clear();
        self.status = Status::Idle;
        self.show_open_prompt = false;
    }

    /// Runs the scheduled search: fetch + extract, then spreadsheet + table.
    fn run_pending_search(&mut self) {
        let (from, to) = match parse_price_bounds(&self.price_from, &self.price_to) {
            Ok(bounds) => bounds,
            Err(msg) => {
                self.status = Status::Error(msg);
                return;
            }
        };

        let cmd = SearchCommand::new(self.config.clone());
        let query = self.query.clone();

        match self.runtime.block_on(cmd.execute(&query, from, to)) {
            Ok(products) => match export::write_products(&products, &self.config.output_file) {
                Ok(()) => {
                    self.products = products;
                    self.status =
                        Status::Success(format!("Data saved to '{}'", self.config.output_file));
                    self.show_open_prompt = true;
                }
                Err(e) => {
                    error!("Export failed: {:#}", e);
                    self.status = Status::Error(format!("Failed to save spreadsheet: {}", e));
                }
            },
            Err(e) => {
                error!("Search failed: {:#}", e);
                self.status = Status::Error(fetch_error_message(&e));
            }
        }
    }

    fn draw_results_table(&self, ui: &mut egui::Ui) {
        if self.products.is_empty() {
            ui.weak("No results yet.");
            return;
        }

        TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder().at_least(240.0).clip(true))
            .column(Column::exact(110.0))
            .column(Column::exact(70.0))
            .header(24.0, |mut header| {
                for title in ["Title", "Price (INR)", "Link"] {
                    header.col(|ui| {
                        ui.label(RichText::new(title).strong());
                    });
                }
            })
            .body(|body| {
                let products = &self.products;
                body.rows(20.0, products.len(), |mut row| {
                    let product = &products[row.index()];
                    row.col(|ui| {
                        ui.label(&product.title);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.2}", product.price_inr));
                    });
                    row.col(|ui| {
                        ui.hyperlink_to("Link", &product.link);
                    });
                });
            });
    }

    fn draw_open_prompt(&mut self, ctx: &egui::Context) {
        if !self.show_open_prompt {
            return;
        }

        let mut open_clicked = false;
        let mut dismissed = false;

        egui::Window::new("Open spreadsheet")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(format!("Do you want to open '{}'?", self.config.output_file));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        open_clicked = true;
                    }
                    if ui.button("No").clicked() {
                        dismissed = true;
                    }
                });
            });

        if open_clicked {
            self.show_open_prompt = false;
            if let Err(e) = open_in_default_app(Path::new(&self.config.output_file)) {
                error!("Open file failed: {}", e);
                self.status = Status::Error(format!("Failed to open file: {}", e));
            }
        } else if dismissed {
            self.show_open_prompt = false;
        }
    }
}

impl eframe::App for SearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The busy message was painted on the previous frame; block now.
        if self.pending_search {
            self.pending_search = false;
            self.run_pending_search();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Amazon Scraper");
            ui.add_space(8.0);

            egui::Grid::new("search_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
                ui.label("Product to search on Amazon:");
                ui.add(egui::TextEdit::singleline(&mut self.query).desired_width(340.0));
                ui.end_row();

                ui.label("Price range in INR, from:");
                ui.horizontal(|ui| {
                    ui.add(egui::TextEdit::singleline(&mut self.price_from).desired_width(100.0));
                    ui.label("to:");
                    ui.add(egui::TextEdit::singleline(&mut self.price_to).desired_width(100.0));
                });
                ui.end_row();
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button(RichText::new("Search").strong()).clicked() {
                    self.on_search(ui.ctx());
                }
                if ui.button("Clear").clicked() {
                    self.on_clear();
                }
            });

            ui.add_space(8.0);
            if self.status != Status::Idle {
                ui.label(RichText::new(self.status.text()).color(self.status.color()).strong());
            }

            ui.separator();
            self.draw_results_table(ui);
        });

        self.draw_open_prompt(ctx);
    }
}

/// Validates the price range inputs.
///
/// Both bounds must be present and numeric before any network activity.
fn parse_price_bounds(from: &str, to: &str) -> Result<(f64, f64), String> {
    let from = from.trim();
    let to = to.trim();

    if from.is_empty() || to.is_empty() {
        return Err("Please enter both lower and upper bounds of the price range.".to_string());
    }

    match (from.parse::<f64>(), to.parse::<f64>()) {
        (Ok(f), Ok(t)) => Ok((f, t)),
        _ => Err("Invalid price range. Please enter valid numbers.".to_string()),
    }
}

/// Maps a failed search to its status-line message.
fn fetch_error_message(e: &anyhow::Error) -> String {
    match e.downcast_ref::<ScrapeError>() {
        Some(ScrapeError::NoResults) => "No products found for this search.".to_string(),
        Some(ScrapeError::Captcha) => {
            "Amazon is blocking requests (CAPTCHA page). Try again later.".to_string()
        }
        _ => "Failed to fetch data. Check your internet connection.".to_string(),
    }
}

/// Opens a file with the platform's default handler.
fn open_in_default_app(path: &Path) -> Result<(), String> {
    let absolute =
        std::fs::canonicalize(path).map_err(|e| format!("Cannot resolve file path: {}", e))?;

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(&absolute)
            .spawn()
            .map_err(|e| format!("Failed to spawn start: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(&absolute)
            .spawn()
            .map_err(|e| format!("Failed to spawn open: {}", e))?;
        Ok(())
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(&absolute)
            .spawn()
            .map_err(|e| format!("Failed to spawn xdg-open: {}", e))?;
        Ok(())
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let _ = absolute;
        Err("Opening files is not supported on this platform".to_string())
    }
}
