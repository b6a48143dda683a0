//! XLSX export for product records.

use crate::amazon::models::Product;
use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;
use tracing::info;

/// Header row fill color.
pub const HEADER_FILL: Color = Color::RGB(0x66B2FF);

/// Column headers, in sheet order.
pub const HEADERS: [&str; 3] = ["Title", "Price (INR)", "Link"];

/// Writes the records to a single-sheet workbook at `path`.
///
/// The header row is filled with [`HEADER_FILL`] and each Link cell is a
/// hyperlink labeled "Link" pointing at the stored URL. An existing file at
/// the path is overwritten; any I/O failure is returned, not swallowed.
pub fn write_products(products: &[Product], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    let header_format = Format::new().set_background_color(HEADER_FILL).set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, product) in products.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &product.title)?;
        worksheet.write_number(row, 1, product.price_inr)?;
        worksheet.write_url_with_text(row, 2, product.link.as_str(), "Link")?;
    }

    worksheet.set_column_width(0, 60)?;
    worksheet.set_column_width(1, 14)?;

    workbook
        .save(path)
        .with_context(|| format!("Failed to write spreadsheet: {}", path.display()))?;

    info!("Saved {} products to {}", products.len(), path.display());
    Ok(())
}
