//! Spreadsheet loading: file → rows → nodes and edges

pub mod sheet_parser;
pub mod workbook;

pub use sheet_parser::{parse_rows, Cell};
pub use workbook::{parse_csv_line, read_rows, SheetFormat};

use crate::core::models::SheetData;
use crate::info;
use std::error::Error;
use std::path::Path;

/// Load a relationship sheet from an Excel/OpenDocument workbook or a CSV export
///
/// Only the first worksheet is read.
///
/// # Errors
/// Returns an error if the file is missing, unreadable, or of an unsupported format
pub fn load_sheet<P: AsRef<Path>>(path: P) -> Result<SheetData, Box<dyn Error>> {
    let path = path.as_ref();
    let rows = read_rows(path)?;
    info!("Read {} rows from {}", rows.len(), path.display());
    Ok(parse_rows(rows))
}
