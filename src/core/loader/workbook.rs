//! Read the first worksheet of a workbook (or a CSV export) into normalized rows

use super::sheet_parser::Cell;
use calamine::{open_workbook_auto, Data, Reader};
use std::error::Error;
use std::fs;
use std::path::Path;

/// Spreadsheet formats understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Excel or OpenDocument workbook, read through `calamine`
    Workbook,
    /// Comma separated export of the first sheet
    Csv,
}

impl SheetFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    /// Returns an error for missing or unsupported extensions
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Self::Workbook),
            "csv" => Ok(Self::Csv),
            "" => Err(format!("Cannot detect sheet format of {}", path.display())),
            other => Err(format!("Unsupported sheet format: .{other}")),
        }
    }
}

/// Read all rows of the first worksheet, starting at sheet row 1 and column A
///
/// # Errors
/// Returns an error if the file cannot be opened or has no worksheet
pub fn read_rows(path: &Path) -> Result<Vec<Vec<Cell>>, Box<dyn Error>> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Workbook => read_workbook_rows(path),
        SheetFormat::Csv => {
            let content = fs::read_to_string(path)?;
            Ok(content.lines().map(parse_csv_line).collect())
        }
    }
}

fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<Cell>>, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or("Workbook has no worksheets")??;

    // Ranges start at the first used cell; pad back to A1 so column offsets hold.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = (0..start_row).map(|_| Vec::new()).collect();
    for cells in range.rows() {
        let mut row: Vec<Cell> = vec![None; start_col as usize];
        row.extend(cells.iter().map(cell_text));
        rows.push(row);
    }
    Ok(rows)
}

/// Normalize one workbook cell to trimmed text
fn cell_text(cell: &Data) -> Cell {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(value) => value.trim().to_string(),
        Data::Float(value) => format_number(*value),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Print whole floats without a fractional part so `3.0` and `3` name the same node
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        #[allow(clippy::cast_possible_truncation)]
        let whole = value as i64;
        whole.to_string()
    } else {
        value.to_string()
    }
}

/// Split one CSV line into trimmed cells, honoring double-quoted fields
pub fn parse_csv_line(line: &str) -> Vec<Cell> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches('\r').chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(finish_cell(&mut current)),
            _ => current.push(ch),
        }
    }
    cells.push(finish_cell(&mut current));
    cells
}

fn finish_cell(current: &mut String) -> Cell {
    let text = current.trim().to_string();
    current.clear();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_line() {
        let cells = parse_csv_line("1,red, 7 ,\"Label, with comma\",,link");
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0].as_deref(), Some("1"));
        assert_eq!(cells[2].as_deref(), Some("7"));
        assert_eq!(cells[3].as_deref(), Some("Label, with comma"));
        assert_eq!(cells[4], None);
        assert_eq!(cells[5].as_deref(), Some("link"));
    }

    #[test]
    fn test_parse_csv_escaped_quotes() {
        let cells = parse_csv_line("\"say \"\"hi\"\"\",x\r");
        assert_eq!(cells[0].as_deref(), Some("say \"hi\""));
        assert_eq!(cells[1].as_deref(), Some("x"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&Data::Empty), None);
        assert_eq!(cell_text(&Data::String("  red ".to_string())).as_deref(), Some("red"));
        assert_eq!(cell_text(&Data::Float(4.0)).as_deref(), Some("4"));
        assert_eq!(cell_text(&Data::Int(9)).as_deref(), Some("9"));
        assert_eq!(cell_text(&Data::String("   ".to_string())), None);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            SheetFormat::from_path(Path::new("data.XLSX")),
            Ok(SheetFormat::Workbook)
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("data.csv")),
            Ok(SheetFormat::Csv)
        );
        assert!(SheetFormat::from_path(Path::new("data.json")).is_err());
        assert!(SheetFormat::from_path(Path::new("data")).is_err());
    }
}
