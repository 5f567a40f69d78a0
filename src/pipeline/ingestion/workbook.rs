use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use tracing::{debug, info, warn};

use crate::domain::{CellValue, RawGrid};
use crate::error::{ExtractError, Result};

/// A decoded workbook: ordered sheet names plus a grid per sheet.
pub trait Workbook {
    /// Sheet names in workbook order
    fn sheet_names(&self) -> Vec<String>;

    /// The grid of one sheet. Fails only when the sheet is unknown or could
    /// not be decoded.
    fn grid(&self, sheet: &str) -> Result<&RawGrid>;
}

/// Workbook held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: Vec<(String, RawGrid)>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, grid: RawGrid) -> Self {
        self.add_sheet(name, grid);
        self
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, grid: RawGrid) {
        self.sheets.push((name.into(), grid));
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn grid(&self, sheet: &str) -> Result<&RawGrid> {
        self.sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, grid)| grid)
            .ok_or_else(|| ExtractError::Workbook(format!("no sheet named '{}'", sheet)))
    }
}

/// Spreadsheet file (.xlsx, .xls, .ods) decoded up front with calamine.
///
/// Sheets that fail to decode are kept with their error so the extractor can
/// report and skip them.
#[derive(Debug)]
pub struct CalamineWorkbook {
    sheets: Vec<(String, std::result::Result<RawGrid, String>)>,
}

impl CalamineWorkbook {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|e| {
            ExtractError::Workbook(format!("failed to open '{}': {}", path.display(), e))
        })?;

        let names = workbook.sheet_names();
        info!(path = %path.display(), sheets = names.len(), "Opened workbook");

        let sheets = names
            .into_iter()
            .map(|name| {
                let grid = match workbook.worksheet_range(&name) {
                    Ok(range) => {
                        let grid = range_to_grid(&range);
                        debug!(sheet = %name, rows = grid.row_count(), "Decoded sheet");
                        Ok(grid)
                    }
                    Err(e) => {
                        warn!(sheet = %name, error = %e, "Failed to decode sheet");
                        Err(e.to_string())
                    }
                };
                (name, grid)
            })
            .collect();

        Ok(Self { sheets })
    }
}

impl Workbook for CalamineWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn grid(&self, sheet: &str) -> Result<&RawGrid> {
        match self.sheets.iter().find(|(name, _)| name == sheet) {
            Some((_, Ok(grid))) => Ok(grid),
            Some((_, Err(e))) => Err(ExtractError::Workbook(format!(
                "sheet '{}' could not be decoded: {}",
                sheet, e
            ))),
            None => Err(ExtractError::Workbook(format!("no sheet named '{}'", sheet))),
        }
    }
}

// Ranges may start below/right of A1; keep absolute positions
fn range_to_grid(range: &Range<Data>) -> RawGrid {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    let mut grid = RawGrid::default();

    for (r, row) in range.rows().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let value = convert_cell(cell);
            if value != CellValue::Empty {
                grid.set(first_row as usize + r, first_col as usize + c, value);
            }
        }
    }
    grid
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::from(s.as_str()),
        Data::Error(_) | Data::Empty => CellValue::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_workbook_keeps_sheet_order() {
        let workbook = MemoryWorkbook::new()
            .with_sheet("Rekap", RawGrid::default())
            .with_sheet("14.15.17", RawGrid::from_text_rows(vec![vec!["x"]]));

        assert_eq!(workbook.sheet_names(), vec!["Rekap", "14.15.17"]);
        assert_eq!(workbook.grid("14.15.17").unwrap().text(0, 0), "x");
        assert!(matches!(workbook.grid("missing"), Err(ExtractError::Workbook(_))));
    }

    #[test]
    fn converts_calamine_cells() {
        assert_eq!(convert_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(convert_cell(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::String("08:00".to_string())),
            CellValue::Text("08:00".to_string())
        );
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn offset_ranges_keep_absolute_positions() {
        let mut range = Range::new((2, 3), (3, 4));
        range.set_value((2, 3), Data::String("Budi Santoso".to_string()));
        range.set_value((3, 4), Data::Float(0.5));

        let grid = range_to_grid(&range);
        assert_eq!(grid.text(2, 3), "Budi Santoso");
        assert_eq!(grid.cell(3, 4), &CellValue::Number(0.5));
        assert!(grid.cell(0, 0).is_blank());
    }

    #[test]
    fn opening_a_missing_file_fails() {
        let result = CalamineWorkbook::open("/definitely/not/here.xlsx");
        assert!(matches!(result, Err(ExtractError::Workbook(_))));
    }
}
