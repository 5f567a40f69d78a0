use std::borrow::Cow;

use chrono::NaiveDateTime;

/// A raw cell as decoded from a workbook sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Date/time cells already converted upstream
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text rendering used by every scanner. Integral numbers render without
    /// a fractional part, so `8.0` reads as `"8"`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Empty => Cow::Borrowed(""),
            CellValue::Text(s) => Cow::Borrowed(s.as_str()),
            CellValue::Number(n) => Cow::Owned(n.to_string()),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

/// Rows x columns of cells, 0-based. Reads outside the populated area
/// return an empty cell rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Build a grid from plain strings; empty strings become empty cells.
    pub fn from_text_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| CellValue::from(s.as_ref())).collect())
            .collect();
        Self { rows }
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Trimmed text of a cell; empty when out of bounds.
    pub fn text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).as_text().trim().to_string()
    }

    /// Write a cell, growing the grid as needed.
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<CellValue>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= col {
            cells.resize(col + 1, CellValue::Empty);
        }
        cells[col] = value.into();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_width(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_are_empty() {
        let grid = RawGrid::from_text_rows(vec![vec!["a", "b"]]);
        assert_eq!(grid.cell(0, 1), &CellValue::Text("b".to_string()));
        assert_eq!(grid.cell(5, 5), &CellValue::Empty);
        assert_eq!(grid.text(0, 9), "");
    }

    #[test]
    fn set_grows_ragged_rows() {
        let mut grid = RawGrid::default();
        grid.set(3, 4, "x");
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.row_width(3), 5);
        assert_eq!(grid.row_width(0), 0);
        assert_eq!(grid.text(3, 4), "x");
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(8.0).as_text(), "8");
        assert_eq!(CellValue::Number(8.5).as_text(), "8.5");
        assert!(CellValue::Text("  ".to_string()).is_blank());
    }
}
