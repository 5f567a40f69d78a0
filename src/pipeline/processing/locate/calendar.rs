use std::collections::BTreeSet;

use chrono::{Datelike, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{CellValue, RawGrid};
use crate::pipeline::processing::profile::StrictnessProfile;

// "7", "07", "01 Mo", "1Sen", "12 Sel."
static DAY_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})(?:\s*\p{L}[\p{L}.]*)?$").expect("valid day marker regex")
});

/// One calendar column and the day-of-month it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub column: usize,
    pub day: u32,
}

/// The calendar header row of a sheet and its column-to-day mapping, in
/// left-to-right column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMap {
    pub row: usize,
    pub days: Vec<CalendarDay>,
}

impl CalendarMap {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days that appear in more than one column. A well-formed sheet has none.
    pub fn duplicate_days(&self) -> Vec<u32> {
        let mut seen = BTreeSet::new();
        let mut dupes = BTreeSet::new();
        for entry in &self.days {
            if !seen.insert(entry.day) {
                dupes.insert(entry.day);
            }
        }
        dupes.into_iter().collect()
    }
}

/// Find the first row, top to bottom, holding enough day markers.
pub fn locate_calendar_row(grid: &RawGrid, profile: &StrictnessProfile) -> Option<CalendarMap> {
    let rows = profile.calendar_rows.min(grid.row_count());
    let threshold = profile.min_calendar_days.max(1);

    (0..rows).find_map(|row| {
        let days: Vec<CalendarDay> = (0..profile.calendar_cols)
            .filter_map(|column| {
                day_marker(grid.cell(row, column)).map(|day| CalendarDay { column, day })
            })
            .collect();

        (days.len() >= threshold).then_some(CalendarMap { row, days })
    })
}

/// Read a cell as a day-of-month header, 1 to 31.
pub fn day_marker(cell: &CellValue) -> Option<u32> {
    let day = match cell {
        CellValue::Number(n) if n.fract() == 0.0 && *n >= 0.0 => *n as u32,
        CellValue::Text(s) => {
            let caps = DAY_MARKER.captures(s.trim())?;
            caps[1].parse().ok()?
        }
        // Real dates only; time-only cells sit on the 1899-12-31 epoch
        CellValue::DateTime(dt) if dt.year() >= 1900 && dt.time().num_seconds_from_midnight() == 0 => {
            dt.day()
        }
        _ => return None,
    };
    (1..=31).contains(&day).then_some(day)
}
