//! Record reconciliation
//!
//! Walks the calendar columns of one sheet, reads the punch cells under each
//! day and turns them into attendance records. Days without any punch are
//! absences and produce no record.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    AttendanceRecord, CellValue, EmployeeIdentity, Period, RawGrid, RecordDate, Status, TimeOfDay,
};
use crate::pipeline::processing::locate::{CalendarMap, PunchRows};
use crate::pipeline::processing::profile::{FuzzyWindow, StrictnessProfile};
use crate::pipeline::processing::time_token::{
    contains_absence_marker, parse_time, parse_time_text, split_lines,
};

/// Thresholds applied when classifying punches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcilePolicy {
    /// Check-ins strictly after this are late
    pub late_after: TimeOfDay,
    /// Inclusive range in which a check-out counts as recorded
    pub checkout_from: TimeOfDay,
    pub checkout_until: TimeOfDay,
    /// Status for employees whose department was not found
    pub unknown_status: Status,
}

impl Default for ReconcilePolicy {
    fn default() -> Self {
        Self {
            late_after: hms(10, 0, 0),
            checkout_from: hms(15, 0, 0),
            checkout_until: hms(17, 0, 0),
            unknown_status: Status::Magang,
        }
    }
}

fn hms(hour: u32, minute: u32, second: u32) -> TimeOfDay {
    TimeOfDay::from_hms(hour, minute, second).unwrap_or_default()
}

impl ReconcilePolicy {
    pub fn is_late(&self, check_in: Option<TimeOfDay>) -> bool {
        check_in.is_some_and(|t| t > self.late_after)
    }

    pub fn is_check_out_recorded(&self, check_out: Option<TimeOfDay>) -> bool {
        check_out.is_some_and(|t| t >= self.checkout_from && t <= self.checkout_until)
    }
}

/// Output of one sheet's reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub records: Vec<AttendanceRecord>,
    /// Calendar days dropped because neither punch was present
    pub absent_days: Vec<u32>,
    /// Repeated calendar days ignored after a record was already built
    pub repeated_days: Vec<u32>,
}

// A punch value and the cell line it was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Punch {
    time: TimeOfDay,
    row: usize,
    col: usize,
    line: usize,
}

impl Punch {
    fn same_reading(&self, other: &Punch) -> bool {
        (self.row, self.col, self.line) == (other.row, other.col, other.line)
            || self.time == other.time
    }
}

pub fn reconcile(
    employee: &EmployeeIdentity,
    calendar: &CalendarMap,
    punch_rows: &PunchRows,
    grid: &RawGrid,
    period: Period,
    profile: &StrictnessProfile,
    policy: &ReconcilePolicy,
) -> Reconciliation {
    let status = employee.category.resolve(policy.unknown_status);
    let mut emitted: HashSet<u32> = HashSet::new();
    let mut out = Reconciliation::default();

    for entry in &calendar.days {
        if emitted.contains(&entry.day) {
            out.repeated_days.push(entry.day);
            continue;
        }

        let next_column = calendar
            .days
            .iter()
            .map(|d| d.column)
            .filter(|c| *c > entry.column)
            .min();
        let day = DayCells {
            col: entry.column,
            next_column,
            calendar_row: calendar.row,
        };
        let (check_in, check_out) = read_day(grid, &day, punch_rows, profile);

        if check_in.is_none() && check_out.is_none() {
            out.absent_days.push(entry.day);
            continue;
        }

        emitted.insert(entry.day);
        out.records.push(AttendanceRecord {
            employee_name: employee.display_name.clone(),
            status,
            date: RecordDate::new(period.year(), period.month(), entry.day),
            check_in,
            check_out,
            is_late: policy.is_late(check_in),
            is_check_out_recorded: policy.is_check_out_recorded(check_out),
        });
    }

    out
}

// Where one day's punches may be read from
struct DayCells {
    col: usize,
    /// Column of the next calendar day to the right, if any
    next_column: Option<usize>,
    calendar_row: usize,
}

fn read_day(
    grid: &RawGrid,
    day: &DayCells,
    rows: &PunchRows,
    profile: &StrictnessProfile,
) -> (Option<TimeOfDay>, Option<TimeOfDay>) {
    let col = day.col;
    let (mut check_in, mut check_out) = read_cell_pair(grid, rows.check_in_row, col, profile);

    // Combined rows carry check-out only inside the check-in cell
    if check_out.is_none() && rows.check_out_row != rows.check_in_row {
        check_out = read_first(grid, rows.check_out_row, col);
    }

    if let Some(window) = profile.fuzzy {
        if check_in.is_none() {
            // A check-out already read from its row is not a check-in candidate
            let skip_row = check_out.map(|p| p.row);
            check_in = search_below(grid, day.calendar_row, col, window, skip_row);
        }
        if check_out.is_none() {
            if let Some(found) = check_in {
                check_out = search_right(grid, found, window, day.next_column);
            }
        }
    }

    // The same reading is never both check-in and check-out
    if let (Some(i), Some(o)) = (check_in, check_out) {
        if i.same_reading(&o) {
            check_out = None;
        }
    }

    (check_in.map(|p| p.time), check_out.map(|p| p.time))
}

/// Read the check-in cell. Multi-line cells always give their first line as
/// check-in; the second line is the check-out only when the profile allows.
fn read_cell_pair(
    grid: &RawGrid,
    row: usize,
    col: usize,
    profile: &StrictnessProfile,
) -> (Option<Punch>, Option<Punch>) {
    let cell = grid.cell(row, col);
    let text = cell.as_text();
    if contains_absence_marker(&text) {
        return (None, None);
    }

    if let CellValue::Text(_) = cell {
        let lines = split_lines(&text);
        if lines.len() > 1 {
            let at = |line: usize| {
                parse_time_text(lines[line]).map(|time| Punch { time, row, col, line })
            };
            let check_out = if profile.split_multiline { at(1) } else { None };
            return (at(0), check_out);
        }
    }

    let punch = parse_time(cell).map(|time| Punch { time, row, col, line: 0 });
    (punch, None)
}

/// Read a single punch, taking the first line of multi-line cells.
fn read_first(grid: &RawGrid, row: usize, col: usize) -> Option<Punch> {
    let cell = grid.cell(row, col);
    let text = cell.as_text();
    if contains_absence_marker(&text) {
        return None;
    }

    let time = match cell {
        CellValue::Text(_) => split_lines(&text).first().and_then(|line| parse_time_text(line)),
        _ => parse_time(cell),
    }?;
    Some(Punch { time, row, col, line: 0 })
}

fn search_below(
    grid: &RawGrid,
    calendar_row: usize,
    col: usize,
    window: FuzzyWindow,
    skip_row: Option<usize>,
) -> Option<Punch> {
    (calendar_row + 1..=calendar_row + window.rows_below)
        .filter(|row| Some(*row) != skip_row)
        .find_map(|row| read_first(grid, row, col))
}

// Only a distinct afternoon reading counts as a check-out, and never one
// from the next day's column
fn search_right(
    grid: &RawGrid,
    check_in: Punch,
    window: FuzzyWindow,
    next_column: Option<usize>,
) -> Option<Punch> {
    let mut last = check_in.col + window.cols_right;
    if let Some(next) = next_column {
        last = last.min(next.saturating_sub(1));
    }
    (check_in.col + 1..=last)
        .filter_map(|col| read_first(grid, check_in.row, col))
        .find(|p| p.time != check_in.time && p.time.hour() >= 12)
}
