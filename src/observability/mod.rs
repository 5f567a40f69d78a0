// Observability: decision-point diagnostics and metrics

pub mod metrics;

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::domain::EmployeeIdentity;
use crate::error::MissingStructure;

pub use self::metrics::MetricsSink;

/// Receives the extractor's decisions as they are made.
///
/// Every method has an empty default so sinks only implement what they
/// care about.
pub trait DiagnosticSink: Send + Sync {
    fn sheet_selected(&self, _sheet: &str) {}

    fn sheet_skipped(&self, _sheet: &str, _reason: &str) {}

    fn profile_rejected(&self, _sheet: &str, _profile: &str, _missing: MissingStructure) {}

    fn calendar_row_accepted(&self, _sheet: &str, _profile: &str, _row: usize, _days: usize) {}

    fn duplicate_calendar_days(&self, _sheet: &str, _days: &[u32]) {}

    fn employee_resolved(&self, _sheet: &str, _employee: &EmployeeIdentity) {}

    fn day_dropped_absent(&self, _sheet: &str, _day: u32) {}

    fn sheet_failed(&self, _sheet: &str, _error: &str) {}

    fn sheet_extracted(&self, _sheet: &str, _records: usize) {}
}

/// Default sink: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn sheet_selected(&self, sheet: &str) {
        debug!(sheet, "Sheet selected");
    }

    fn sheet_skipped(&self, sheet: &str, reason: &str) {
        debug!(sheet, reason, "Sheet skipped");
    }

    fn profile_rejected(&self, sheet: &str, profile: &str, missing: MissingStructure) {
        debug!(sheet, profile, missing = %missing, "Profile rejected");
    }

    fn calendar_row_accepted(&self, sheet: &str, profile: &str, row: usize, days: usize) {
        info!(sheet, profile, row, days, "Calendar row accepted");
    }

    fn duplicate_calendar_days(&self, sheet: &str, days: &[u32]) {
        warn!(sheet, ?days, "Calendar row repeats days");
    }

    fn employee_resolved(&self, sheet: &str, employee: &EmployeeIdentity) {
        info!(
            sheet,
            name = %employee.display_name,
            category = ?employee.category,
            "Employee identity resolved"
        );
    }

    fn day_dropped_absent(&self, sheet: &str, day: u32) {
        debug!(sheet, day, "Day dropped as absent");
    }

    fn sheet_failed(&self, sheet: &str, error: &str) {
        warn!(sheet, error, "Sheet contributed no records");
    }

    fn sheet_extracted(&self, sheet: &str, records: usize) {
        info!(sheet, records, "Sheet extracted");
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {}

/// A captured decision, as recorded by [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    SheetSelected { sheet: String },
    SheetSkipped { sheet: String, reason: String },
    ProfileRejected { sheet: String, profile: String, missing: MissingStructure },
    CalendarRowAccepted { sheet: String, profile: String, row: usize, days: usize },
    DuplicateCalendarDays { sheet: String, days: Vec<u32> },
    EmployeeResolved { sheet: String, name: String },
    DayDroppedAbsent { sheet: String, day: u32 },
    SheetFailed { sheet: String, error: String },
    SheetExtracted { sheet: String, records: usize },
}

/// Keeps every event in memory, in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn push(&self, event: DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn sheet_selected(&self, sheet: &str) {
        self.push(DiagnosticEvent::SheetSelected { sheet: sheet.to_string() });
    }

    fn sheet_skipped(&self, sheet: &str, reason: &str) {
        self.push(DiagnosticEvent::SheetSkipped {
            sheet: sheet.to_string(),
            reason: reason.to_string(),
        });
    }

    fn profile_rejected(&self, sheet: &str, profile: &str, missing: MissingStructure) {
        self.push(DiagnosticEvent::ProfileRejected {
            sheet: sheet.to_string(),
            profile: profile.to_string(),
            missing,
        });
    }

    fn calendar_row_accepted(&self, sheet: &str, profile: &str, row: usize, days: usize) {
        self.push(DiagnosticEvent::CalendarRowAccepted {
            sheet: sheet.to_string(),
            profile: profile.to_string(),
            row,
            days,
        });
    }

    fn duplicate_calendar_days(&self, sheet: &str, days: &[u32]) {
        self.push(DiagnosticEvent::DuplicateCalendarDays {
            sheet: sheet.to_string(),
            days: days.to_vec(),
        });
    }

    fn employee_resolved(&self, sheet: &str, employee: &EmployeeIdentity) {
        self.push(DiagnosticEvent::EmployeeResolved {
            sheet: sheet.to_string(),
            name: employee.display_name.clone(),
        });
    }

    fn day_dropped_absent(&self, sheet: &str, day: u32) {
        self.push(DiagnosticEvent::DayDroppedAbsent { sheet: sheet.to_string(), day });
    }

    fn sheet_failed(&self, sheet: &str, error: &str) {
        self.push(DiagnosticEvent::SheetFailed {
            sheet: sheet.to_string(),
            error: error.to_string(),
        });
    }

    fn sheet_extracted(&self, sheet: &str, records: usize) {
        self.push(DiagnosticEvent::SheetExtracted { sheet: sheet.to_string(), records });
    }
}
