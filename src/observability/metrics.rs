//! Extraction Metrics
//!
//! Counters for the extractor's decision points, recorded through the
//! `metrics` facade. Nothing is exported unless the host installs a
//! recorder.

use crate::domain::EmployeeIdentity;
use crate::error::MissingStructure;

use super::DiagnosticSink;

pub const SHEETS_SELECTED: &str = "absensi_extract_sheets_selected_total";
pub const SHEETS_SKIPPED: &str = "absensi_extract_sheets_skipped_total";
pub const SHEETS_FAILED: &str = "absensi_extract_sheets_failed_total";
pub const PROFILES_REJECTED: &str = "absensi_extract_profiles_rejected_total";
pub const CALENDAR_ROWS_ACCEPTED: &str = "absensi_extract_calendar_rows_accepted_total";
pub const DUPLICATE_DAYS: &str = "absensi_extract_duplicate_calendar_days_total";
pub const DAYS_ABSENT: &str = "absensi_extract_days_absent_total";
pub const RECORDS_EXTRACTED: &str = "absensi_extract_records_total";

/// A wrapper that adds metrics to any sink implementation
pub struct MetricsSink<S: DiagnosticSink> {
    inner: S,
}

impl<S: DiagnosticSink> MetricsSink<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: DiagnosticSink> DiagnosticSink for MetricsSink<S> {
    fn sheet_selected(&self, sheet: &str) {
        ::metrics::counter!(SHEETS_SELECTED).increment(1);
        self.inner.sheet_selected(sheet);
    }

    fn sheet_skipped(&self, sheet: &str, reason: &str) {
        ::metrics::counter!(SHEETS_SKIPPED).increment(1);
        self.inner.sheet_skipped(sheet, reason);
    }

    fn profile_rejected(&self, sheet: &str, profile: &str, missing: MissingStructure) {
        ::metrics::counter!(
            PROFILES_REJECTED,
            "profile" => profile.to_string(),
            "missing" => missing.to_string()
        )
        .increment(1);
        self.inner.profile_rejected(sheet, profile, missing);
    }

    fn calendar_row_accepted(&self, sheet: &str, profile: &str, row: usize, days: usize) {
        ::metrics::counter!(CALENDAR_ROWS_ACCEPTED, "profile" => profile.to_string()).increment(1);
        self.inner.calendar_row_accepted(sheet, profile, row, days);
    }

    fn duplicate_calendar_days(&self, sheet: &str, days: &[u32]) {
        ::metrics::counter!(DUPLICATE_DAYS).increment(days.len() as u64);
        self.inner.duplicate_calendar_days(sheet, days);
    }

    fn employee_resolved(&self, sheet: &str, employee: &EmployeeIdentity) {
        self.inner.employee_resolved(sheet, employee);
    }

    fn day_dropped_absent(&self, sheet: &str, day: u32) {
        ::metrics::counter!(DAYS_ABSENT).increment(1);
        self.inner.day_dropped_absent(sheet, day);
    }

    fn sheet_failed(&self, sheet: &str, error: &str) {
        ::metrics::counter!(SHEETS_FAILED).increment(1);
        self.inner.sheet_failed(sheet, error);
    }

    fn sheet_extracted(&self, sheet: &str, records: usize) {
        ::metrics::counter!(RECORDS_EXTRACTED).increment(records as u64);
        self.inner.sheet_extracted(sheet, records);
    }
}
