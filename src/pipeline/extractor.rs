use std::sync::Arc;

use tracing::{info, info_span};

use crate::config::ExtractConfig;
use crate::domain::{AttendanceRecord, EmployeeIdentity, Period, RawGrid};
use crate::error::{ExtractError, MissingStructure, Result};
use crate::observability::{DiagnosticSink, TracingSink};
use crate::pipeline::ingestion::{is_data_sheet_name, Workbook};
use crate::pipeline::processing::locate::{
    locate_calendar_row, locate_employee, locate_punch_rows, CalendarMap, PunchRows,
};
use crate::pipeline::processing::{reconcile, StrictnessProfile};

/// Everything found on one sheet by the winning profile.
#[derive(Debug, Clone)]
pub struct SheetExtraction {
    pub sheet: String,
    pub profile: String,
    pub employee: EmployeeIdentity,
    pub calendar: CalendarMap,
    pub punch_rows: PunchRows,
    pub records: Vec<AttendanceRecord>,
}

// The three landmarks a profile has to find before any record is read
struct SheetStructure {
    employee: EmployeeIdentity,
    calendar: CalendarMap,
    punch_rows: PunchRows,
}

/// Runs the extraction over every qualifying sheet of a workbook.
///
/// Sheets are independent: nothing found on one sheet is carried to the
/// next, and a sheet that fails only contributes zero records.
pub struct Extractor {
    config: ExtractConfig,
    sink: Arc<dyn DiagnosticSink>,
}

impl Extractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self {
            config,
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Names of the sheets that will be scanned, in workbook order.
    pub fn select_sheets(&self, sheet_names: &[String]) -> Vec<String> {
        let selected = self.config.sheet_selector().select(sheet_names);

        for name in sheet_names {
            if selected.contains(name) {
                self.sink.sheet_selected(name);
            } else if is_data_sheet_name(name) {
                self.sink.sheet_skipped(name, "before marker sheet");
            } else {
                self.sink.sheet_skipped(name, "summary or non-numeric name");
            }
        }
        selected
    }

    pub fn extract(&self, workbook: &dyn Workbook, period: Period) -> Result<Vec<AttendanceRecord>> {
        let sheet_names = workbook.sheet_names();
        let selected = self.select_sheets(&sheet_names);

        if selected.is_empty() {
            return Err(ExtractError::EmptyResult {
                guidance: format!(
                    "no sheet named with a numeric pattern found (expected names like '14.15.17'); \
                     sheets in workbook: [{}]",
                    sheet_names.join(", ")
                ),
            });
        }

        let mut records = Vec::new();
        for sheet in &selected {
            let span = info_span!("sheet", sheet = %sheet);
            let _enter = span.enter();

            let outcome = workbook
                .grid(sheet)
                .and_then(|grid| self.extract_sheet(sheet, grid, period));

            match outcome {
                Ok(extraction) => records.extend(extraction.records),
                Err(e) => self.sink.sheet_failed(sheet, &e.to_string()),
            }
        }

        if records.is_empty() {
            return Err(ExtractError::EmptyResult {
                guidance: format!(
                    "checked {} sheet(s) [{}] but none produced a record; each sheet needs an \
                     employee name near the top, a row of day numbers (1-31) and check-in/check-out \
                     rows under it",
                    selected.len(),
                    selected.join(", ")
                ),
            });
        }

        info!(
            sheets = selected.len(),
            records = records.len(),
            "Extraction finished"
        );
        Ok(records)
    }

    /// Try each profile in order and reconcile with the first one that
    /// finds a complete structure.
    pub fn extract_sheet(&self, sheet: &str, grid: &RawGrid, period: Period) -> Result<SheetExtraction> {
        let mut missing = MissingStructure::Employee;

        for profile in &self.config.profiles {
            let structure = match self.locate_structure(grid, profile) {
                Ok(structure) => structure,
                Err(what) => {
                    self.sink.profile_rejected(sheet, &profile.name, what);
                    missing = what;
                    continue;
                }
            };

            let SheetStructure {
                employee,
                calendar,
                punch_rows,
            } = structure;

            self.sink.employee_resolved(sheet, &employee);
            self.sink
                .calendar_row_accepted(sheet, &profile.name, calendar.row, calendar.len());
            let duplicates = calendar.duplicate_days();
            if !duplicates.is_empty() {
                self.sink.duplicate_calendar_days(sheet, &duplicates);
            }

            let result = reconcile(
                &employee,
                &calendar,
                &punch_rows,
                grid,
                period,
                profile,
                &self.config.policy(),
            );
            for day in &result.absent_days {
                self.sink.day_dropped_absent(sheet, *day);
            }
            self.sink.sheet_extracted(sheet, result.records.len());

            return Ok(SheetExtraction {
                sheet: sheet.to_string(),
                profile: profile.name.clone(),
                employee,
                calendar,
                punch_rows,
                records: result.records,
            });
        }

        Err(ExtractError::StructureNotFound {
            sheet: sheet.to_string(),
            missing,
        })
    }

    fn locate_structure(
        &self,
        grid: &RawGrid,
        profile: &StrictnessProfile,
    ) -> std::result::Result<SheetStructure, MissingStructure> {
        let employee = locate_employee(grid, profile, self.config.employee_column_hint())
            .ok_or(MissingStructure::Employee)?;
        let calendar = locate_calendar_row(grid, profile).ok_or(MissingStructure::CalendarRow)?;
        let punch_rows =
            locate_punch_rows(grid, calendar.row, profile).ok_or(MissingStructure::PunchRows)?;

        Ok(SheetStructure {
            employee,
            calendar,
            punch_rows,
        })
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::{DiagnosticEvent, MemorySink};

    fn sheet_grid(days: u32) -> RawGrid {
        let mut grid = RawGrid::default();
        grid.set(1, 0, "Sari Dewi");
        grid.set(2, 0, "Office");
        for day in 1..=days {
            grid.set(4, day as usize, day.to_string());
        }
        grid.set(5, 1, "07:58");
        grid.set(6, 1, "17:00");
        grid
    }

    #[test]
    fn falls_through_to_first_complete_profile() {
        let sink = Arc::new(MemorySink::new());
        let extractor = Extractor::default().with_sink(sink.clone());

        let extraction = extractor
            .extract_sheet("1.1", &sheet_grid(10), Period::new(6, 2025).unwrap())
            .unwrap();

        assert_eq!(extraction.profile, "basic");
        assert_eq!(extraction.calendar.row, 4);
        assert_eq!(extraction.records.len(), 1);

        let events = sink.events();
        assert!(events.contains(&DiagnosticEvent::ProfileRejected {
            sheet: "1.1".to_string(),
            profile: "strict".to_string(),
            missing: MissingStructure::CalendarRow,
        }));
        assert!(events.contains(&DiagnosticEvent::CalendarRowAccepted {
            sheet: "1.1".to_string(),
            profile: "basic".to_string(),
            row: 4,
            days: 10,
        }));
        let absent = events
            .iter()
            .filter(|e| matches!(e, DiagnosticEvent::DayDroppedAbsent { .. }))
            .count();
        assert_eq!(absent, 9);
    }

    #[test]
    fn short_calendars_need_the_flexible_profile() {
        let extractor = Extractor::default();
        let extraction = extractor
            .extract_sheet("1.1", &sheet_grid(4), Period::new(6, 2025).unwrap())
            .unwrap();
        assert_eq!(extraction.profile, "flexible");
    }

    #[test]
    fn reports_what_was_missing() {
        let mut grid = RawGrid::default();
        grid.set(0, 0, "Sari Dewi");

        let result = Extractor::default().extract_sheet("1.1", &grid, Period::new(6, 2025).unwrap());
        assert!(matches!(
            result,
            Err(ExtractError::StructureNotFound {
                missing: MissingStructure::CalendarRow,
                ..
            })
        ));
    }

    #[test]
    fn select_sheets_reports_reasons() {
        let sink = Arc::new(MemorySink::new());
        let extractor = Extractor::default().with_sink(sink.clone());
        let names: Vec<String> = ["Rekap", "14.15.16", "14.15.17"].iter().map(|s| s.to_string()).collect();

        assert_eq!(extractor.select_sheets(&names), vec!["14.15.17".to_string()]);
        assert_eq!(
            sink.events(),
            vec![
                DiagnosticEvent::SheetSkipped {
                    sheet: "Rekap".to_string(),
                    reason: "summary or non-numeric name".to_string(),
                },
                DiagnosticEvent::SheetSkipped {
                    sheet: "14.15.16".to_string(),
                    reason: "before marker sheet".to_string(),
                },
                DiagnosticEvent::SheetSelected { sheet: "14.15.17".to_string() },
            ]
        );
    }
}
