use std::io::Write;

use absensi_extract::config::ExtractConfig;
use absensi_extract::domain::{Period, RawGrid, Status};
use absensi_extract::error::ExtractError;
use absensi_extract::pipeline::{Extractor, MemoryWorkbook};
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_config_from_file() {
    let file = write_config(
        r#"
        late_after = "08:00:00"
        default_status = "Karyawan"
        sheet_marker = ""

        [[profiles]]
        name = "only"
        min_calendar_days = 2
        "#,
    );

    let config = ExtractConfig::load(file.path()).unwrap();
    assert_eq!(config.late_after.to_string(), "08:00:00");
    assert_eq!(config.default_status, Status::Karyawan);
    assert_eq!(config.profiles.len(), 1);
    assert_eq!(config.profiles[0].name, "only");
    assert_eq!(config.profiles[0].min_calendar_days, 2);
    assert!(config.sheet_selector().marker.is_none());
}

#[test]
fn test_missing_file_is_config_error() {
    let result = ExtractConfig::load("/nonexistent/absensi.toml");
    assert!(matches!(result, Err(ExtractError::Config(_))));
}

#[test]
fn test_invalid_window_rejected_on_load() {
    let file = write_config(
        r#"
        checkout_from = "18:00:00"
        checkout_until = "17:00:00"
        "#,
    );
    assert!(matches!(
        ExtractConfig::load(file.path()),
        Err(ExtractError::Config(_))
    ));
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("late_after = ");
    assert!(matches!(
        ExtractConfig::load(file.path()),
        Err(ExtractError::Toml(_))
    ));
}

#[test]
fn test_loaded_policy_drives_extraction() {
    let file = write_config(
        r#"
        late_after = "08:00:00"
        default_status = "Karyawan"
        "#,
    );
    let config = ExtractConfig::load(file.path()).unwrap();

    // No department cell: the configured default applies
    let mut grid = RawGrid::default();
    grid.set(0, 0, "Rina Wulandari");
    for day in 1..=8u32 {
        grid.set(3, day as usize, day.to_string());
    }
    grid.set(4, 1, "08:15");
    grid.set(5, 1, "16:00");

    let workbook = MemoryWorkbook::new().with_sheet("1.1", grid);
    let records = Extractor::new(config)
        .extract(&workbook, Period::new(2, 2024).unwrap())
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, Status::Karyawan);
    assert!(records[0].is_late);
    assert_eq!(records[0].date.to_string(), "2024-02-01");
}
