use std::fmt;

use thiserror::Error;

/// Which structural element of a sheet could not be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingStructure {
    Employee,
    CalendarRow,
    PunchRows,
}

impl fmt::Display for MissingStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MissingStructure::Employee => "employee identity",
            MissingStructure::CalendarRow => "calendar row",
            MissingStructure::PunchRows => "check-in/check-out rows",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("no attendance data found: {guidance}")]
    EmptyResult { guidance: String },

    #[error("sheet '{sheet}': no {missing} found")]
    StructureNotFound {
        sheet: String,
        missing: MissingStructure,
    },

    #[error("invalid period: month {month}, year {year}")]
    InvalidPeriod { month: u32, year: i32 },

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
