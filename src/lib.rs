pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod observability;
pub mod pipeline;

pub use config::ExtractConfig;
pub use domain::{dedupe_by_name_and_date, AttendanceRecord, Period, RawGrid, Status};
pub use error::{ExtractError, Result};
pub use pipeline::{CalamineWorkbook, Extractor, MemoryWorkbook, Workbook};
