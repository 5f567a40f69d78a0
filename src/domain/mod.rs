// Data shapes shared by the extraction stages

pub mod grid;
pub mod period;
pub mod record;
pub mod time;

pub use grid::{CellValue, RawGrid};
pub use period::Period;
pub use record::{
    dedupe_by_name_and_date, AttendanceRecord, Category, EmployeeIdentity, RecordDate, Status,
};
pub use time::TimeOfDay;
