// Structural scanners: each looks for one landmark in a sheet grid and
// returns `None` when the landmark is absent

pub mod calendar;
pub mod employee;
pub mod punch;

pub use calendar::{locate_calendar_row, CalendarDay, CalendarMap};
pub use employee::locate_employee;
pub use punch::{locate_punch_rows, PunchRowSource, PunchRows};
