pub mod locate;
pub mod profile;
pub mod reconcile;
pub mod time_token;

pub use profile::{FuzzyWindow, StrictnessProfile};
pub use reconcile::{reconcile, ReconcilePolicy, Reconciliation};
pub use time_token::{contains_absence_marker, parse_time, parse_time_text};
