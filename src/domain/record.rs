use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::time::TimeOfDay;

/// Employment category derived from the department token on a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Permanent,
    Intern,
    Unknown,
}

/// Status written at the persistence boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Karyawan", alias = "karyawan")]
    Karyawan,
    #[serde(rename = "Magang", alias = "magang")]
    Magang,
}

impl Category {
    /// Resolve to a boundary status; `Unknown` takes the caller's default.
    pub fn resolve(self, unknown_default: Status) -> Status {
        match self {
            Category::Permanent => Status::Karyawan,
            Category::Intern => Status::Magang,
            Category::Unknown => unknown_default,
        }
    }
}

/// Who a sheet belongs to. Produced once per sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeIdentity {
    pub display_name: String,
    pub category: Category,
}

/// Calendar date stamped from the selected period and a day-of-month.
///
/// Not validated against the real calendar: day 31 of a 30-day month is
/// kept as-is and left for the store to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl RecordDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = String::deserialize(deserializer)?;
        let parts: Vec<&str> = raw.splitn(3, '-').collect();
        if parts.len() != 3 {
            return Err(D::Error::custom(format!("expected YYYY-MM-DD, got '{}'", raw)));
        }
        let year = parts[0].parse::<i32>().map_err(D::Error::custom)?;
        let month = parts[1].parse::<u32>().map_err(D::Error::custom)?;
        let day = parts[2].parse::<u32>().map_err(D::Error::custom)?;
        Ok(Self { year, month, day })
    }
}

/// One employee's attendance on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(rename = "nama")]
    pub employee_name: String,
    pub status: Status,
    #[serde(rename = "tanggal")]
    pub date: RecordDate,
    #[serde(rename = "jam_masuk")]
    pub check_in: Option<TimeOfDay>,
    #[serde(rename = "jam_pulang")]
    pub check_out: Option<TimeOfDay>,
    #[serde(rename = "terlambat")]
    pub is_late: bool,
    #[serde(rename = "pulang_tercatat")]
    pub is_check_out_recorded: bool,
}

/// Keep the last record for each (name, date) pair, in first-seen order.
/// Mirrors the de-duplication the downstream store performs.
pub fn dedupe_by_name_and_date(records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    let mut slots: HashMap<(String, RecordDate), usize> = HashMap::new();
    let mut out: Vec<AttendanceRecord> = Vec::with_capacity(records.len());

    for record in records {
        let key = (record.employee_name.clone(), record.date);
        match slots.get(&key) {
            Some(&idx) => out[idx] = record,
            None => {
                slots.insert(key, out.len());
                out.push(record);
            }
        }
    }
    out
}
