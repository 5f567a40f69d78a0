use crate::error::{ExtractError, Result};

/// The month a workbook covers, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    month: u32,
    year: i32,
}

impl Period {
    /// Validate a caller-selected month (1-12) and four-digit year.
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(ExtractError::InvalidPeriod { month, year });
        }
        Ok(Self { month, year })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}
