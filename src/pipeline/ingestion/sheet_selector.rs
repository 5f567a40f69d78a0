//! Sheet selection
//!
//! Data sheets are named with digits and dots ("14.15.17"). Summary sheets
//! ("Rekap", "Log") are skipped, and an optional marker sheet sets the
//! earliest sheet to read.
//!
//! The default [`SheetOrdering::Digits`] compares names by dropping the dots
//! and reading the rest as one integer. That is lexical rather than semantic:
//! "14.16.1" becomes 14161, which sorts *before* "14.15.17" (141517).
//! [`SheetOrdering::Segments`] compares dot-separated numbers one by one.

use std::cmp::Ordering;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::SUMMARY_SHEET_MARKERS;

static NUMERIC_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9.]*[0-9][0-9.]*$").expect("valid sheet name regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetOrdering {
    /// Strip dots, compare as one integer
    #[default]
    Digits,
    /// Compare dot-separated numbers left to right
    Segments,
}

impl SheetOrdering {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            SheetOrdering::Digits => compare_digits(a, b),
            SheetOrdering::Segments => compare_segments(a, b),
        }
    }
}

// Integer comparison without overflow: longer digit runs are larger
fn compare_digits(a: &str, b: &str) -> Ordering {
    let strip = |s: &str| -> String {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        digits.trim_start_matches('0').to_string()
    };
    let (a, b) = (strip(a), strip(b));
    a.len().cmp(&b.len()).then_with(|| a.cmp(&b))
}

fn compare_segments(a: &str, b: &str) -> Ordering {
    let segments = |s: &str| -> Vec<u64> {
        s.split('.')
            .filter(|seg| !seg.is_empty())
            .map(|seg| seg.parse().unwrap_or(u64::MAX))
            .collect()
    };
    segments(a).cmp(&segments(b))
}

/// Decides which sheets of a workbook hold attendance grids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSelector {
    pub marker: Option<String>,
    pub ordering: SheetOrdering,
}

impl SheetSelector {
    pub fn new(marker: Option<String>, ordering: SheetOrdering) -> Self {
        Self { marker, ordering }
    }

    pub fn select(&self, sheet_names: &[String]) -> Vec<String> {
        let ordering = self.ordering;
        self.select_with(sheet_names, |a, b| ordering.compare(a, b))
    }

    /// Select with a caller-supplied comparator for the marker cutoff.
    pub fn select_with<F>(&self, sheet_names: &[String], compare: F) -> Vec<String>
    where
        F: Fn(&str, &str) -> Ordering,
    {
        let candidates: Vec<(usize, &String)> = sheet_names
            .iter()
            .enumerate()
            .filter(|(_, name)| is_data_sheet_name(name))
            .collect();

        let cutoff = self.marker.as_deref().and_then(|marker| {
            sheet_names
                .iter()
                .position(|name| name.trim() == marker)
                .map(|position| (position, marker))
        });

        candidates
            .into_iter()
            .filter(|(position, name)| match cutoff {
                Some((marker_pos, marker)) => {
                    *position >= marker_pos && compare(name.trim(), marker) != Ordering::Less
                }
                None => true,
            })
            .map(|(_, name)| name.clone())
            .collect()
    }
}

/// Digits-and-dots names that are not summary sheets.
pub fn is_data_sheet_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    if SUMMARY_SHEET_MARKERS.iter().any(|m| lower.contains(m)) {
        return false;
    }
    NUMERIC_NAME.is_match(&lower)
}
