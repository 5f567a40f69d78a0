use serde::{Deserialize, Serialize};

/// How far the adjacent-cell search may wander from a calendar column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyWindow {
    /// Rows below the calendar row searched for a check-in
    pub rows_below: usize,
    /// Columns right of the day column searched for a check-out
    pub cols_right: usize,
}

/// One tier of the scanning heuristics.
///
/// Profiles are tried in order for every sheet; the first one that yields an
/// employee, a calendar row and punch rows wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrictnessProfile {
    pub name: String,
    /// Day markers a row needs before it counts as the calendar row
    pub min_calendar_days: usize,
    pub calendar_rows: usize,
    pub calendar_cols: usize,
    pub employee_rows: usize,
    pub employee_cols: usize,
    pub label_rows_above: usize,
    pub label_rows_below: usize,
    /// Fail the punch-row search instead of falling back to positions
    pub require_labels: bool,
    /// Reject the extended set of label words as names
    pub strict_denylist: bool,
    /// Read `check-in\ncheck-out` from one cell
    pub split_multiline: bool,
    pub fuzzy: Option<FuzzyWindow>,
}

impl Default for StrictnessProfile {
    fn default() -> Self {
        Self::basic()
    }
}

impl StrictnessProfile {
    pub fn strict() -> Self {
        Self {
            name: "strict".to_string(),
            min_calendar_days: 20,
            calendar_rows: 36,
            calendar_cols: 50,
            employee_rows: 15,
            employee_cols: 10,
            label_rows_above: 2,
            label_rows_below: 5,
            require_labels: true,
            strict_denylist: true,
            split_multiline: false,
            fuzzy: None,
        }
    }

    pub fn basic() -> Self {
        Self {
            name: "basic".to_string(),
            min_calendar_days: 7,
            calendar_rows: 36,
            calendar_cols: 50,
            employee_rows: 20,
            employee_cols: 15,
            label_rows_above: 2,
            label_rows_below: 5,
            require_labels: false,
            strict_denylist: false,
            split_multiline: true,
            fuzzy: None,
        }
    }

    pub fn flexible() -> Self {
        Self {
            name: "flexible".to_string(),
            min_calendar_days: 3,
            calendar_rows: 36,
            calendar_cols: 50,
            employee_rows: 25,
            employee_cols: 20,
            label_rows_above: 2,
            label_rows_below: 5,
            require_labels: false,
            strict_denylist: false,
            split_multiline: true,
            fuzzy: Some(FuzzyWindow {
                rows_below: 4,
                cols_right: 2,
            }),
        }
    }

    /// The default ladder, strictest first.
    pub fn ladder() -> Vec<Self> {
        vec![Self::strict(), Self::basic(), Self::flexible()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_loosens_monotonically() {
        let ladder = StrictnessProfile::ladder();
        let names: Vec<&str> = ladder.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["strict", "basic", "flexible"]);

        for pair in ladder.windows(2) {
            assert!(pair[0].min_calendar_days > pair[1].min_calendar_days);
            assert!(pair[0].employee_rows <= pair[1].employee_rows);
        }
        assert!(ladder[0].require_labels);
        assert!(ladder[2].fuzzy.is_some());
    }

    #[test]
    fn partial_toml_profile_fills_defaults() {
        let profile: StrictnessProfile =
            toml::from_str("name = \"wide\"\nmin_calendar_days = 2").unwrap();
        assert_eq!(profile.name, "wide");
        assert_eq!(profile.min_calendar_days, 2);
        assert_eq!(profile.calendar_cols, StrictnessProfile::basic().calendar_cols);
    }
}
