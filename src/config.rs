use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{CONFIG_ENV_VAR, DEFAULT_SHEET_MARKER};
use crate::domain::{Status, TimeOfDay};
use crate::error::{ExtractError, Result};
use crate::pipeline::ingestion::{SheetOrdering, SheetSelector};
use crate::pipeline::processing::{ReconcilePolicy, StrictnessProfile};

/// Half-open column range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

/// Extraction settings, usually read from a TOML file. Every field is
/// optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub late_after: TimeOfDay,
    pub checkout_from: TimeOfDay,
    pub checkout_until: TimeOfDay,
    /// Status for employees without a department token
    pub default_status: Status,
    /// First data sheet to read; empty disables the cutoff
    pub sheet_marker: String,
    pub sheet_ordering: SheetOrdering,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_columns: Option<ColumnRange>,
    /// Tried in order for every sheet
    pub profiles: Vec<StrictnessProfile>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        let policy = ReconcilePolicy::default();
        Self {
            late_after: policy.late_after,
            checkout_from: policy.checkout_from,
            checkout_until: policy.checkout_until,
            default_status: policy.unknown_status,
            sheet_marker: DEFAULT_SHEET_MARKER.to_string(),
            sheet_ordering: SheetOrdering::default(),
            employee_columns: None,
            profiles: StrictnessProfile::ladder(),
        }
    }
}

impl ExtractConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ExtractError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: ExtractConfig = toml::from_str(&content)?;
        config.validate()?;
        info!(path = %path.display(), profiles = config.profiles.len(), "Loaded config");
        Ok(config)
    }

    /// Load the file named by `ABSENSI_CONFIG` (a `.env` file is honoured),
    /// or fall back to defaults.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim()),
            _ => {
                debug!("No {} set, using default config", CONFIG_ENV_VAR);
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.profiles.is_empty() {
            return Err(ExtractError::Config(
                "at least one strictness profile is required".to_string(),
            ));
        }
        if self.checkout_from > self.checkout_until {
            return Err(ExtractError::Config(format!(
                "checkout window is empty: {} > {}",
                self.checkout_from, self.checkout_until
            )));
        }
        if let Some(range) = self.employee_columns {
            if range.start >= range.end {
                return Err(ExtractError::Config(format!(
                    "employee column range {}..{} is empty",
                    range.start, range.end
                )));
            }
        }
        Ok(())
    }

    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            late_after: self.late_after,
            checkout_from: self.checkout_from,
            checkout_until: self.checkout_until,
            unknown_status: self.default_status,
        }
    }

    pub fn sheet_selector(&self) -> SheetSelector {
        let marker = self.sheet_marker.trim();
        let marker = (!marker.is_empty()).then(|| marker.to_string());
        SheetSelector::new(marker, self.sheet_ordering)
    }

    pub fn employee_column_hint(&self) -> Option<Range<usize>> {
        self.employee_columns.map(|r| r.start..r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_policy() {
        let config = ExtractConfig::default();
        assert_eq!(config.late_after.to_string(), "10:00:00");
        assert_eq!(config.checkout_from.to_string(), "15:00:00");
        assert_eq!(config.checkout_until.to_string(), "17:00:00");
        assert_eq!(config.default_status, Status::Magang);
        assert_eq!(config.profiles.len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: ExtractConfig = toml::from_str(
            r#"
            late_after = "09:30:00"
            default_status = "Karyawan"
            sheet_ordering = "segments"
            employee_columns = { start = 0, end = 3 }
            "#,
        )
        .unwrap();

        assert_eq!(config.late_after.to_string(), "09:30:00");
        assert_eq!(config.default_status, Status::Karyawan);
        assert_eq!(config.sheet_ordering, SheetOrdering::Segments);
        assert_eq!(config.employee_column_hint(), Some(0..3));
        assert_eq!(config.checkout_until.to_string(), "17:00:00");
        assert_eq!(config.policy().unknown_status, Status::Karyawan);
    }

    #[test]
    fn empty_marker_disables_cutoff() {
        let config = ExtractConfig {
            sheet_marker: "  ".to_string(),
            ..ExtractConfig::default()
        };
        assert_eq!(config.sheet_selector().marker, None);
        assert_eq!(
            ExtractConfig::default().sheet_selector().marker.as_deref(),
            Some(DEFAULT_SHEET_MARKER)
        );
    }

    #[test]
    fn validation_rejects_bad_values() {
        let no_profiles = ExtractConfig {
            profiles: Vec::new(),
            ..ExtractConfig::default()
        };
        assert!(matches!(no_profiles.validate(), Err(ExtractError::Config(_))));

        let inverted = ExtractConfig {
            checkout_from: "18:00:00".parse().unwrap(),
            ..ExtractConfig::default()
        };
        assert!(inverted.validate().is_err());

        let empty_columns = ExtractConfig {
            employee_columns: Some(ColumnRange { start: 2, end: 2 }),
            ..ExtractConfig::default()
        };
        assert!(empty_columns.validate().is_err());
    }

    #[test]
    fn malformed_time_is_a_toml_error() {
        let result: std::result::Result<ExtractConfig, _> = toml::from_str("late_after = \"ten\"");
        assert!(result.is_err());
    }
}
