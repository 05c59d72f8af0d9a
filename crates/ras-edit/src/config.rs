//! Editor configuration
//!
//! Passed explicitly to every editor; there is no global state. Loadable
//! from TOML:
//!
//! ```toml
//! flow_unit = "cms"
//!
//! [hydrograph]
//! ramp_steps = 2
//! steady_steps = 3
//! values_per_row = 10
//!
//! [numbering]
//! digits = 2
//! ```

use crate::error::EditError;
use ras_model::VALUES_PER_ROW;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label used for configuration parsed from a string
const INLINE_SOURCE: &str = "<inline>";

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Unit suffix of derived titles (`MW_8cms`)
    pub flow_unit: String,
    /// Hydrograph shape and layout
    pub hydrograph: HydrographConfig,
    /// Sequence numbering of derived files
    pub numbering: NumberingPolicy,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With flow unit suffix
    #[inline]
    #[must_use]
    pub fn with_flow_unit(mut self, unit: impl Into<String>) -> Self {
        self.flow_unit = unit.into();
        self
    }

    /// With ramp and steady step counts
    #[inline]
    #[must_use]
    pub fn with_steps(mut self, ramp_steps: usize, steady_steps: usize) -> Self {
        self.hydrograph.ramp_steps = ramp_steps;
        self.hydrograph.steady_steps = steady_steps;
        self
    }

    /// With hydrograph columns per row
    #[inline]
    #[must_use]
    pub fn with_values_per_row(mut self, values_per_row: usize) -> Self {
        self.hydrograph.values_per_row = values_per_row;
        self
    }

    /// With numbering digits
    #[inline]
    #[must_use]
    pub fn with_digits(mut self, digits: usize) -> Self {
        self.numbering.digits = digits;
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns [`EditError::Config`] on syntax errors, unknown fields or
    /// out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self, EditError> {
        Self::parse_from(text, Path::new(INLINE_SOURCE))
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// - [`EditError::Io`] if the file cannot be read
    /// - [`EditError::Config`] if its content is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EditError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EditError::io(path, e))?;
        let config = Self::parse_from(&text, path)?;
        tracing::debug!("Loaded editor configuration from {}", path.display());
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`EditError::Config`] naming the first bad field
    pub fn validate(&self) -> Result<(), EditError> {
        self.validate_at(Path::new(INLINE_SOURCE))
    }

    fn parse_from(text: &str, source: &Path) -> Result<Self, EditError> {
        let config: Self =
            toml::from_str(text).map_err(|e| EditError::config(source, e.to_string()))?;
        config.validate_at(source)?;
        Ok(config)
    }

    fn validate_at(&self, source: &Path) -> Result<(), EditError> {
        if self.hydrograph.values_per_row == 0 {
            return Err(EditError::config(source, "hydrograph.values_per_row must be at least 1"));
        }
        if !(1..=NumberingPolicy::MAX_DIGITS).contains(&self.numbering.digits) {
            return Err(EditError::config(
                source,
                format!("numbering.digits must be within 1..={}", NumberingPolicy::MAX_DIGITS),
            ));
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            flow_unit: "cms".to_string(),
            hydrograph: HydrographConfig::default(),
            numbering: NumberingPolicy::default(),
        }
    }
}

/// Hydrograph shape and layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydrographConfig {
    /// Entries rising towards the peak
    pub ramp_steps: usize,
    /// Entries holding the peak
    pub steady_steps: usize,
    /// Columns per row when serializing
    pub values_per_row: usize,
}

impl Default for HydrographConfig {
    fn default() -> Self {
        Self {
            ramp_steps: 2,
            steady_steps: 3,
            values_per_row: VALUES_PER_ROW,
        }
    }
}

/// Sequence numbering of derived files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NumberingPolicy {
    /// Zero-padded digits of the sequence number (`p01` → 2)
    pub digits: usize,
}

impl NumberingPolicy {
    /// Widest padding accepted (keeps the maximum inside `u32`)
    pub const MAX_DIGITS: usize = 9;

    /// Highest number expressible with the configured digits
    #[must_use]
    pub fn max_number(&self) -> u32 {
        let digits = u32::try_from(self.digits.clamp(1, Self::MAX_DIGITS)).unwrap_or(1);
        10u32.pow(digits) - 1
    }
}

impl Default for NumberingPolicy {
    fn default() -> Self {
        Self { digits: 2 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.flow_unit, "cms");
        assert_eq!(config.hydrograph.ramp_steps, 2);
        assert_eq!(config.hydrograph.steady_steps, 3);
        assert_eq!(config.hydrograph.values_per_row, 10);
        assert_eq!(config.numbering.max_number(), 99);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EditorConfig::from_toml_str("[hydrograph]\nsteady_steps = 6\n").unwrap();
        assert_eq!(config.hydrograph.steady_steps, 6);
        assert_eq!(config.hydrograph.ramp_steps, 2);
        assert_eq!(config.flow_unit, "cms");
    }

    #[test]
    fn full_toml() {
        let text = r#"
flow_unit = "cfs"

[hydrograph]
ramp_steps = 4
steady_steps = 1
values_per_row = 8

[numbering]
digits = 3
"#;
        let config = EditorConfig::from_toml_str(text).unwrap();
        assert_eq!(
            config,
            EditorConfig::new()
                .with_flow_unit("cfs")
                .with_steps(4, 1)
                .with_digits(3)
                .with_values_per_row(8)
        );
        assert_eq!(config.numbering.max_number(), 999);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = EditorConfig::from_toml_str("flow_units = \"cms\"\n").unwrap_err();
        assert!(matches!(err, EditError::Config { .. }));
    }

    #[test]
    fn zero_columns_rejected() {
        let err = EditorConfig::from_toml_str("[hydrograph]\nvalues_per_row = 0\n").unwrap_err();
        assert!(err.to_string().contains("values_per_row"));
    }

    #[test]
    fn digit_range_checked() {
        assert!(EditorConfig::new().with_digits(0).validate().is_err());
        assert!(EditorConfig::new().with_digits(10).validate().is_err());
        assert!(EditorConfig::new().with_digits(9).validate().is_ok());
    }

    #[test]
    fn load_missing_file() {
        let err = EditorConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, EditError::Io { .. }));
    }
}
