//! Flow hydrographs and their fixed-width serialization
//!
//! HEC-RAS stores hydrograph ordinates in 8-character, right-justified
//! columns, ten per row (80 columns). Values are written as compactly as
//! the column allows: `0.5` is `.5`, `3.0` is `3`.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Width of one hydrograph column
pub const FIELD_WIDTH: usize = 8;

/// Columns per row in HEC-RAS flow files
pub const VALUES_PER_ROW: usize = 10;

/// Decimals tried first when formatting a value
const MAX_DECIMALS: usize = 3;

/// Ordered flow magnitudes: ramp phase followed by steady phase
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hydrograph(Vec<f64>);

impl Hydrograph {
    /// Wrap explicit ordinates
    #[inline]
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Linear ramp up to `peak`, then hold it
    ///
    /// Ramp entry `i` is `peak * (i + 1) / (ramp_steps + 1)`, so the ramp
    /// rises strictly and stays below the peak. `ramp_steps = 0` gives an
    /// all-steady hydrograph.
    #[must_use]
    pub fn ramp_to_peak(peak: f64, ramp_steps: usize, steady_steps: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let denominator = (ramp_steps + 1) as f64;
        #[allow(clippy::cast_precision_loss)]
        let ramp = (0..ramp_steps).map(|i| peak * (i + 1) as f64 / denominator);
        let steady = std::iter::repeat(peak).take(steady_steps);
        Self(ramp.chain(steady).collect())
    }

    /// Read back `count` ordinates from fixed-width rows
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidHydrograph`] if a column is not a number
    /// or the rows hold fewer than `count` values
    pub fn parse_rows<'a, I>(count: usize, rows: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = Vec::with_capacity(count);

        'rows: for row in rows {
            for column in row.as_bytes().chunks(FIELD_WIDTH) {
                if values.len() == count {
                    break 'rows;
                }
                let text = std::str::from_utf8(column)
                    .map_err(|e| ModelError::InvalidHydrograph(e.to_string()))?
                    .trim();
                if text.is_empty() {
                    continue;
                }
                let value = text.parse::<f64>().map_err(|_| {
                    ModelError::InvalidHydrograph(format!("not a number: '{text}'"))
                })?;
                values.push(value);
            }
        }

        if values.len() < count {
            return Err(ModelError::InvalidHydrograph(format!(
                "expected {count} values, found {}",
                values.len()
            )));
        }
        Ok(Self(values))
    }

    /// Ordinates
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of ordinates
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the hydrograph is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest ordinate
    #[must_use]
    pub fn peak(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::max)
    }

    /// Serialize into rows of `values_per_row` columns, trailing spaces trimmed
    #[must_use]
    pub fn to_rows(&self, values_per_row: usize) -> Vec<String> {
        self.0
            .chunks(values_per_row.max(1))
            .map(|chunk| {
                let row: String = chunk.iter().copied().map(format_value).collect();
                row.trim_end().to_string()
            })
            .collect()
    }
}

impl From<Vec<f64>> for Hydrograph {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

/// Whether `value` can be written in one column
///
/// Values needing more than [`FIELD_WIDTH`] characters with no decimals,
/// like `123456789`, would run into the next column.
#[must_use]
pub fn fits_column(value: f64) -> bool {
    value.is_finite() && compact(value, 0).len() <= FIELD_WIDTH
}

/// Format one ordinate as an 8-character right-justified column
///
/// Uses up to three decimals, fewer when the text would not fit. Check
/// [`fits_column`] first; wider values are returned unpadded.
#[must_use]
pub fn format_value(value: f64) -> String {
    let mut decimals = MAX_DECIMALS;
    let mut text = compact(value, decimals);
    while text.len() > FIELD_WIDTH && decimals > 0 {
        decimals -= 1;
        text = compact(value, decimals);
    }
    format!("{text:>width$}", width = FIELD_WIDTH)
}

fn compact(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };

    if text == "-0" {
        return "0".to_string();
    }
    if let Some(fraction) = text.strip_prefix("0.") {
        return format!(".{fraction}");
    }
    if let Some(fraction) = text.strip_prefix("-0.") {
        return format!("-.{fraction}");
    }
    text.to_string()
}
