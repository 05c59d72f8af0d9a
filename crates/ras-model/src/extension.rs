//! Numbered HEC-RAS extensions
//!
//! Provides [`RasExtension`] for the `p01` / `u12` / `g03` suffixes that tie a
//! file to its role and sequence number.

use crate::error::ModelError;
use crate::role::FileRole;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{self, Display, Formatter};
use std::path::Path;
use std::str::FromStr;

/// Digits used when displaying sequence numbers
pub const DEFAULT_DIGITS: usize = 2;

/// Role and sequence number of a project file
///
/// # Examples
/// - `p01` → plan 1
/// - `u12` → unsteady flow 12
/// - `G3` → geometry 3 (displayed as `g03`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RasExtension {
    role: FileRole,
    number: u32,
}

impl RasExtension {
    /// Create extension from parts
    #[inline]
    #[must_use]
    pub const fn new(role: FileRole, number: u32) -> Self {
        Self { role, number }
    }

    /// File role
    #[inline]
    #[must_use]
    pub const fn role(&self) -> FileRole {
        self.role
    }

    /// Sequence number
    #[inline]
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Same role, different sequence number
    #[inline]
    #[must_use]
    pub const fn with_number(self, number: u32) -> Self {
        Self {
            role: self.role,
            number,
        }
    }

    /// Read the extension from the last `.` suffix of a path
    ///
    /// # Errors
    /// - [`ModelError::MissingExtension`] if the path has no suffix
    /// - [`ModelError::BadExtension`] / [`ModelError::UnknownRole`] if the
    ///   suffix is not a numbered role extension
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ModelError::MissingExtension(path.to_path_buf()))?;
        ext.parse()
    }

    /// Render with a given zero-padding width
    #[must_use]
    pub fn padded(&self, digits: usize) -> String {
        format!("{}{:0digits$}", self.role.prefix(), self.number)
    }
}

impl Display for RasExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.padded(DEFAULT_DIGITS))
    }
}

impl FromStr for RasExtension {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let prefix = chars
            .next()
            .ok_or_else(|| ModelError::BadExtension(s.to_string()))?;
        let digits = chars.as_str();

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::BadExtension(s.to_string()));
        }

        let role = FileRole::from_prefix(prefix)?;
        let number = digits
            .parse::<u32>()
            .map_err(|_| ModelError::BadExtension(s.to_string()))?;

        Ok(Self { role, number })
    }
}

impl Serialize for RasExtension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RasExtension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
