//! File roles encoded in HEC-RAS extensions

use crate::error::ModelError;
use crate::keys;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Role of a numbered project file, taken from the first extension letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    /// Plan file (`.pNN`)
    Plan,
    /// Unsteady flow file (`.uNN`)
    UnsteadyFlow,
    /// Steady flow file (`.fNN`)
    SteadyFlow,
    /// Geometry file (`.gNN`)
    Geometry,
}

impl FileRole {
    /// Every role, in prefix order of a typical project listing
    pub const ALL: [FileRole; 4] = [
        FileRole::Plan,
        FileRole::UnsteadyFlow,
        FileRole::SteadyFlow,
        FileRole::Geometry,
    ];

    /// Extension prefix letter
    #[inline]
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Plan => 'p',
            Self::UnsteadyFlow => 'u',
            Self::SteadyFlow => 'f',
            Self::Geometry => 'g',
        }
    }

    /// Resolve a prefix letter (case-insensitive)
    ///
    /// # Errors
    /// Returns [`ModelError::UnknownRole`] for any other letter
    pub fn from_prefix(prefix: char) -> Result<Self, ModelError> {
        match prefix.to_ascii_lowercase() {
            'p' => Ok(Self::Plan),
            'u' => Ok(Self::UnsteadyFlow),
            'f' => Ok(Self::SteadyFlow),
            'g' => Ok(Self::Geometry),
            _ => Err(ModelError::UnknownRole(prefix)),
        }
    }

    /// Key of the line holding this file's title
    #[inline]
    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Plan => keys::PLAN_TITLE,
            Self::UnsteadyFlow | Self::SteadyFlow => keys::FLOW_TITLE,
            Self::Geometry => keys::GEOM_TITLE,
        }
    }

    /// Key under which the project file registers files of this role
    #[inline]
    #[must_use]
    pub const fn project_key(self) -> &'static str {
        match self {
            Self::Plan => keys::PLAN_FILE,
            Self::UnsteadyFlow => keys::UNSTEADY_FILE,
            Self::SteadyFlow => keys::STEADY_FILE,
            Self::Geometry => keys::GEOM_FILE,
        }
    }

    /// Human-readable name
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Plan => "plan",
            Self::UnsteadyFlow => "unsteady flow",
            Self::SteadyFlow => "steady flow",
            Self::Geometry => "geometry",
        }
    }
}

impl Display for FileRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
