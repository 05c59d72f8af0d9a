//! Error types for RAS Edit
//!
//! Provides error handling for:
//! - File reads and writes (with the offending path)
//! - Extension/role mismatches
//! - Sequence allocation
//! - Current-plan validation
//! - Configuration loading

use ras_model::{FileRole, ModelError, RasExtension};
use std::path::{Path, PathBuf};

/// Errors raised by editing operations
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// IO error on a file or directory
    #[error("io error on {}: {source}", .path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// File name or content does not fit the model ("bad format")
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Source file has a different role than the operation expects
    #[error("{}: expected a {expected} file, found a {found} file", .path.display())]
    WrongRole {
        /// Offending file
        path: PathBuf,
        /// Role the operation works on
        expected: FileRole,
        /// Role encoded in the extension
        found: FileRole,
    },

    /// Requested plan has no file in the project directory
    #[error("plan {extension} not found in {}", .directory.display())]
    PlanNotFound {
        /// Requested plan
        extension: RasExtension,
        /// Directory searched
        directory: PathBuf,
    },

    /// Numbering policy has no number left for this role
    #[error("no {role} sequence number left (max {max})")]
    SequenceExhausted {
        /// Role being allocated
        role: FileRole,
        /// Highest number the policy allows
        max: u32,
    },

    /// Derived file would overwrite an existing one
    #[error("refusing to overwrite existing file: {}", .0.display())]
    TargetExists(PathBuf),

    /// Path has no parent directory to scan
    #[error("path has no parent directory: {}", .0.display())]
    NoParent(PathBuf),

    /// Peak flow is not a usable magnitude
    #[error("peak flow must be positive and fit an 8-character column, got {0}")]
    InvalidPeak(f64),

    /// Source file is outside the directory its numbers are allocated from
    #[error("{} is not in the allocation directory {}", .path.display(), .directory.display())]
    OutsideDirectory {
        /// Source file
        path: PathBuf,
        /// Directory the allocator lists
        directory: PathBuf,
    },

    /// Configuration could not be loaded
    #[error("invalid configuration in {}: {message}", .path.display())]
    Config {
        /// Configuration source
        path: PathBuf,
        /// What was wrong
        message: String,
    },
}

impl EditError {
    /// Create IO error for path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create configuration error
    pub fn config(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Whether the error is a rejected input rather than an environment failure
    ///
    /// Batch callers typically report these and move on to the next item.
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::Model(_)
                | Self::WrongRole { .. }
                | Self::PlanNotFound { .. }
                | Self::InvalidPeak(_)
                | Self::OutsideDirectory { .. }
        )
    }
}

/// Result type alias for editing operations
pub type EditResult<T> = Result<T, EditError>;
