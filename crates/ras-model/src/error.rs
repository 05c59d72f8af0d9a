//! Error types for the RAS model

use std::path::PathBuf;

/// Errors raised while interpreting HEC-RAS file names and contents
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Extension is not a role prefix followed by digits
    #[error("bad extension format: '{0}'")]
    BadExtension(String),

    /// Path carries no extension at all
    #[error("path has no extension: {}", .0.display())]
    MissingExtension(PathBuf),

    /// Prefix letter does not name a known file role
    #[error("unknown file role prefix: '{0}'")]
    UnknownRole(char),

    /// `Flow File=` value does not reference a flow file
    #[error("invalid flow file reference: '{0}'")]
    InvalidFlowFile(String),

    /// Hydrograph block could not be read back
    #[error("invalid hydrograph block: {0}")]
    InvalidHydrograph(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_extension_display() {
        let err = ModelError::BadExtension("pXY".to_string());
        assert_eq!(err.to_string(), "bad extension format: 'pXY'");
    }

    #[test]
    fn missing_extension_display() {
        let err = ModelError::MissingExtension(PathBuf::from("project"));
        assert_eq!(err.to_string(), "path has no extension: project");
    }
}
