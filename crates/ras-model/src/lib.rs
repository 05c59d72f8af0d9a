//! RAS Model
//!
//! Typed, in-memory view of the fixed-format text files a HEC-RAS project
//! is made of.
//!
//! # Core Concepts
//!
//! - [`FileRole`]: what a file is for (plan, unsteady flow, geometry)
//! - [`RasExtension`]: role + sequence number, e.g. `p01`, `u12`
//! - [`ConfigFile`]: ordered lines of a `Key=Value` file, rendered back
//!   byte-for-byte
//! - [`KeyedLine`]: one `Key=Value` line with its padded field width
//! - [`Hydrograph`]: flow magnitudes serialized in 8-character columns
//! - [`PlanRecord`]: the interesting fields of a plan file
//!
//! # Example
//!
//! ```rust
//! use ras_model::{ConfigFile, FileRole, Hydrograph};
//!
//! let file = ConfigFile::parse("MW_Valleys.u01", "Flow Title=MW_4cms\n");
//! assert_eq!(file.role().unwrap(), FileRole::UnsteadyFlow);
//!
//! let hydrograph = Hydrograph::ramp_to_peak(3.0, 2, 3);
//! assert_eq!(hydrograph.to_rows(10), vec!["       1       2       3       3       3"]);
//! ```

#![warn(unreachable_pub)]

// Core modules
mod config_file;
mod error;
mod extension;
mod hydrograph;
mod keyed;
pub mod keys;
mod plan;
mod role;

// Re-exports
pub use config_file::{ConfigFile, LineEnding};
pub use error::ModelError;
pub use extension::RasExtension;
pub use hydrograph::{fits_column, format_value, Hydrograph, FIELD_WIDTH, VALUES_PER_ROW};
pub use keyed::{matches_key, KeyedLine};
pub use plan::PlanRecord;
pub use role::FileRole;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn plan_file_lifecycle() {
        let content = "Plan Title=MW_10cms\nShort Identifier=MW_10cms    \nFlow File=u03\n";
        let mut file = ConfigFile::parse("/models/MW_Valleys.p04", content);

        assert_eq!(file.extension().unwrap(), RasExtension::from_str("p04").unwrap());

        let index = file.find_key(keys::SHORT_IDENTIFIER).unwrap();
        let line = KeyedLine::parse(file.line(index).unwrap(), keys::SHORT_IDENTIFIER).unwrap();
        let patched = line.with_value("MW_8cms");
        file.set_line(index, patched);

        let record = PlanRecord::from_config(&file).unwrap();
        assert_eq!(record.short_identifier.as_deref(), Some("MW_8cms"));
        assert_eq!(file.render().len(), content.len());
    }

    #[test]
    fn hydrograph_block_in_flow_file() {
        let hydrograph = Hydrograph::new(vec![0.4, 0.8, 1.5, 3.0, 3.0, 3.0]);
        let rows = hydrograph.to_rows(VALUES_PER_ROW);
        assert_eq!(rows, vec!["      .4      .8     1.5       3       3       3"]);

        let parsed = Hydrograph::parse_rows(6, rows.iter().map(String::as_str)).unwrap();
        assert_eq!(parsed, hydrograph);
    }
}
