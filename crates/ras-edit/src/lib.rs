//! RAS Edit
//!
//! The editing boundary between HEC-RAS project directories and the
//! automation that drives HEC-RAS.
//!
//! # Core Operations
//!
//! - **Patch**: rewrite keyed lines of a plan/flow file ([`PatchSet`])
//! - **Derive**: persist the patched file under the next free sequence
//!   number of its role, never overwriting ([`ConfigEditor::derive`])
//! - **Register**: add the new files to the project file ([`register_files`])
//! - **Select**: point the project's `Current Plan=` at an existing plan
//!   ([`CurrentPlanSetter`])
//!
//! # Architecture
//!
//! ```text
//! source.p01 → read → ConfigFile → PatchSet::apply → ConfigFile' → write_new → source.p06
//!                                                       ↑
//!                                        SequenceAllocator::next (scan directory)
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use ras_edit::{ConfigEditor, EditorConfig, ScenarioRunner, ScenarioTemplate};
//!
//! # fn example() -> Result<(), ras_edit::EditError> {
//! let editor = ConfigEditor::for_directory(EditorConfig::default(), "models/MW");
//! let template = ScenarioTemplate::new(
//!     "models/MW/MW_Valleys.prj",
//!     "models/MW/MW_Valleys.u01",
//!     "models/MW/MW_Valleys.p01",
//! );
//!
//! let outcome = ScenarioRunner::new(&editor, template).run(2.5)?;
//! println!("new plan: {}", outcome.plan.path.display());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod catalog;
pub mod config;
pub mod editor;
pub mod error;
pub mod io;
pub mod patch;
pub mod project;
pub mod scenario;
pub mod sequence;
pub mod title;

// Re-exports for convenience
pub use catalog::{scan_plans, scan_titles, PlanEntry, TitleEntry};
pub use config::{EditorConfig, HydrographConfig, NumberingPolicy};
pub use editor::{ConfigEditor, DerivedFile};
pub use error::{EditError, EditResult};
pub use patch::{PatchReport, PatchSet, Replacement};
pub use project::{
    register_entry, register_files, set_current_plan, CurrentPlanSetter, CurrentPlanState,
    Registration, ValidatedPlan, WrittenPlan,
};
pub use scenario::{check_peak, BatchItem, ScenarioOutcome, ScenarioRunner, ScenarioTemplate};
pub use sequence::{
    project_dir, same_directory, DirectoryScanner, SequenceAllocator, StaticSequence,
};
pub use title::{derive_title, flow_token};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with RAS Edit
    pub use crate::config::EditorConfig;
    pub use crate::editor::{ConfigEditor, DerivedFile};
    pub use crate::error::{EditError, EditResult};
    pub use crate::patch::{PatchSet, Replacement};
    pub use crate::sequence::{DirectoryScanner, SequenceAllocator, StaticSequence};
    pub use ras_model::{keys, ConfigFile, FileRole, Hydrograph, RasExtension};
}
