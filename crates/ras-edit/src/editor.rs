//! Derived-file editor
//!
//! [`ConfigEditor`] ties a configuration to a [`SequenceAllocator`] and turns
//! patched files into new numbered files next to their source. Sources are
//! never modified.

use crate::config::EditorConfig;
use crate::error::{EditError, EditResult};
use crate::io::{read_config, write_new};
use crate::patch::{PatchReport, PatchSet};
use crate::sequence::{project_dir, same_directory, DirectoryScanner, SequenceAllocator};
use ras_model::{keys, FileRole, Hydrograph, ModelError, RasExtension};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A file written by [`ConfigEditor::derive`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedFile {
    /// File the content was read from
    pub source: PathBuf,
    /// New file
    pub path: PathBuf,
    /// Extension of the new file
    pub extension: RasExtension,
    /// Patch outcome
    pub report: PatchReport,
}

/// Creates patched copies of plan and flow files
#[derive(Debug, Clone)]
pub struct ConfigEditor<A = DirectoryScanner> {
    config: EditorConfig,
    allocator: A,
}

impl ConfigEditor<DirectoryScanner> {
    /// Editor allocating against the files in `dir`
    #[inline]
    #[must_use]
    pub fn for_directory(config: EditorConfig, dir: impl Into<PathBuf>) -> Self {
        Self::new(config, DirectoryScanner::new(dir))
    }
}

impl<A: SequenceAllocator> ConfigEditor<A> {
    /// Create editor
    #[inline]
    #[must_use]
    pub fn new(config: EditorConfig, allocator: A) -> Self {
        Self { config, allocator }
    }

    /// Configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Sequence allocator
    #[inline]
    #[must_use]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Empty patch set using this editor's configuration
    #[inline]
    #[must_use]
    pub fn patch_set(&self) -> PatchSet {
        PatchSet::for_config(&self.config)
    }

    /// Hydrograph rising to `peak` in the configured shape
    #[must_use]
    pub fn hydrograph(&self, peak: f64) -> Hydrograph {
        let shape = &self.config.hydrograph;
        Hydrograph::ramp_to_peak(peak, shape.ramp_steps, shape.steady_steps)
    }

    /// Patch `source` and persist it under the next free number of `role`
    ///
    /// # Errors
    /// - [`EditError::Model`] if the source extension is malformed
    /// - [`EditError::WrongRole`] if the source is not a `role` file
    /// - [`EditError::OutsideDirectory`] if the allocator lists a directory
    ///   other than the one holding `source`
    /// - [`EditError::SequenceExhausted`] if no number is left
    /// - [`EditError::TargetExists`] / [`EditError::Io`] on write failures
    pub fn derive(
        &self,
        source: impl AsRef<Path>,
        role: FileRole,
        patches: &PatchSet,
    ) -> EditResult<DerivedFile> {
        let source = source.as_ref();
        let found = RasExtension::from_path(source)?.role();
        if found != role {
            return Err(EditError::WrongRole {
                path: source.to_path_buf(),
                expected: role,
                found,
            });
        }
        if let Some(directory) = self.allocator.directory() {
            if !same_directory(&project_dir(source)?, directory) {
                return Err(EditError::OutsideDirectory {
                    path: source.to_path_buf(),
                    directory: directory.to_path_buf(),
                });
            }
        }

        let mut file = read_config(source)?;
        let report = patches.apply(&mut file);

        let extension = self.allocator.next(role, &self.config.numbering)?;
        let path = source.with_extension(extension.padded(self.config.numbering.digits));
        file.set_path(&path);
        write_new(&file)?;
        self.allocator.claim(extension);

        tracing::info!(
            "Derived {} from {} ({} line(s) changed)",
            path.display(),
            source.display(),
            report.lines_changed
        );

        Ok(DerivedFile {
            source: source.to_path_buf(),
            path,
            extension,
            report,
        })
    }

    /// New unsteady flow file carrying `hydrograph`, titled for `peak`
    ///
    /// # Errors
    /// See [`ConfigEditor::derive`]
    pub fn update_flow_file(
        &self,
        source: impl AsRef<Path>,
        hydrograph: &Hydrograph,
        title: Option<&str>,
        peak: f64,
    ) -> EditResult<DerivedFile> {
        let patches = self
            .patch_set()
            .hydrograph(hydrograph.clone())
            .title(keys::FLOW_TITLE, title, peak);
        self.derive(source, FileRole::UnsteadyFlow, &patches)
    }

    /// New plan file referencing `flow`, titled for `peak`
    ///
    /// # Errors
    /// - [`EditError::Model`] if `flow` is not a flow file extension
    /// - see [`ConfigEditor::derive`]
    pub fn update_plan_file(
        &self,
        source: impl AsRef<Path>,
        flow: RasExtension,
        title: Option<&str>,
        peak: f64,
    ) -> EditResult<DerivedFile> {
        if !matches!(flow.role(), FileRole::UnsteadyFlow | FileRole::SteadyFlow) {
            return Err(ModelError::InvalidFlowFile(flow.to_string()).into());
        }

        let patches = self
            .patch_set()
            .fixed(keys::FLOW_FILE, flow.padded(self.config.numbering.digits))
            .title(keys::PLAN_TITLE, title, peak)
            .title(keys::SHORT_IDENTIFIER, title, peak);
        self.derive(source, FileRole::Plan, &patches)
    }
}
