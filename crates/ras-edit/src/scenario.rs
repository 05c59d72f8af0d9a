//! Flow scenarios
//!
//! One scenario per peak flow: a hydrograph written into a new unsteady flow
//! file, a new plan referencing it, and both registered in the project.

use crate::editor::{ConfigEditor, DerivedFile};
use crate::error::{EditError, EditResult};
use crate::project::{register_files, Registration};
use crate::sequence::SequenceAllocator;
use ras_model::{fits_column, Hydrograph, RasExtension};
use serde::Serialize;
use std::path::PathBuf;

/// Accept a peak that is positive and fits a hydrograph column
///
/// Ramp ordinates stay below the peak, so the peak decides the widest column.
///
/// # Errors
/// Returns [`EditError::InvalidPeak`] otherwise
pub fn check_peak(peak: f64) -> EditResult<f64> {
    if peak > 0.0 && fits_column(peak) {
        Ok(peak)
    } else {
        Err(EditError::InvalidPeak(peak))
    }
}

/// Files a scenario is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioTemplate {
    /// Project file (`.prj`) to register new files in
    pub project_file: PathBuf,
    /// Unsteady flow file (`.uNN`) to copy
    pub flow_file: PathBuf,
    /// Plan file (`.pNN`) to copy
    pub plan_file: PathBuf,
    /// Title for the new files; derived from the old titles when `None`
    pub title: Option<String>,
}

impl ScenarioTemplate {
    /// Template with derived titles
    #[must_use]
    pub fn new(
        project_file: impl Into<PathBuf>,
        flow_file: impl Into<PathBuf>,
        plan_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_file: project_file.into(),
            flow_file: flow_file.into(),
            plan_file: plan_file.into(),
            title: None,
        }
    }

    /// With a fixed title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Everything one scenario produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioOutcome {
    /// Peak flow
    pub peak: f64,
    /// Hydrograph written into the flow file
    pub hydrograph: Hydrograph,
    /// New unsteady flow file
    pub flow: DerivedFile,
    /// New plan file
    pub plan: DerivedFile,
    /// Project registrations
    pub registrations: Vec<(RasExtension, Registration)>,
}

/// One batch entry
#[derive(Debug)]
pub struct BatchItem {
    /// Peak flow
    pub peak: f64,
    /// Scenario result
    pub result: EditResult<ScenarioOutcome>,
}

/// Runs scenarios from a template
#[derive(Debug)]
pub struct ScenarioRunner<'e, A> {
    editor: &'e ConfigEditor<A>,
    template: ScenarioTemplate,
}

impl<'e, A: SequenceAllocator> ScenarioRunner<'e, A> {
    /// Create runner
    #[inline]
    #[must_use]
    pub fn new(editor: &'e ConfigEditor<A>, template: ScenarioTemplate) -> Self {
        Self { editor, template }
    }

    /// Template in use
    #[inline]
    #[must_use]
    pub fn template(&self) -> &ScenarioTemplate {
        &self.template
    }

    /// Derive flow and plan files for `peak` and register them
    ///
    /// A failure after the flow file is written leaves that file in place;
    /// it is a valid file and the next run allocates past it.
    ///
    /// # Errors
    /// - [`EditError::InvalidPeak`] unless [`check_peak`] accepts `peak`
    /// - any error of [`ConfigEditor::update_flow_file`],
    ///   [`ConfigEditor::update_plan_file`] or [`register_files`]
    pub fn run(&self, peak: f64) -> EditResult<ScenarioOutcome> {
        check_peak(peak)?;

        let title = self.template.title.as_deref();
        let hydrograph = self.editor.hydrograph(peak);

        let flow = self
            .editor
            .update_flow_file(&self.template.flow_file, &hydrograph, title, peak)?;
        let plan = self
            .editor
            .update_plan_file(&self.template.plan_file, flow.extension, title, peak)?;
        let registrations = register_files(
            &self.template.project_file,
            &[flow.extension, plan.extension],
            &self.editor.config().numbering,
        )?;

        tracing::info!(
            "Scenario {}: flow {} / plan {}",
            peak,
            flow.extension,
            plan.extension
        );

        Ok(ScenarioOutcome {
            peak,
            hydrograph,
            flow,
            plan,
            registrations,
        })
    }

    /// Run every peak in order; failures do not stop the batch
    pub fn run_batch(&self, peaks: &[f64]) -> Vec<BatchItem> {
        peaks
            .iter()
            .map(|&peak| {
                let result = self.run(peak);
                if let Err(e) = &result {
                    tracing::error!("Scenario {} failed: {}", peak, e);
                }
                BatchItem { peak, result }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::sequence::StaticSequence;

    #[test]
    fn rejects_unusable_peaks() {
        let editor = ConfigEditor::new(EditorConfig::default(), StaticSequence::new());
        let runner = ScenarioRunner::new(&editor, ScenarioTemplate::new("a.prj", "a.u01", "a.p01"));
        for peak in [0.0, -1.0, f64::NAN, f64::INFINITY, 123_456_789.0] {
            assert!(matches!(runner.run(peak), Err(EditError::InvalidPeak(_))));
        }
    }

    #[test]
    fn batch_keeps_going() {
        let editor = ConfigEditor::new(EditorConfig::default(), StaticSequence::new());
        let runner = ScenarioRunner::new(&editor, ScenarioTemplate::new("a.prj", "a.u01", "a.p01"));
        let items = runner.run_batch(&[-1.0, 2.0]);
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0].result, Err(EditError::InvalidPeak(_))));
        // Source files do not exist
        assert!(matches!(items[1].result, Err(EditError::Io { .. })));
    }

    #[test]
    fn template_title() {
        let template = ScenarioTemplate::new("a.prj", "a.u01", "a.p01").with_title("Design");
        assert_eq!(template.title.as_deref(), Some("Design"));
    }
}
