//! Project file (`.prj`) updates
//!
//! Unlike plan and flow files, the project file is rewritten in place: new
//! files are registered in it and its current plan is switched.
//!
//! # Current plan
//!
//! Selecting a plan goes through three stages, each its own type:
//!
//! ```text
//! CurrentPlanSetter ──validate──▶ ValidatedPlan ──write──▶ WrittenPlan
//!   (project exists)          (plan file exists)        (project saved)
//! ```
//!
//! A [`ValidatedPlan`] can only be obtained from
//! [`CurrentPlanSetter::validate`], so nothing reaches the file unchecked.
//! HEC-RAS reads the project once; a running instance has to close and
//! reopen it before the new plan is active.

use crate::config::NumberingPolicy;
use crate::error::{EditError, EditResult};
use crate::io::{read_config, write_in_place};
use crate::sequence::{project_dir, SequenceAllocator};
use ras_model::{keys, ConfigFile, FileRole, KeyedLine, RasExtension};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

/// Outcome of registering one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Registration {
    /// Line inserted at this index
    Inserted {
        /// Index of the new line
        line: usize,
    },
    /// Identical line already present
    AlreadyPresent,
    /// No line with the same key to insert after
    MissingAnchor,
}

/// Insert `{key}{value}` after the last line carrying `key`
///
/// Nothing is inserted when an identical line exists (surrounding
/// whitespace ignored) or when no line carries `key`.
pub fn register_entry(file: &mut ConfigFile, key: &str, value: &str) -> Registration {
    let key = keys::normalize(key);
    let entry = format!("{key}{value}");
    if file.contains_line(&entry) {
        return Registration::AlreadyPresent;
    }
    match file.last_key(&key) {
        Some(anchor) => {
            file.insert_line(anchor + 1, entry);
            Registration::Inserted { line: anchor + 1 }
        }
        None => Registration::MissingAnchor,
    }
}

/// Register derived files in the project file at `project`
///
/// Each extension goes under its role's project key. The file is only
/// rewritten when at least one line was inserted.
///
/// # Errors
/// Returns [`EditError::Io`] if the project cannot be read or written
pub fn register_files(
    project: impl AsRef<Path>,
    extensions: &[RasExtension],
    policy: &NumberingPolicy,
) -> EditResult<Vec<(RasExtension, Registration)>> {
    let project = project.as_ref();
    let mut file = read_config(project)?;

    let mut outcomes = Vec::with_capacity(extensions.len());
    for &extension in extensions {
        let key = extension.role().project_key();
        let outcome = register_entry(&mut file, key, &extension.padded(policy.digits));
        match outcome {
            Registration::Inserted { line } => {
                tracing::debug!("{}: registered {} at line {}", project.display(), extension, line + 1);
            }
            Registration::AlreadyPresent => {
                tracing::debug!("{}: {} already registered", project.display(), extension);
            }
            Registration::MissingAnchor => {
                tracing::warn!(
                    "{}: no '{}' line to register {} after, skipped",
                    project.display(),
                    key,
                    extension
                );
            }
        }
        outcomes.push((extension, outcome));
    }

    let inserted = outcomes
        .iter()
        .filter(|(_, outcome)| matches!(outcome, Registration::Inserted { .. }))
        .count();
    if inserted > 0 {
        write_in_place(&file)?;
        tracing::info!("Registered {} file(s) in {}", inserted, project.display());
    }

    Ok(outcomes)
}

/// Stage of a current-plan update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentPlanState {
    /// Project located, no plan chosen yet
    Unset,
    /// Plan file confirmed to exist
    Validated,
    /// Project file saved
    Written,
}

impl Display for CurrentPlanState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unset => "unset",
            Self::Validated => "validated",
            Self::Written => "written",
        })
    }
}

/// Start of a current-plan update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPlanSetter {
    project: PathBuf,
}

impl CurrentPlanSetter {
    /// Target the project file at `project`
    ///
    /// # Errors
    /// Returns [`EditError::Io`] (not found) if the project file is missing
    pub fn new(project: impl Into<PathBuf>) -> EditResult<Self> {
        let project = project.into();
        if !project.is_file() {
            let source = std::io::Error::new(std::io::ErrorKind::NotFound, "project file not found");
            return Err(EditError::io(&project, source));
        }
        Ok(Self { project })
    }

    /// Project file
    #[inline]
    #[must_use]
    pub fn project(&self) -> &Path {
        &self.project
    }

    /// Current stage
    #[inline]
    #[must_use]
    pub fn state(&self) -> CurrentPlanState {
        CurrentPlanState::Unset
    }

    /// Confirm that `plan` exists next to the project
    ///
    /// # Errors
    /// - [`EditError::WrongRole`] if `plan` is not a plan extension
    /// - [`EditError::PlanNotFound`] if no file carries it
    /// - allocator listing errors
    pub fn validate<A: SequenceAllocator>(
        self,
        plan: RasExtension,
        allocator: &A,
    ) -> EditResult<ValidatedPlan> {
        if plan.role() != FileRole::Plan {
            return Err(EditError::WrongRole {
                path: self.project,
                expected: FileRole::Plan,
                found: plan.role(),
            });
        }

        if !allocator.contains(plan)? {
            let directory = project_dir(&self.project)?;
            tracing::warn!("Plan {} not found in {}", plan, directory.display());
            return Err(EditError::PlanNotFound {
                extension: plan,
                directory,
            });
        }

        Ok(ValidatedPlan {
            project: self.project,
            plan,
        })
    }
}

/// Plan confirmed to exist, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPlan {
    project: PathBuf,
    plan: RasExtension,
}

impl ValidatedPlan {
    /// Project file
    #[inline]
    #[must_use]
    pub fn project(&self) -> &Path {
        &self.project
    }

    /// Chosen plan
    #[inline]
    #[must_use]
    pub fn plan(&self) -> RasExtension {
        self.plan
    }

    /// Current stage
    #[inline]
    #[must_use]
    pub fn state(&self) -> CurrentPlanState {
        CurrentPlanState::Validated
    }

    /// Rewrite the project's `Current Plan=` line
    ///
    /// A project without that line is left untouched (`changed == false`).
    ///
    /// # Errors
    /// Returns [`EditError::Io`] if the project cannot be read or written
    pub fn write(self, digits: usize) -> EditResult<WrittenPlan> {
        let mut file = read_config(&self.project)?;
        let value = self.plan.padded(digits);

        let changed = match file.find_key(keys::CURRENT_PLAN) {
            Some(index) => {
                let old = file.line(index).unwrap_or_default();
                let patched = KeyedLine::parse(old, keys::CURRENT_PLAN)
                    .map(|line| line.with_value(&value));
                match patched {
                    Some(patched) if patched != old => {
                        file.set_line(index, patched);
                        write_in_place(&file)?;
                        tracing::info!(
                            "Current plan of {} set to {}",
                            self.project.display(),
                            value
                        );
                        true
                    }
                    _ => false,
                }
            }
            None => {
                tracing::warn!(
                    "{} has no '{}' line, left unchanged",
                    self.project.display(),
                    keys::CURRENT_PLAN
                );
                false
            }
        };

        Ok(WrittenPlan {
            project: self.project,
            plan: self.plan,
            changed,
        })
    }
}

/// Result of a current-plan update
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenPlan {
    /// Project file
    pub project: PathBuf,
    /// Selected plan
    pub plan: RasExtension,
    /// Whether the project file content changed
    pub changed: bool,
}

impl WrittenPlan {
    /// Current stage
    #[inline]
    #[must_use]
    pub fn state(&self) -> CurrentPlanState {
        CurrentPlanState::Written
    }
}

/// Validate `plan` and make it the project's current plan
///
/// # Errors
/// See [`CurrentPlanSetter::new`], [`CurrentPlanSetter::validate`] and
/// [`ValidatedPlan::write`]
pub fn set_current_plan<A: SequenceAllocator>(
    project: impl Into<PathBuf>,
    plan: RasExtension,
    allocator: &A,
    policy: &NumberingPolicy,
) -> EditResult<WrittenPlan> {
    CurrentPlanSetter::new(project)?
        .validate(plan, allocator)?
        .write(policy.digits)
}
