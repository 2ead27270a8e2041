//! Outcome of a scaffolding run.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::GeneratedProject;

/// A non-fatal condition. The stage that raised it was skipped (fully or in
/// part) and the pipeline carried on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PipelineWarning {
    /// The output root existed before the run.
    WorkspaceAlreadyExists { path: PathBuf },
    /// The entry point to patch was not generated.
    PatchTargetMissing { service: String, path: PathBuf },
    /// The entry point exists but lacks the anchor line.
    PatchAnchorMissing { service: String, path: PathBuf },
    /// A repository already exists, so nothing was committed.
    VersionControlAlreadyInitialized { path: PathBuf },
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkspaceAlreadyExists { path } => {
                write!(f, "output directory {} already exists", path.display())
            }
            Self::PatchTargetMissing { service, path } => write!(
                f,
                "{service}: entry point {} not found, capability patch skipped",
                path.display()
            ),
            Self::PatchAnchorMissing { service, path } => write!(
                f,
                "{service}: no anchor line in {}, capability patch skipped",
                path.display()
            ),
            Self::VersionControlAlreadyInitialized { path } => write!(
                f,
                "{} is already a repository, initial commit skipped",
                path.display()
            ),
        }
    }
}

/// Per-service patch accounting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchResult {
    pub applied: usize,
    pub already_present: usize,
    pub warnings: Vec<PipelineWarning>,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub projects: Vec<GeneratedProject>,
    pub patches_applied: usize,
    pub patches_already_present: usize,
    pub artifacts: Vec<PathBuf>,
    pub committed: bool,
    pub warnings: Vec<PipelineWarning>,
}

impl ScaffoldReport {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            projects: Vec::new(),
            patches_applied: 0,
            patches_already_present: 0,
            artifacts: Vec::new(),
            committed: false,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn record_patches(&mut self, result: PatchResult) {
        self.patches_applied += result.applied;
        self.patches_already_present += result.already_present;
        self.warnings.extend(result.warnings);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
