//! Applies a service's entry-point patches on disk.

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ports::Filesystem,
        report::{PatchResult, PipelineWarning},
    },
    domain::{GeneratedProject, PatchOutcome, ServiceSpec},
    error::PlatgenResult,
};

pub struct SourcePatcher<'a> {
    filesystem: &'a dyn Filesystem,
}

impl<'a> SourcePatcher<'a> {
    pub fn new(filesystem: &'a dyn Filesystem) -> Self {
        Self { filesystem }
    }

    /// Apply every patch of `spec`, in declaration order, to the sources of
    /// `project`.
    ///
    /// A missing target file or anchor skips that patch with a warning.
    /// I/O failures are fatal.
    #[instrument(skip_all, fields(service = %spec.name()))]
    pub fn patch(
        &self,
        spec: &ServiceSpec,
        project: &GeneratedProject,
    ) -> PlatgenResult<PatchResult> {
        let mut result = PatchResult::default();

        for op in spec.patches() {
            let path = project.resolve(op.target());

            if !self.filesystem.exists(&path) {
                warn!(path = %path.display(), "Patch target missing");
                push_once(
                    &mut result.warnings,
                    PipelineWarning::PatchTargetMissing {
                        service: spec.name().to_string(),
                        path,
                    },
                );
                continue;
            }

            let source = self.filesystem.read_to_string(&path)?;
            match op.apply(&source) {
                PatchOutcome::Applied(patched) => {
                    self.filesystem.write_file(&path, &patched)?;
                    debug!(line = op.text(), "Inserted");
                    result.applied += 1;
                }
                PatchOutcome::AlreadyPresent => {
                    debug!(line = op.text(), "Already present");
                    result.already_present += 1;
                }
                PatchOutcome::AnchorNotFound => {
                    warn!(path = %path.display(), anchor = ?op.anchor(), "Anchor not found");
                    push_once(
                        &mut result.warnings,
                        PipelineWarning::PatchAnchorMissing {
                            service: spec.name().to_string(),
                            path,
                        },
                    );
                }
            }
        }

        Ok(result)
    }
}

// Both patches of a capability share a target; report a missing file once.
fn push_once(warnings: &mut Vec<PipelineWarning>, warning: PipelineWarning) {
    if !warnings.contains(&warning) {
        warnings.push(warning);
    }
}
