//! Remote generation and materialization of one service project.

use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{ArchiveExtractor, Filesystem, TemplateClient},
    domain::{Configuration, GeneratedProject, GenerationRequest, ServiceSpec},
    error::PlatgenResult,
};

/// Drives the [`TemplateClient`] for one service and unpacks the result
/// into the output root.
pub struct ProjectGenerator<'a> {
    client: &'a dyn TemplateClient,
    extractor: &'a dyn ArchiveExtractor,
    filesystem: &'a dyn Filesystem,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(
        client: &'a dyn TemplateClient,
        extractor: &'a dyn ArchiveExtractor,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            client,
            extractor,
            filesystem,
        }
    }

    /// Generate `spec` and return the unpacked project.
    ///
    /// The temporary archive is removed whether extraction succeeds or not.
    #[instrument(skip_all, fields(service = %spec.name()))]
    pub fn generate(
        &self,
        spec: &ServiceSpec,
        config: &Configuration,
    ) -> PlatgenResult<GeneratedProject> {
        let request = GenerationRequest::new(spec, config);
        debug!(
            project_type = request.project_type,
            package = %request.package_name,
            dependencies = %request.dependencies.join(","),
            "Requesting project"
        );

        let archive = self.client.fetch(&request)?;
        info!(bytes = archive.len(), "Archive received");

        let root = config.root_dir();
        let archive_path = temp_archive_path(root, spec);

        let written = self.filesystem.write_bytes(&archive_path, &archive);
        let extracted = written.and_then(|()| self.extractor.extract(&archive_path, root));
        self.discard(&archive_path);
        extracted?;

        let project = GeneratedProject::new(spec.name().as_str(), root.join(spec.name().as_str()));
        info!(path = %project.root().display(), "Project extracted");
        Ok(project)
    }

    fn discard(&self, archive_path: &std::path::Path) {
        if !self.filesystem.exists(archive_path) {
            return;
        }
        if let Err(e) = self.filesystem.remove_file(archive_path) {
            warn!(
                error = %e,
                path = %archive_path.display(),
                "Could not remove temporary archive"
            );
        }
    }
}

fn temp_archive_path(root: &std::path::Path, spec: &ServiceSpec) -> PathBuf {
    root.join(format!(".{}.zip", spec.name()))
}
