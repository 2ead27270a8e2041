//! Scaffold Service - main application orchestrator.
//!
//! This service drives the whole pipeline:
//! 1. Preflight (version control available)
//! 2. Prepare the workspace skeleton
//! 3. Generate and patch each service
//! 4. Write container files, config-server descriptor and summary
//! 5. Finalize the workspace (ignore rules, initial commit)
//!
//! The first fatal error stops the run. Nothing already written is rolled
//! back.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{ArchiveExtractor, Filesystem, TemplateClient, VersionControl},
        report::ScaffoldReport,
        services::{
            project_generator::ProjectGenerator, source_patcher::SourcePatcher,
            workspace_initializer::WorkspaceInitializer,
        },
    },
    domain::{
        ArtifactGenerator, Configuration, DomainValidator as validator, ServiceSpec,
        entities::service::CONFIG_SERVER, platform_services,
    },
    error::PlatgenResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    client: Box<dyn TemplateClient>,
    extractor: Box<dyn ArchiveExtractor>,
    filesystem: Box<dyn Filesystem>,
    vcs: Box<dyn VersionControl>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use platgen_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     Box::new(client),     // impl TemplateClient
    ///     Box::new(extractor),  // impl ArchiveExtractor
    ///     Box::new(filesystem), // impl Filesystem
    ///     Box::new(vcs),        // impl VersionControl
    /// );
    /// let report = service.run(&configuration)?;
    /// ```
    pub fn new(
        client: Box<dyn TemplateClient>,
        extractor: Box<dyn ArchiveExtractor>,
        filesystem: Box<dyn Filesystem>,
        vcs: Box<dyn VersionControl>,
    ) -> Self {
        Self {
            client,
            extractor,
            filesystem,
            vcs,
        }
    }

    /// Scaffold the platform described by `config`.
    pub fn run(&self, config: &Configuration) -> PlatgenResult<ScaffoldReport> {
        self.run_at(config, Utc::now())
    }

    /// Same as [`run`](Self::run) with a fixed summary timestamp.
    #[instrument(
        skip_all,
        fields(
            root = %config.root_dir().display(),
            build_tool = %config.build_tool(),
            java = config.java_version()
        )
    )]
    pub fn run_at(
        &self,
        config: &Configuration,
        generated_at: DateTime<Utc>,
    ) -> PlatgenResult<ScaffoldReport> {
        self.preflight()?;

        let services = platform_services(config)?;
        validator::validate_services(&services)?;

        let root = config.root_dir();
        let mut report = ScaffoldReport::new(root);
        let workspace = WorkspaceInitializer::new(self.filesystem.as_ref(), self.vcs.as_ref());
        report.warnings.extend(workspace.prepare(root)?);

        let generator = ProjectGenerator::new(
            self.client.as_ref(),
            self.extractor.as_ref(),
            self.filesystem.as_ref(),
        );
        let patcher = SourcePatcher::new(self.filesystem.as_ref());
        for spec in &services {
            let project = generator.generate(spec, config)?;
            report.record_patches(patcher.patch(spec, &project)?);
            report.projects.push(project);
        }

        self.write_artifacts(config, &services, generated_at, &mut report)?;

        let finalized = workspace.finalize(root, config)?;
        report.artifacts.push(finalized.ignore_file);
        report.committed = finalized.committed;
        report.warnings.extend(finalized.warning);

        info!(
            services = report.projects.len(),
            patches = report.patches_applied,
            warnings = report.warnings.len(),
            "Scaffold completed"
        );
        Ok(report)
    }

    /// Fail with `MissingDependency` unless the version-control tool can
    /// be run. [`run`](Self::run) repeats the check; callers may run it
    /// earlier, before resolving configuration.
    pub fn preflight(&self) -> PlatgenResult<()> {
        if !self.vcs.is_available() {
            return Err(ApplicationError::MissingDependency {
                tool: self.vcs.tool().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn write_artifacts(
        &self,
        config: &Configuration,
        services: &[ServiceSpec],
        generated_at: DateTime<Utc>,
        report: &mut ScaffoldReport,
    ) -> PlatgenResult<()> {
        let root = config.root_dir();

        let dockerfile = ArtifactGenerator::dockerfile(config);
        for project in &report.projects {
            let path = project.root().join("Dockerfile");
            self.filesystem.write_file(&path, &dockerfile)?;
            report.artifacts.push(path);
        }

        let repo = root.join(CONFIG_SERVER).join("config-repo");
        self.filesystem.create_dir_all(&repo)?;
        let descriptor = repo.join("application.yml");
        self.filesystem
            .write_file(&descriptor, &ArtifactGenerator::config_server_descriptor())?;
        report.artifacts.push(descriptor);

        let readme = root.join("README.md");
        self.filesystem.write_file(
            &readme,
            &ArtifactGenerator::summary(config, services, generated_at),
        )?;
        report.artifacts.push(readme);

        info!(count = report.artifacts.len(), "Artifacts written");
        Ok(())
    }
}
