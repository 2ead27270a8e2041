//! Output-root skeleton and repository bootstrap.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ports::{Filesystem, VersionControl},
        report::PipelineWarning,
    },
    domain::{ArtifactGenerator, Configuration},
    error::PlatgenResult,
};

/// Directories created under every output root.
pub const SKELETON: [&str; 5] = ["services", "common", "infra", "deploy/docker", "deploy/k8s"];

/// What [`WorkspaceInitializer::finalize`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    pub ignore_file: PathBuf,
    pub committed: bool,
    pub warning: Option<PipelineWarning>,
}

pub struct WorkspaceInitializer<'a> {
    filesystem: &'a dyn Filesystem,
    vcs: &'a dyn VersionControl,
}

impl<'a> WorkspaceInitializer<'a> {
    pub fn new(filesystem: &'a dyn Filesystem, vcs: &'a dyn VersionControl) -> Self {
        Self { filesystem, vcs }
    }

    /// Create the skeleton. An existing root is reused with a warning.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn prepare(&self, root: &Path) -> PlatgenResult<Option<PipelineWarning>> {
        let warning = if self.filesystem.exists(root) {
            warn!("Output directory already exists, reusing it");
            Some(PipelineWarning::WorkspaceAlreadyExists {
                path: root.to_path_buf(),
            })
        } else {
            None
        };

        for dir in SKELETON {
            self.filesystem.create_dir_all(&root.join(dir))?;
        }
        info!(directories = SKELETON.len(), "Workspace prepared");

        Ok(warning)
    }

    /// Write the ignore rules and record the initial commit.
    ///
    /// A root that is already a repository is left alone.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn finalize(&self, root: &Path, config: &Configuration) -> PlatgenResult<Finalized> {
        let ignore_file = root.join(".gitignore");
        self.filesystem
            .write_file(&ignore_file, &ArtifactGenerator::gitignore(config))?;

        if self.vcs.is_initialized(root) {
            warn!(tool = self.vcs.tool(), "Repository already present, skipping commit");
            return Ok(Finalized {
                ignore_file,
                committed: false,
                warning: Some(PipelineWarning::VersionControlAlreadyInitialized {
                    path: root.to_path_buf(),
                }),
            });
        }

        self.vcs.init(root)?;
        self.vcs.add_all(root)?;
        let message = commit_message(config);
        self.vcs.commit(root, &message)?;
        info!(%message, "Initial commit recorded");

        Ok(Finalized {
            ignore_file,
            committed: true,
            warning: None,
        })
    }
}

pub fn commit_message(config: &Configuration) -> String {
    format!(
        "Initial platform scaffold (Java {}, {})",
        config.java_version(),
        config.build_tool()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockFilesystem, MockVersionControl},
        domain::{ConfigKey, ConfigLayer, ConfigResolver},
    };
    use mockall::{Sequence, predicate::eq};

    fn config() -> Configuration {
        ConfigResolver::resolve(
            ConfigLayer::defaults(),
            ConfigLayer::new(),
            None,
            ConfigLayer::new()
                .with(ConfigKey::RootDir, "/out")
                .with(ConfigKey::BuildTool, "gradle")
                .with(ConfigKey::JavaVersion, "21"),
        )
        .unwrap()
    }

    #[test]
    fn fresh_root_gets_full_skeleton() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all()
            .withf(|p| SKELETON.iter().any(|d| p == Path::new("/out").join(d)))
            .times(SKELETON.len())
            .returning(|_| Ok(()));
        let vcs = MockVersionControl::new();

        let warning = WorkspaceInitializer::new(&fs, &vcs)
            .prepare(Path::new("/out"))
            .unwrap();
        assert_eq!(warning, None);
    }

    #[test]
    fn existing_root_is_reused_with_warning() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let vcs = MockVersionControl::new();

        let warning = WorkspaceInitializer::new(&fs, &vcs)
            .prepare(Path::new("/out"))
            .unwrap();
        assert!(matches!(
            warning,
            Some(PipelineWarning::WorkspaceAlreadyExists { .. })
        ));
    }

    #[test]
    fn finalize_commits_once_in_order() {
        let cfg = config();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file()
            .withf(|p, content| p == Path::new("/out/.gitignore") && content.contains("build/"))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut seq = Sequence::new();
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_initialized().return_const(false);
        vcs.expect_init()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_add_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        vcs.expect_commit()
            .with(
                eq(Path::new("/out")),
                eq("Initial platform scaffold (Java 21, gradle)"),
            )
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let finalized = WorkspaceInitializer::new(&fs, &vcs)
            .finalize(cfg.root_dir(), &cfg)
            .unwrap();
        assert!(finalized.committed);
        assert_eq!(finalized.warning, None);
    }

    #[test]
    fn existing_repository_is_not_committed_to() {
        let cfg = config();
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().returning(|_, _| Ok(()));
        let mut vcs = MockVersionControl::new();
        vcs.expect_is_initialized().return_const(true);
        vcs.expect_tool().return_const("git");
        vcs.expect_init().never();
        vcs.expect_commit().never();

        let finalized = WorkspaceInitializer::new(&fs, &vcs)
            .finalize(cfg.root_dir(), &cfg)
            .unwrap();
        assert!(!finalized.committed);
        assert!(matches!(
            finalized.warning,
            Some(PipelineWarning::VersionControlAlreadyInitialized { .. })
        ));
    }
}
