//! `git` driven through its command line.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use platgen_core::{
    application::{ApplicationError, ports::VersionControl},
    error::PlatgenResult,
};

const GIT: &str = "git";

/// Production [`VersionControl`].
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    identity: Option<(String, String)>,
}

impl GitCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit as `name <email>` instead of the user's configured identity.
    pub fn with_identity(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.identity = Some((name.into(), email.into()));
        self
    }

    fn run(&self, root: &Path, args: &[&str]) -> PlatgenResult<()> {
        let mut command = Command::new(GIT);
        if let Some((name, email)) = &self.identity {
            command
                .arg("-c")
                .arg(format!("user.name={name}"))
                .arg("-c")
                .arg(format!("user.email={email}"));
        }
        command.args(args).current_dir(root).stdin(Stdio::null());

        let rendered = format!("{GIT} {}", args.join(" "));
        debug!(command = %rendered, "Running");

        let output = command.output().map_err(|e| ApplicationError::VersionControl {
            command: rendered.clone(),
            reason: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ApplicationError::VersionControl {
                command: rendered,
                reason: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            }
            .into());
        }
        Ok(())
    }
}

impl VersionControl for GitCli {
    fn tool(&self) -> &'static str {
        GIT
    }

    fn is_available(&self) -> bool {
        Command::new(GIT)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|status| status.success())
    }

    fn is_initialized(&self, root: &Path) -> bool {
        root.join(".git").exists()
    }

    #[instrument(skip(self))]
    fn init(&self, root: &Path) -> PlatgenResult<()> {
        self.run(root, &["init", "--quiet"])
    }

    #[instrument(skip(self))]
    fn add_all(&self, root: &Path) -> PlatgenResult<()> {
        self.run(root, &["add", "-A"])
    }

    #[instrument(skip(self))]
    fn commit(&self, root: &Path, message: &str) -> PlatgenResult<()> {
        self.run(root, &["commit", "--quiet", "-m", message])
    }
}
