//! In-memory version control for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use platgen_core::{
    application::{ApplicationError, ports::VersionControl},
    error::PlatgenResult,
};

/// Tracks initialized roots and commit messages. Clones share state.
#[derive(Debug, Clone)]
pub struct MemoryVersionControl {
    available: bool,
    state: Arc<Mutex<State>>,
}

#[derive(Debug, Default)]
struct State {
    initialized: HashSet<PathBuf>,
    commits: HashMap<PathBuf, Vec<String>>,
}

impl MemoryVersionControl {
    pub fn new() -> Self {
        Self {
            available: true,
            state: Arc::default(),
        }
    }

    /// A tool that is not installed.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Commit messages recorded for `root`, oldest first.
    pub fn commits(&self, root: &Path) -> Vec<String> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.commits.get(root).cloned())
            .unwrap_or_default()
    }

    fn state(&self) -> PlatgenResult<std::sync::MutexGuard<'_, State>> {
        Ok(self
            .state
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

impl Default for MemoryVersionControl {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for MemoryVersionControl {
    fn tool(&self) -> &'static str {
        "git"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn is_initialized(&self, root: &Path) -> bool {
        self.state
            .lock()
            .map(|state| state.initialized.contains(root))
            .unwrap_or(false)
    }

    fn init(&self, root: &Path) -> PlatgenResult<()> {
        self.state()?.initialized.insert(root.to_path_buf());
        Ok(())
    }

    fn add_all(&self, root: &Path) -> PlatgenResult<()> {
        if !self.is_initialized(root) {
            return Err(ApplicationError::VersionControl {
                command: "git add -A".into(),
                reason: format!("{} is not a repository", root.display()),
            }
            .into());
        }
        Ok(())
    }

    fn commit(&self, root: &Path, message: &str) -> PlatgenResult<()> {
        self.state()?
            .commits
            .entry(root.to_path_buf())
            .or_default()
            .push(message.to_string());
        Ok(())
    }
}
