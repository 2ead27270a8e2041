//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule errors are `DomainError` from `crate::domain`.
//! Every variant here is fatal: the pipeline stops at the first one.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during pipeline orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A required external tool is not installed.
    #[error("required tool '{tool}' was not found on PATH")]
    MissingDependency { tool: String },

    /// The generation service answered with a non-success status.
    #[error("generation of '{service}' failed with HTTP {status}: {body}")]
    Network {
        service: String,
        status: u16,
        body: String,
    },

    /// The generation service could not be reached at all.
    #[error("generation service unreachable for '{service}': {reason}")]
    Transport { service: String, reason: String },

    /// A downloaded archive could not be unpacked.
    #[error("archive {path} could not be extracted: {reason}")]
    Archive { path: PathBuf, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A version-control command failed.
    #[error("`{command}` failed: {reason}")]
    VersionControl { command: String, reason: String },

    /// An in-memory adapter's lock was poisoned.
    #[error("adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingDependency { tool } => vec![
                format!("Install {tool} and make sure it is on your PATH"),
                format!("Check with: {tool} --version"),
            ],
            Self::Network { status, .. } if *status >= 500 => vec![
                "The generation service reported an internal error".into(),
                "Try again later, or point INITIALIZR_URL at another instance".into(),
            ],
            Self::Network { .. } => vec![
                "The generation service rejected the request".into(),
                "Check BOOT_VERSION and JAVA_VERSION against the versions it supports".into(),
                "The response body above usually names the offending parameter".into(),
            ],
            Self::Transport { .. } => vec![
                "Check your network connection".into(),
                "Verify INITIALIZR_URL points at a reachable service".into(),
            ],
            Self::Archive { .. } => vec![
                "The service returned something that is not a zip archive".into(),
                "Verify INITIALIZR_URL points at a Spring Initializr compatible service".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::VersionControl { .. } => vec![
                "Check the git output above".into(),
                "Make sure git user.name and user.email are configured".into(),
            ],
            Self::LockPoisoned => vec!["This is likely a bug, please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDependency { .. } => ErrorCategory::NotFound,
            Self::Network { .. } | Self::Transport { .. } => ErrorCategory::Remote,
            Self::Archive { .. } => ErrorCategory::Remote,
            Self::FilesystemError { .. } | Self::VersionControl { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
        }
    }
}
