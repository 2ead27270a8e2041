// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig { key: &'static str, reason: String },

    #[error("could not read configuration file '{path}': {reason}")]
    UnreadableConfigFile { path: String, reason: String },

    // ========================================================================
    // Model Errors
    // ========================================================================
    #[error("invalid service name '{name}': {reason}")]
    InvalidServiceName { name: String, reason: String },

    #[error("invalid patch for '{target}': {reason}")]
    InvalidPatch { target: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidConfig { key, .. } if *key == "BUILD_TOOL" => vec![
                "Supported build tools:".into(),
                "  • maven   - Apache Maven (target/*.jar)".into(),
                "  • gradle  - Gradle (build/libs/*.jar)".into(),
                "Set it with -b/--build-tool, BUILD_TOOL=..., or the config file".into(),
            ],
            Self::InvalidConfig { key, .. } => vec![
                format!("Check the value given for {key}"),
                "Values resolve as: defaults < environment < config file < flags".into(),
            ],
            Self::UnreadableConfigFile { path, .. } => vec![
                format!("Make sure '{path}' exists and is readable"),
                "The file must contain KEY=VALUE lines, e.g. BUILD_TOOL=gradle".into(),
            ],
            Self::InvalidServiceName { .. } => vec![
                "Service names are kebab-case: lowercase letters, digits and single hyphens"
                    .into(),
                "Examples: discovery-server, api-gateway".into(),
            ],
            Self::InvalidPatch { .. } => vec!["This is likely a bug, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. } | Self::UnreadableConfigFile { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidServiceName { .. } => ErrorCategory::Validation,
            Self::InvalidPatch { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Internal,
}
