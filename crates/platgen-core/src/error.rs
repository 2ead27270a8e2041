//! Unified error handling for platgen core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for platgen core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlatgenError {
    /// Errors from the domain layer (configuration and model violations).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and I/O failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl PlatgenError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Status code of a failed generation request, if that is what this is.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Application(ApplicationError::Network { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    /// A required external tool or resource is absent.
    NotFound,
    /// The remote generation service failed.
    Remote,
    Internal,
}

/// Convenient result type alias.
pub type PlatgenResult<T> = Result<T, PlatgenError>;
