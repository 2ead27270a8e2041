//! Application layer for platgen.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService and its stages)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Report**: What a run produced, including non-fatal warnings
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{ProjectGenerator, ScaffoldService, SourcePatcher, WorkspaceInitializer};

// Re-export port traits (for adapter implementation)
pub use ports::{ArchiveExtractor, Filesystem, TemplateClient, VersionControl};

pub use error::ApplicationError;
pub use report::{PatchResult, PipelineWarning, ScaffoldReport};
