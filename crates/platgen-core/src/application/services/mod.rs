//! Application services - orchestrate use cases.
//!
//! `ScaffoldService` is the single use case. The other services are its
//! pipeline stages and are usable on their own.

pub mod project_generator;
pub mod scaffold_service;
pub mod source_patcher;
pub mod workspace_initializer;

pub use project_generator::ProjectGenerator;
pub use scaffold_service::ScaffoldService;
pub use source_patcher::SourcePatcher;
pub use workspace_initializer::{Finalized, SKELETON, WorkspaceInitializer, commit_message};
