// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for platgen.
//!
//! This module contains pure business logic with no I/O. Network, filesystem
//! and version-control concerns are handled via ports (traits) defined in
//! the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Explicit configuration**: nothing reads process-wide state
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//!
// Public API - what the world sees
pub mod artifacts;
pub mod config;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use artifacts::ArtifactGenerator;
pub use config::{ConfigKey, ConfigLayer, ConfigResolver, Configuration};
pub use entities::{
    Anchor, Capability, GeneratedProject, GenerationRequest, InsertPosition, PatchOperation,
    PatchOutcome, ServiceName, ServiceSpec, platform_services,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
pub use value_objects::BuildTool;
