//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `platgen-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateClient`: Remote project generation
//!   - `ArchiveExtractor`: Unpacking generated projects
//!   - `VersionControl`: Repository bootstrap
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{ArchiveExtractor, Filesystem, TemplateClient, VersionControl};

#[cfg(test)]
pub use output::{MockArchiveExtractor, MockFilesystem, MockTemplateClient, MockVersionControl};
