//! Infrastructure adapters for platgen.
//!
//! This crate implements the ports defined in `platgen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod archive;
pub mod filesystem;
pub mod http;
pub mod vcs;

// Re-export commonly used adapters
pub use archive::ZipExtractor;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::{CannedTemplateClient, InitializrClient};
pub use vcs::{GitCli, MemoryVersionControl};
