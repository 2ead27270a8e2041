//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `platgen-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::GenerationRequest;
use crate::error::PlatgenResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `platgen_adapters::filesystem::LocalFilesystem` (production)
/// - `platgen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PlatgenResult<()>;

    /// Write text content to a file, replacing it.
    fn write_file(&self, path: &Path, content: &str) -> PlatgenResult<()>;

    /// Write raw bytes to a file, replacing it.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> PlatgenResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> PlatgenResult<String>;

    /// Read a whole file as bytes.
    fn read_bytes(&self, path: &Path) -> PlatgenResult<Vec<u8>>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> PlatgenResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> PlatgenResult<()>;
}

/// Port for the remote project-generation service.
///
/// Implemented by:
/// - `platgen_adapters::http::InitializrClient` (production, blocking HTTP)
/// - `platgen_adapters::http::CannedTemplateClient` (testing, in-memory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateClient: Send + Sync {
    /// Perform one generation request and return the archive bytes.
    ///
    /// A non-success answer must be reported as
    /// `ApplicationError::Network` carrying the status and body.
    fn fetch(&self, request: &GenerationRequest) -> PlatgenResult<Vec<u8>>;
}

/// Port for unpacking a downloaded project archive.
///
/// Implemented by:
/// - `platgen_adapters::archive::ZipExtractor`
#[cfg_attr(test, mockall::automock)]
pub trait ArchiveExtractor: Send + Sync {
    /// Extract `archive` into `destination`, creating it if needed.
    fn extract(&self, archive: &Path, destination: &Path) -> PlatgenResult<()>;
}

/// Port for version control.
///
/// Implemented by:
/// - `platgen_adapters::vcs::GitCli` (production, shells out to `git`)
/// - `platgen_adapters::vcs::MemoryVersionControl` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl: Send + Sync {
    /// Name of the underlying tool, for diagnostics.
    fn tool(&self) -> &'static str;

    /// Whether the tool can be used at all.
    fn is_available(&self) -> bool;

    /// Whether `root` already carries a repository marker.
    fn is_initialized(&self, root: &Path) -> bool;

    /// Create an empty repository at `root`.
    fn init(&self, root: &Path) -> PlatgenResult<()>;

    /// Stage the entire tree under `root`.
    fn add_all(&self, root: &Path) -> PlatgenResult<()>;

    /// Record one commit of everything staged.
    fn commit(&self, root: &Path, message: &str) -> PlatgenResult<()>;
}
