//! platgen core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the platgen
//! Spring Cloud platform scaffolder, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           platgen-cli (CLI)             │
//! │   (argument parsing, config sources)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (ScaffoldService → generate, patch,     │
//! │  artifacts, workspace)                  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (TemplateClient, ArchiveExtractor,      │
//! │  Filesystem, VersionControl)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   platgen-adapters (Infrastructure)     │
//! │ (InitializrClient, ZipExtractor, GitCli)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Configuration, ServiceSpec, patches,   │
//! │  artifact rendering)                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use platgen_core::prelude::*;
//!
//! let config = ConfigResolver::resolve(
//!     ConfigLayer::defaults(),
//!     ConfigLayer::new(),
//!     None,
//!     ConfigLayer::new().with(ConfigKey::BuildTool, "gradle"),
//! )?;
//!
//! let service = ScaffoldService::new(client, extractor, filesystem, vcs);
//! let report = service.run(&config)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, PipelineWarning, ScaffoldReport, ScaffoldService,
        ports::{ArchiveExtractor, Filesystem, TemplateClient, VersionControl},
    };
    pub use crate::domain::{
        BuildTool, ConfigKey, ConfigLayer, ConfigResolver, Configuration, GenerationRequest,
        ServiceSpec, platform_services,
    };
    pub use crate::error::{PlatgenError, PlatgenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
