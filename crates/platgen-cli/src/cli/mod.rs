//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases
//! and help text. No business logic lives here: every value is forwarded
//! as a string and validated after all configuration sources are merged.

use std::path::PathBuf;

use clap::Parser;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "platgen",
    bin_name = "platgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold a Spring Cloud microservice platform",
    long_about = "platgen generates a discovery server, an API gateway and a \
                  config server through Spring Initializr, enables their \
                  Spring Cloud capabilities, adds Dockerfiles and a README, \
                  and records everything in an initial git commit.",
    after_help = "CONFIGURATION (lowest to highest precedence):\n\
        \x20 built-in defaults < environment (BUILD_TOOL, ROOT_DIR, GROUP_ID,\n\
        \x20 JAVA_VERSION, BOOT_VERSION, INITIALIZR_URL) < --config file < flags\n\n\
        EXAMPLES:\n\
        \x20 platgen\n\
        \x20 platgen -b gradle -g com.acme -v 21 -o acme-platform\n\
        \x20 platgen -c platform.env --output-format json",
)]
pub struct Cli {
    /// Build tool of every generated service.
    #[arg(
        short = 'b',
        long = "build-tool",
        value_name = "maven|gradle",
        help = "Build tool (maven or gradle)"
    )]
    pub build_tool: Option<String>,

    /// Group id; also the base package.
    #[arg(short = 'g', long = "group-id", value_name = "ID", help = "Group id")]
    pub group_id: Option<String>,

    /// Java release the services target.
    #[arg(
        short = 'v',
        long = "java-version",
        value_name = "N",
        help = "Java version"
    )]
    pub java_version: Option<String>,

    /// Output root.
    #[arg(
        short = 'o',
        long = "out-dir",
        value_name = "PATH",
        help = "Output root directory"
    )]
    pub out_dir: Option<PathBuf>,

    /// `KEY=VALUE` override file.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Key/value override file"
    )]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub global: GlobalArgs,
}
