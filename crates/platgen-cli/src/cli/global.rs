//! Global presentation and logging arguments.
//!
//! Declared here and flattened into [`super::Cli`]. Verbosity is long-only
//! because `-v` selects the Java version.

use clap::Args;

/// Flags that shape output, never the generated platform.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO, twice for DEBUG, three times for TRACE.
    /// Conflicts with `--quiet`.
    #[arg(
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (repeat for more)",
        long_help = "Increase logging verbosity:
    (none)              - Only warnings and errors
    --verbose           - Info level (stage progress)
    --verbose --verbose - Debug level (requests, patches)
    three or more       - Trace level"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>). Any value other than an empty or
    /// falsey one (`0`, `false`, `no`, `off`) turns colour off.
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Machine-readable output format.
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
    /// JSON report on stdout.
    Json,
}
