//! The scaffold run: the binary's only command.
//!
//! Responsibility: wire the production adapters into the core
//! `ScaffoldService`, run it, and display the report. No business logic
//! lives here.

use tracing::{info, instrument};

use platgen_adapters::{GitCli, InitializrClient, LocalFilesystem, ZipExtractor};
use platgen_core::{
    application::{ScaffoldReport, ScaffoldService},
    domain::Configuration,
};

use crate::{cli::OutputFormat, error::CliResult, output::OutputManager};

/// The pipeline wired to the real network, disk and `git`.
pub fn service() -> CliResult<ScaffoldService> {
    Ok(ScaffoldService::new(
        Box::new(InitializrClient::new()?),
        Box::new(ZipExtractor::new(LocalFilesystem::new())),
        Box::new(LocalFilesystem::new()),
        Box::new(GitCli::new()),
    ))
}

/// Run `service` for `config` and display the report.
#[instrument(skip_all, fields(root = %config.root_dir().display()))]
pub fn execute(
    service: &ScaffoldService,
    config: &Configuration,
    output: &OutputManager,
) -> CliResult<()> {
    if output.format() != OutputFormat::Json {
        output.header(&format!(
            "Scaffolding Spring Cloud platform in {}",
            config.root_dir().display()
        ))?;
        output.info(&format!(
            "{} · Java {} · Spring Boot {} · {}",
            config.build_tool(),
            config.java_version(),
            config.boot_version(),
            config.group_id()
        ))?;
    }

    let spinner = output.spinner("Generating services...");
    let result = service.run(config);
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let report = result?;
    info!(services = report.projects.len(), "Platform scaffolded");

    if output.format() == OutputFormat::Json {
        return output.json(&report);
    }
    render(&report, config, output)
}

fn render(report: &ScaffoldReport, config: &Configuration, output: &OutputManager) -> CliResult<()> {
    for project in &report.projects {
        output.success(&format!(
            "{} generated at {}",
            project.service(),
            project.root().display()
        ))?;
    }
    output.success(&format!(
        "{} capability patches applied, {} artifacts written",
        report.patches_applied,
        report.artifacts.len()
    ))?;
    if report.committed {
        output.success("Initial commit recorded")?;
    }

    for warning in &report.warnings {
        output.warning(&warning.to_string())?;
    }

    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", config.root_dir().display()))?;
    output.print("  cat README.md")?;

    Ok(())
}
