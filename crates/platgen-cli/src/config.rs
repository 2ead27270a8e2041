//! Configuration sources.
//!
//! The CLI is the only place that touches process state. It turns the
//! environment, the optional `--config` file and the parsed flags into
//! [`ConfigLayer`]s and hands them to the core resolver.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags
//! 2. `--config` file (`KEY=VALUE` lines)
//! 3. Environment variables (including a `.env` in the working directory)
//! 4. Built-in defaults

use std::path::Path;

use platgen_core::domain::{ConfigKey, ConfigLayer, ConfigResolver, Configuration, DomainError};
use tracing::{debug, instrument};

use crate::cli::Cli;

/// Resolve the run configuration from every source.
#[instrument(skip_all)]
pub fn load<I>(cli: &Cli, environment: I) -> Result<Configuration, DomainError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let environment = ConfigLayer::from_pairs(environment);
    let file = cli.config.as_deref().map(file_layer).transpose()?;
    let flags = flag_layer(cli);
    debug!(
        env_keys = count(&environment),
        file_keys = file.as_ref().map(count),
        flag_keys = count(&flags),
        "Configuration sources collected"
    );

    ConfigResolver::resolve(ConfigLayer::defaults(), environment, file, flags)
}

/// Parse a `KEY=VALUE` override file.
///
/// Quoting, `#` comments and blank lines follow dotenv rules.
pub fn file_layer(path: &Path) -> Result<ConfigLayer, DomainError> {
    let unreadable = |reason: String| DomainError::UnreadableConfigFile {
        path: path.display().to_string(),
        reason,
    };

    let entries = dotenvy::from_path_iter(path).map_err(|e| unreadable(e.to_string()))?;
    let pairs = entries
        .collect::<Result<Vec<(String, String)>, _>>()
        .map_err(|e| unreadable(e.to_string()))?;

    Ok(ConfigLayer::from_pairs(pairs))
}

fn flag_layer(cli: &Cli) -> ConfigLayer {
    let mut layer = ConfigLayer::new();
    if let Some(value) = &cli.build_tool {
        layer.set(ConfigKey::BuildTool, value.as_str());
    }
    if let Some(value) = &cli.group_id {
        layer.set(ConfigKey::GroupId, value.as_str());
    }
    if let Some(value) = &cli.java_version {
        layer.set(ConfigKey::JavaVersion, value.as_str());
    }
    if let Some(value) = &cli.out_dir {
        layer.set(ConfigKey::RootDir, value.to_string_lossy());
    }
    layer
}

fn count(layer: &ConfigLayer) -> usize {
    ConfigKey::ALL
        .iter()
        .filter(|key| layer.get(**key).is_some())
        .count()
}
