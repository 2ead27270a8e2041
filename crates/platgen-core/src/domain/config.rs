//! Layered configuration resolution.
//!
//! A [`Configuration`] is built exactly once from four [`ConfigLayer`]s and
//! is read-only afterwards. Layers are plain data; reading the environment
//! or a file happens in the CLI, never here.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags
//! 2. Key/value config file (only when a path was given)
//! 3. Environment variables
//! 4. Built-in defaults

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::domain::{error::DomainError, value_objects::BuildTool};

// ── Keys ──────────────────────────────────────────────────────────────────────

/// A recognized configuration key.
///
/// Environment variables and config-file entries share these names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    BuildTool,
    RootDir,
    GroupId,
    JavaVersion,
    BootVersion,
    InitializrUrl,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        Self::BuildTool,
        Self::RootDir,
        Self::GroupId,
        Self::JavaVersion,
        Self::BootVersion,
        Self::InitializrUrl,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BuildTool => "BUILD_TOOL",
            Self::RootDir => "ROOT_DIR",
            Self::GroupId => "GROUP_ID",
            Self::JavaVersion => "JAVA_VERSION",
            Self::BootVersion => "BOOT_VERSION",
            Self::InitializrUrl => "INITIALIZR_URL",
        }
    }

    /// Look up a key by its exact name. Unrecognized names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Layer ─────────────────────────────────────────────────────────────────────

/// One source of configuration values. Every field is optional; unset
/// fields fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    build_tool: Option<String>,
    root_dir: Option<String>,
    group_id: Option<String>,
    java_version: Option<String>,
    boot_version: Option<String>,
    initializr_url: Option<String>,
}

impl ConfigLayer {
    /// An empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in defaults. Every key is set.
    pub fn defaults() -> Self {
        Self::new()
            .with(ConfigKey::BuildTool, "maven")
            .with(ConfigKey::RootDir, "spring-platform")
            .with(ConfigKey::GroupId, "com.example")
            .with(ConfigKey::JavaVersion, "17")
            .with(ConfigKey::BootVersion, "3.3.5")
            .with(ConfigKey::InitializrUrl, "https://start.spring.io")
    }

    /// Build a layer from `KEY=VALUE` pairs (environment variables or a
    /// parsed config file). Unrecognized keys are silently ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = Self::new();
        for (name, value) in pairs {
            if let Some(key) = ConfigKey::from_name(name.as_ref()) {
                layer.set(key, value);
            }
        }
        layer
    }

    /// Builder-style [`Self::set`].
    pub fn with(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a key. Blank values are treated as unset.
    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_string())
        };
        *self.slot_mut(key) = value;
    }

    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::BuildTool => self.build_tool.as_deref(),
            ConfigKey::RootDir => self.root_dir.as_deref(),
            ConfigKey::GroupId => self.group_id.as_deref(),
            ConfigKey::JavaVersion => self.java_version.as_deref(),
            ConfigKey::BootVersion => self.boot_version.as_deref(),
            ConfigKey::InitializrUrl => self.initializr_url.as_deref(),
        }
    }

    /// Overlay `higher` on top of `self`; values set in `higher` win.
    pub fn overlay(mut self, higher: ConfigLayer) -> Self {
        for key in ConfigKey::ALL {
            if let Some(value) = higher.get(key) {
                *self.slot_mut(key) = Some(value.to_string());
            }
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        ConfigKey::ALL.iter().all(|k| self.get(*k).is_none())
    }

    fn slot_mut(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key {
            ConfigKey::BuildTool => &mut self.build_tool,
            ConfigKey::RootDir => &mut self.root_dir,
            ConfigKey::GroupId => &mut self.group_id,
            ConfigKey::JavaVersion => &mut self.java_version,
            ConfigKey::BootVersion => &mut self.boot_version,
            ConfigKey::InitializrUrl => &mut self.initializr_url,
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// The validated, immutable run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    build_tool: BuildTool,
    group_id: String,
    java_version: String,
    boot_version: String,
    root_dir: PathBuf,
    initializr_url: String,
}

impl Configuration {
    pub fn build_tool(&self) -> BuildTool {
        self.build_tool
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn java_version(&self) -> &str {
        &self.java_version
    }

    pub fn boot_version(&self) -> &str {
        &self.boot_version
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn initializr_url(&self) -> &str {
        &self.initializr_url
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Merges configuration layers and validates the result.
pub struct ConfigResolver;

impl ConfigResolver {
    /// Merge `defaults < environment < file < cli` and validate.
    ///
    /// The build tool is checked only after every layer has been applied, so
    /// an invalid value in a low layer is fine as long as a higher one fixes it.
    pub fn resolve(
        defaults: ConfigLayer,
        environment: ConfigLayer,
        file: Option<ConfigLayer>,
        cli: ConfigLayer,
    ) -> Result<Configuration, DomainError> {
        let merged = defaults
            .overlay(environment)
            .overlay(file.unwrap_or_default())
            .overlay(cli);

        debug!(?merged, "Configuration layers merged");

        let build_tool = require(&merged, ConfigKey::BuildTool)?.parse::<BuildTool>()?;

        Ok(Configuration {
            build_tool,
            group_id: require(&merged, ConfigKey::GroupId)?.to_string(),
            java_version: require(&merged, ConfigKey::JavaVersion)?.to_string(),
            boot_version: require(&merged, ConfigKey::BootVersion)?.to_string(),
            root_dir: PathBuf::from(require(&merged, ConfigKey::RootDir)?),
            initializr_url: require(&merged, ConfigKey::InitializrUrl)?
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

fn require(layer: &ConfigLayer, key: ConfigKey) -> Result<&str, DomainError> {
    layer.get(key).ok_or_else(|| DomainError::InvalidConfig {
        key: key.as_str(),
        reason: "no value configured".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(key: ConfigKey, value: &str) -> ConfigLayer {
        ConfigLayer::new().with(key, value)
    }

    fn resolve_defaults_only() -> Configuration {
        ConfigResolver::resolve(
            ConfigLayer::defaults(),
            ConfigLayer::new(),
            None,
            ConfigLayer::new(),
        )
        .unwrap()
    }

    #[test]
    fn defaults_resolve_to_valid_configuration() {
        let cfg = resolve_defaults_only();
        assert_eq!(cfg.build_tool(), BuildTool::Maven);
        assert_eq!(cfg.group_id(), "com.example");
        assert_eq!(cfg.java_version(), "17");
        assert_eq!(cfg.root_dir(), Path::new("spring-platform"));
        assert_eq!(cfg.initializr_url(), "https://start.spring.io");
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            layer(ConfigKey::GroupId, "org.env"),
            None,
            ConfigLayer::new(),
        )
        .unwrap();
        assert_eq!(cfg.group_id(), "org.env");
    }

    #[test]
    fn file_overrides_environment() {
        let cfg = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            layer(ConfigKey::JavaVersion, "11"),
            Some(layer(ConfigKey::JavaVersion, "17")),
            ConfigLayer::new(),
        )
        .unwrap();
        assert_eq!(cfg.java_version(), "17");
    }

    #[test]
    fn cli_overrides_every_other_layer() {
        for key in ConfigKey::ALL {
            let value = match key {
                ConfigKey::BuildTool => "gradle",
                _ => "from-cli",
            };
            let below = match key {
                ConfigKey::BuildTool => "maven",
                _ => "from-below",
            };
            let cfg = ConfigResolver::resolve(
                ConfigLayer::defaults(),
                layer(key, below),
                Some(layer(key, below)),
                layer(key, value),
            )
            .unwrap();

            let resolved = match key {
                ConfigKey::BuildTool => cfg.build_tool().to_string(),
                ConfigKey::RootDir => cfg.root_dir().display().to_string(),
                ConfigKey::GroupId => cfg.group_id().to_string(),
                ConfigKey::JavaVersion => cfg.java_version().to_string(),
                ConfigKey::BootVersion => cfg.boot_version().to_string(),
                ConfigKey::InitializrUrl => cfg.initializr_url().to_string(),
            };
            assert_eq!(resolved, value, "CLI did not win for {key}");
        }
    }

    #[test]
    fn absent_file_layer_falls_through_to_environment() {
        let cfg = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            layer(ConfigKey::BootVersion, "3.2.0"),
            None,
            ConfigLayer::new(),
        )
        .unwrap();
        assert_eq!(cfg.boot_version(), "3.2.0");
    }

    #[test]
    fn invalid_build_tool_fails_after_merge() {
        let err = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            ConfigLayer::new(),
            Some(layer(ConfigKey::BuildTool, "ant")),
            ConfigLayer::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DomainError::InvalidConfig {
                key: "BUILD_TOOL",
                ..
            }
        ));
    }

    #[test]
    fn invalid_low_layer_value_is_fixed_by_higher_layer() {
        let cfg = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            layer(ConfigKey::BuildTool, "ant"),
            None,
            layer(ConfigKey::BuildTool, "gradle"),
        )
        .unwrap();
        assert_eq!(cfg.build_tool(), BuildTool::Gradle);
    }

    #[test]
    fn missing_required_value_is_invalid_config() {
        let err = ConfigResolver::resolve(
            ConfigLayer::new().with(ConfigKey::BuildTool, "maven"),
            ConfigLayer::new(),
            None,
            ConfigLayer::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig { .. }));
    }

    #[test]
    fn from_pairs_ignores_unknown_keys() {
        let layer = ConfigLayer::from_pairs([
            ("BUILD_TOOL", "gradle"),
            ("PATH", "/usr/bin"),
            ("SOMETHING_ELSE", "x"),
        ]);
        assert_eq!(layer.get(ConfigKey::BuildTool), Some("gradle"));
        assert_eq!(layer.get(ConfigKey::RootDir), None);
    }

    #[test]
    fn blank_values_are_unset() {
        let layer = ConfigLayer::from_pairs([("GROUP_ID", "   ")]);
        assert!(layer.is_empty());
    }

    #[test]
    fn trailing_slash_is_trimmed_from_initializr_url() {
        let cfg = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            ConfigLayer::new(),
            None,
            layer(ConfigKey::InitializrUrl, "http://localhost:8080/"),
        )
        .unwrap();
        assert_eq!(cfg.initializr_url(), "http://localhost:8080");
    }
}
