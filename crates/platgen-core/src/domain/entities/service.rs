//! Platform service definitions.
//!
//! The platform is always the same three services. Each [`ServiceSpec`] is
//! built from the run [`Configuration`] because its patch targets depend on
//! the group id, and is immutable from then on.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    config::Configuration,
    entities::patch::{Anchor, InsertPosition, PatchOperation},
    error::DomainError,
};

/// Marker line that every generated entry point carries.
pub const BOOTSTRAP_MARKER: &str = "@SpringBootApplication";

/// 1-based line at which capability imports are inserted: right after the
/// `package` declaration and its blank line.
pub const IMPORT_LINE: usize = 3;

// ── ServiceName ───────────────────────────────────────────────────────────────

/// A kebab-case service identifier, e.g. `discovery-server`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let invalid = |reason: &str| DomainError::InvalidServiceName {
            name: name.clone(),
            reason: reason.into(),
        };

        let first = name.chars().next().ok_or_else(|| invalid("name is empty"))?;
        if !first.is_ascii_lowercase() {
            return Err(invalid("must start with a lowercase letter"));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(invalid("only lowercase letters, digits and '-' are allowed"));
        }
        if name.ends_with('-') || name.contains("--") {
            return Err(invalid("hyphens must separate words"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Package suffix for this service: hyphens become package separators.
    pub fn package_suffix(&self) -> String {
        self.0.replace('-', ".")
    }

    /// Name of the generated `@SpringBootApplication` class.
    ///
    /// `discovery-server` → `DiscoveryServerApplication`
    pub fn application_class(&self) -> String {
        let mut class: String = self
            .0
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect();
        class.push_str("Application");
        class
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Capability ────────────────────────────────────────────────────────────────

/// A framework capability enabled by patching the entry point rather than
/// through a generation-time dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    EurekaServer,
    ConfigServer,
}

impl Capability {
    pub const fn import(&self) -> &'static str {
        match self {
            Self::EurekaServer => {
                "import org.springframework.cloud.netflix.eureka.server.EnableEurekaServer;"
            }
            Self::ConfigServer => "import org.springframework.cloud.config.server.EnableConfigServer;",
        }
    }

    pub const fn annotation(&self) -> &'static str {
        match self {
            Self::EurekaServer => "@EnableEurekaServer",
            Self::ConfigServer => "@EnableConfigServer",
        }
    }
}

// ── ServiceSpec ───────────────────────────────────────────────────────────────

/// One service to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    name: ServiceName,
    description: &'static str,
    port: u16,
    dependencies: Vec<String>,
    patches: Vec<PatchOperation>,
}

impl ServiceSpec {
    pub fn new(
        name: ServiceName,
        description: &'static str,
        port: u16,
        dependencies: &[&str],
    ) -> Self {
        Self {
            name,
            description,
            port,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            patches: Vec::new(),
        }
    }

    /// Attach the two entry-point insertions that enable `capability`.
    pub fn with_capability(
        mut self,
        capability: Capability,
        config: &Configuration,
    ) -> Result<Self, DomainError> {
        let target = self.entry_point(config);
        self.patches.push(PatchOperation::new(
            target.clone(),
            Anchor::Line(IMPORT_LINE),
            capability.import(),
            InsertPosition::Before,
        )?);
        self.patches.push(PatchOperation::new(
            target,
            Anchor::LineContaining(BOOTSTRAP_MARKER.into()),
            capability.annotation(),
            InsertPosition::After,
        )?);
        Ok(self)
    }

    pub fn name(&self) -> &ServiceName {
        &self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn patches(&self) -> &[PatchOperation] {
        &self.patches
    }

    /// Fully qualified package of the generated sources.
    pub fn package_name(&self, config: &Configuration) -> String {
        format!("{}.{}", config.group_id(), self.name.package_suffix())
    }

    /// Entry-point source file, relative to the output root.
    pub fn entry_point(&self, config: &Configuration) -> PathBuf {
        let mut path = PathBuf::from(self.name.as_str());
        path.push("src");
        path.push("main");
        path.push("java");
        for segment in self.package_name(config).split('.') {
            path.push(segment);
        }
        path.push(format!("{}.java", self.name.application_class()));
        path
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

pub const DISCOVERY_SERVER: &str = "discovery-server";
pub const CONFIG_SERVER: &str = "config-server";
pub const API_GATEWAY: &str = "api-gateway";

/// The three platform services, in generation order.
pub fn platform_services(config: &Configuration) -> Result<Vec<ServiceSpec>, DomainError> {
    Ok(vec![
        ServiceSpec::new(
            ServiceName::new(DISCOVERY_SERVER)?,
            "Service registry (Eureka) that services use to find each other",
            8761,
            &["cloud-eureka-server", "actuator"],
        )
        .with_capability(Capability::EurekaServer, config)?,
        ServiceSpec::new(
            ServiceName::new(API_GATEWAY)?,
            "Edge gateway routing external requests to internal services",
            8080,
            &["cloud-gateway", "cloud-eureka", "actuator"],
        ),
        ServiceSpec::new(
            ServiceName::new(CONFIG_SERVER)?,
            "Centralized configuration served from a git-backed repository",
            8888,
            &["cloud-config-server", "actuator"],
        )
        .with_capability(Capability::ConfigServer, config)?,
    ])
}
