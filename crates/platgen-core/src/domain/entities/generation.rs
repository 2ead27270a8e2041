use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{config::Configuration, entities::service::ServiceSpec};

/// Language requested from the generation service. Fixed.
pub const LANGUAGE: &str = "java";

/// Fully derived parameters of one remote generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub base_url: String,
    pub project_type: &'static str,
    pub language: &'static str,
    pub boot_version: String,
    pub base_dir: String,
    pub group_id: String,
    pub artifact_id: String,
    pub name: String,
    pub package_name: String,
    pub java_version: String,
    pub dependencies: Vec<String>,
}

impl GenerationRequest {
    pub fn new(spec: &ServiceSpec, config: &Configuration) -> Self {
        let service = spec.name().as_str().to_string();
        Self {
            base_url: config.initializr_url().to_string(),
            project_type: config.build_tool().project_type(),
            language: LANGUAGE,
            boot_version: config.boot_version().to_string(),
            base_dir: service.clone(),
            group_id: config.group_id().to_string(),
            artifact_id: service.clone(),
            name: service,
            package_name: spec.package_name(config),
            java_version: config.java_version().to_string(),
            dependencies: spec.dependencies().to_vec(),
        }
    }

    /// Query parameters in wire form.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.project_type.to_string()),
            ("language", self.language.to_string()),
            ("bootVersion", self.boot_version.clone()),
            ("baseDir", self.base_dir.clone()),
            ("groupId", self.group_id.clone()),
            ("artifactId", self.artifact_id.clone()),
            ("name", self.name.clone()),
            ("packageName", self.package_name.clone()),
            ("javaVersion", self.java_version.clone()),
            ("dependencies", self.dependencies.join(",")),
        ]
    }
}

/// A service project unpacked on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedProject {
    service: String,
    root: PathBuf,
}

impl GeneratedProject {
    pub fn new(service: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            service: service.into(),
            root: root.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate a file named relative to the output root
    /// (`<service>/src/...`) inside this project.
    pub fn resolve(&self, target: &Path) -> PathBuf {
        self.root
            .join(target.strip_prefix(&self.service).unwrap_or(target))
    }
}
