//! Domain value objects: BuildTool.
//!
//! # Design
//!
//! These are pure value types: `Copy` and compared by value.
//! Everything the pipeline derives from the build tool (Initializr project
//! type, jar glob, wrapper commands, ignore rules) is answered here so the
//! rest of the crate never matches on the selector itself.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add an arm to every `const fn` below and to the `FromStr` parser
//! 3. Done: artifacts and requests pick it up automatically

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── BuildTool ─────────────────────────────────────────────────────────────────

/// The build tool the generated services use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl BuildTool {
    /// Every recognized selector, in display order.
    pub const ALL: [BuildTool; 2] = [Self::Maven, Self::Gradle];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
        }
    }

    /// Value of the Initializr `type` request parameter.
    pub const fn project_type(&self) -> &'static str {
        match self {
            Self::Maven => "maven-project",
            Self::Gradle => "gradle-project",
        }
    }

    /// Glob matching the executable jar produced by a build.
    pub const fn jar_glob(&self) -> &'static str {
        match self {
            Self::Maven => "target/*.jar",
            Self::Gradle => "build/libs/*.jar",
        }
    }

    /// Wrapper invocation that packages a service.
    pub const fn build_command(&self) -> &'static str {
        match self {
            Self::Maven => "./mvnw clean package",
            Self::Gradle => "./gradlew build",
        }
    }

    /// Wrapper invocation that runs a service locally.
    pub const fn run_command(&self) -> &'static str {
        match self {
            Self::Maven => "./mvnw spring-boot:run",
            Self::Gradle => "./gradlew bootRun",
        }
    }

    /// Build-tool specific ignore rules appended to the common block.
    pub const fn ignore_rules(&self) -> &'static str {
        match self {
            Self::Maven => "# Maven\ntarget/\n!.mvn/wrapper/maven-wrapper.jar\n",
            Self::Gradle => {
                "# Gradle\n.gradle/\nbuild/\n!gradle/wrapper/gradle-wrapper.jar\n"
            }
        }
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildTool {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maven" => Ok(Self::Maven),
            "gradle" => Ok(Self::Gradle),
            other => Err(DomainError::InvalidConfig {
                key: "BUILD_TOOL",
                reason: format!("unknown build tool '{other}' (expected maven or gradle)"),
            }),
        }
    }
}
