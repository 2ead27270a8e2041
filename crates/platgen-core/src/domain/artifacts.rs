//! Deployment and documentation artifacts.
//!
//! Everything here is a pure function of the [`Configuration`] and the
//! service list; writing the results is the orchestrator's job.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::{
    config::Configuration,
    entities::service::{API_GATEWAY, CONFIG_SERVER, DISCOVERY_SERVER, ServiceSpec},
};

/// Port every container exposes.
pub const CONTAINER_PORT: u16 = 8080;

/// Port the config server listens on.
pub const CONFIG_SERVER_PORT: u16 = 8888;

/// Summary listing order: registry first, then configuration, then the edge.
const SUMMARY_ORDER: [&str; 3] = [DISCOVERY_SERVER, CONFIG_SERVER, API_GATEWAY];

const COMMON_IGNORE_RULES: &str = "\
# Generated by platgen
### IDE ###
.idea/
*.iml
*.iws
*.ipr
.vscode/
.settings/
.project
.classpath
.factorypath
bin/
out/

### OS ###
.DS_Store
Thumbs.db

### Logs ###
*.log
logs/

### Env ###
.env
";

pub struct ArtifactGenerator;

impl ArtifactGenerator {
    /// Container build file for one service.
    pub fn dockerfile(config: &Configuration) -> String {
        format!(
            "FROM eclipse-temurin:{java}-jre\n\
             WORKDIR /app\n\
             COPY {glob} app.jar\n\
             EXPOSE {port}\n\
             ENTRYPOINT [\"java\", \"-jar\", \"app.jar\"]\n",
            java = config.java_version(),
            glob = config.build_tool().jar_glob(),
            port = CONTAINER_PORT,
        )
    }

    /// Top-level `README.md` describing the generated platform.
    pub fn summary(
        config: &Configuration,
        services: &[ServiceSpec],
        generated_at: DateTime<Utc>,
    ) -> String {
        let tool = config.build_tool();
        let mut ordered: Vec<&ServiceSpec> = services.iter().collect();
        ordered.sort_by_key(|s| {
            SUMMARY_ORDER
                .iter()
                .position(|name| *name == s.name().as_str())
                .unwrap_or(SUMMARY_ORDER.len())
        });

        let mut out = String::new();
        out.push_str("# Spring Cloud Platform\n\n");
        let _ = writeln!(
            out,
            "Generated by platgen on {}.\n",
            generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        );

        out.push_str("## Stack\n\n");
        let _ = writeln!(out, "- Build tool: {tool}");
        let _ = writeln!(out, "- Java: {}", config.java_version());
        let _ = writeln!(out, "- Spring Boot: {}", config.boot_version());
        let _ = writeln!(out, "- Group: {}\n", config.group_id());

        out.push_str("## Services\n\n");
        out.push_str("| Service | Port | Description |\n");
        out.push_str("|---------|------|-------------|\n");
        for spec in &ordered {
            let _ = writeln!(
                out,
                "| {} | {} | {} |",
                spec.name(),
                spec.port(),
                spec.description()
            );
        }

        out.push_str("\n## Build\n\n");
        out.push_str("```sh\n");
        for spec in &ordered {
            let _ = writeln!(out, "(cd {} && {})", spec.name(), tool.build_command());
        }
        out.push_str("```\n");

        out.push_str("\n## Run\n\n");
        out.push_str("Start the services in this order, each in its own terminal:\n\n");
        out.push_str("```sh\n");
        for spec in &ordered {
            let _ = writeln!(out, "cd {} && {}", spec.name(), tool.run_command());
        }
        out.push_str("```\n");

        out.push_str("\n## Containers\n\n");
        let _ = writeln!(
            out,
            "Each service has a `Dockerfile` copying `{}` after a build:\n",
            tool.jar_glob()
        );
        out.push_str("```sh\n");
        for spec in &ordered {
            let _ = writeln!(
                out,
                "docker build -t {name} {name}/ && docker run -p {port}:{container} {name}",
                name = spec.name(),
                port = spec.port(),
                container = CONTAINER_PORT,
            );
        }
        out.push_str("```\n");

        out
    }

    /// `.gitignore` for the output root.
    pub fn gitignore(config: &Configuration) -> String {
        format!(
            "{COMMON_IGNORE_RULES}\n{}",
            config.build_tool().ignore_rules()
        )
    }

    /// `application.yml` placed in the config server's `config-repo`.
    pub fn config_server_descriptor() -> String {
        format!(
            "server:\n  \
               port: {CONFIG_SERVER_PORT}\n\
             \n\
             spring:\n  \
               application:\n    \
                 name: {CONFIG_SERVER}\n  \
               cloud:\n    \
                 config:\n      \
                   server:\n        \
                     git:\n          \
                       uri: file://${{user.home}}/config-repo\n          \
                       default-label: main\n          \
                       clone-on-start: true\n"
        )
    }
}
