//! End-to-end pipeline tests wiring real adapters together.

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use httpmock::prelude::*;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

use platgen_adapters::{
    CannedTemplateClient, GitCli, InitializrClient, LocalFilesystem, MemoryFilesystem,
    MemoryVersionControl, ZipExtractor,
};
use platgen_core::{
    application::{ApplicationError, Filesystem, PipelineWarning, ScaffoldService, VersionControl},
    domain::{ConfigKey, ConfigLayer, ConfigResolver, Configuration},
    error::PlatgenError,
};

const ROOT: &str = "/work/platform";

fn config(root: &str) -> Configuration {
    ConfigResolver::resolve(
        ConfigLayer::defaults(),
        ConfigLayer::new(),
        None,
        ConfigLayer::new()
            .with(ConfigKey::BuildTool, "gradle")
            .with(ConfigKey::GroupId, "com.acme")
            .with(ConfigKey::JavaVersion, "21")
            .with(ConfigKey::RootDir, root),
    )
    .unwrap()
}

/// A zip shaped like an Initializr gradle project for `service`.
fn starter_zip(service: &str) -> Vec<u8> {
    let package = format!("com.acme.{}", service.replace('-', "."));
    let class: String = service
        .split('-')
        .map(|w| w[..1].to_uppercase() + &w[1..])
        .collect::<String>()
        + "Application";
    let entry_point = format!(
        "{service}/src/main/java/{}/{class}.java",
        package.replace('.', "/")
    );
    let source = format!(
        "package {package};\n\
         \n\
         import org.springframework.boot.SpringApplication;\n\
         import org.springframework.boot.autoconfigure.SpringBootApplication;\n\
         \n\
         @SpringBootApplication\n\
         public class {class} {{\n\
         \n\
         \tpublic static void main(String[] args) {{\n\
         \t\tSpringApplication.run({class}.class, args);\n\
         \t}}\n\
         \n\
         }}\n"
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let file = SimpleFileOptions::default().unix_permissions(0o644);
    let exec = SimpleFileOptions::default().unix_permissions(0o755);
    for (name, content, options) in [
        (format!("{service}/build.gradle"), "plugins {}\n".to_string(), file),
        (format!("{service}/gradlew"), "#!/bin/sh\n".to_string(), exec),
        (entry_point, source, file),
    ] {
        writer.start_file(name, options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn canned_client() -> CannedTemplateClient {
    ["discovery-server", "api-gateway", "config-server"]
        .into_iter()
        .fold(CannedTemplateClient::new(), |client, service| {
            client.with_archive(service, starter_zip(service))
        })
}

fn memory_service(
    client: &CannedTemplateClient,
    fs: &MemoryFilesystem,
    vcs: &MemoryVersionControl,
) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(client.clone()),
        Box::new(ZipExtractor::new(fs.clone())),
        Box::new(fs.clone()),
        Box::new(vcs.clone()),
    )
}

fn read(fs: &MemoryFilesystem, relative: &str) -> String {
    fs.read_file(&Path::new(ROOT).join(relative))
        .unwrap_or_else(|| panic!("{relative} was not written"))
}

#[test]
fn gradle_platform_end_to_end() {
    let client = canned_client();
    let fs = MemoryFilesystem::new();
    let vcs = MemoryVersionControl::new();
    let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();

    let report = memory_service(&client, &fs, &vcs)
        .run_at(&config(ROOT), at)
        .unwrap();

    for service in ["discovery-server", "api-gateway", "config-server"] {
        assert!(fs.exists(&Path::new(ROOT).join(service)), "{service} missing");
        assert!(fs.is_executable(&Path::new(ROOT).join(service).join("gradlew")));
    }
    for dir in ["services", "common", "infra", "deploy/docker", "deploy/k8s"] {
        assert!(fs.exists(&Path::new(ROOT).join(dir)), "{dir} missing");
    }

    let dockerfile = read(&fs, "discovery-server/Dockerfile");
    assert!(dockerfile.starts_with("FROM eclipse-temurin:21-jre\n"));
    assert!(dockerfile.contains("COPY build/libs/*.jar app.jar"));
    assert!(dockerfile.contains("EXPOSE 8080"));

    let descriptor = read(&fs, "config-server/config-repo/application.yml");
    assert!(descriptor.contains("port: 8888"));
    assert!(descriptor.contains("file://${user.home}/config-repo"));

    let summary = read(&fs, "README.md");
    let positions: Vec<usize> = ["8761", "8888", "8080"]
        .iter()
        .map(|port| summary.find(port).unwrap_or_else(|| panic!("{port} missing")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(summary.contains("./gradlew bootRun"));
    assert!(summary.contains("2026-10-19T09:30:00Z"));

    assert!(read(&fs, ".gitignore").contains("build/"));

    let discovery = read(
        &fs,
        "discovery-server/src/main/java/com/acme/discovery/server/DiscoveryServerApplication.java",
    );
    assert_eq!(
        discovery.lines().nth(2),
        Some("import org.springframework.cloud.netflix.eureka.server.EnableEurekaServer;")
    );
    assert!(discovery.contains("@SpringBootApplication\n@EnableEurekaServer\n"));
    let gateway =
        read(&fs, "api-gateway/src/main/java/com/acme/api/gateway/ApiGatewayApplication.java");
    assert!(!gateway.contains("@Enable"));

    assert!(
        fs.list_files()
            .iter()
            .all(|p| p.extension().is_none_or(|e| e != "zip")),
        "temporary archives left behind"
    );

    assert_eq!(report.patches_applied, 4);
    assert!(report.committed);
    assert!(!report.has_warnings());
    assert_eq!(
        vcs.commits(Path::new(ROOT)),
        ["Initial platform scaffold (Java 21, gradle)"]
    );

    let requested: Vec<String> = client
        .requests()
        .into_iter()
        .map(|r| r.artifact_id)
        .collect();
    assert_eq!(requested, ["discovery-server", "api-gateway", "config-server"]);
}

#[test]
fn rerun_is_idempotent_and_commits_once() {
    let client = canned_client();
    let fs = MemoryFilesystem::new();
    let vcs = MemoryVersionControl::new();
    let service = memory_service(&client, &fs, &vcs);

    service.run(&config(ROOT)).unwrap();
    let entry = "config-server/src/main/java/com/acme/config/server/ConfigServerApplication.java";
    let first = read(&fs, entry);

    let second = service.run(&config(ROOT)).unwrap();

    assert_eq!(vcs.commits(Path::new(ROOT)).len(), 1);
    assert!(!second.committed);
    // Regenerated sources are patched again and end up identical.
    assert_eq!(second.patches_applied, 4);
    assert_eq!(read(&fs, entry), first);
    assert!(second.warnings.contains(&PipelineWarning::WorkspaceAlreadyExists {
        path: PathBuf::from(ROOT),
    }));
    assert!(
        second
            .warnings
            .contains(&PipelineWarning::VersionControlAlreadyInitialized {
                path: PathBuf::from(ROOT),
            })
    );
}

#[test]
fn rejected_generation_stops_the_run() {
    let client = canned_client().with_status("api-gateway", 400, "Invalid dependency");
    let fs = MemoryFilesystem::new();
    let vcs = MemoryVersionControl::new();

    let err = memory_service(&client, &fs, &vcs)
        .run(&config(ROOT))
        .unwrap_err();

    assert_eq!(err.http_status(), Some(400));
    assert!(err.to_string().contains("Invalid dependency"));

    // The failing service was never extracted, later services were never
    // requested, and no artifact stage ran.
    assert_eq!(client.requests().len(), 2);
    assert!(!fs.exists(&Path::new(ROOT).join("api-gateway")));
    assert!(!fs.exists(&Path::new(ROOT).join("config-server")));
    assert!(fs.read_file(&Path::new(ROOT).join("discovery-server/Dockerfile")).is_none());
    assert!(fs.read_file(&Path::new(ROOT).join("README.md")).is_none());
    assert!(vcs.commits(Path::new(ROOT)).is_empty());
}

#[test]
fn missing_version_control_aborts_before_any_work() {
    let client = canned_client();
    let fs = MemoryFilesystem::new();

    let err = memory_service(&client, &fs, &MemoryVersionControl::unavailable())
        .run(&config(ROOT))
        .unwrap_err();

    assert_eq!(
        err,
        PlatgenError::Application(ApplicationError::MissingDependency { tool: "git".into() })
    );
    assert!(client.requests().is_empty());
    assert!(fs.list_files().is_empty());
}

#[test]
fn on_disk_run_against_http_service_and_real_git() {
    let git = GitCli::new().with_identity("platgen", "platgen@example.com");
    if !git.is_available() {
        return;
    }

    let server = MockServer::start();
    for service in ["discovery-server", "api-gateway", "config-server"] {
        server.mock(|when, then| {
            when.method(GET)
                .path("/starter.zip")
                .query_param("artifactId", service)
                .query_param("type", "gradle-project");
            then.status(200).body(starter_zip(service));
        });
    }

    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("platform");
    let config = ConfigResolver::resolve(
        ConfigLayer::defaults(),
        ConfigLayer::new(),
        None,
        ConfigLayer::new()
            .with(ConfigKey::BuildTool, "gradle")
            .with(ConfigKey::GroupId, "com.acme")
            .with(ConfigKey::JavaVersion, "21")
            .with(ConfigKey::RootDir, root.to_string_lossy())
            .with(ConfigKey::InitializrUrl, server.base_url()),
    )
    .unwrap();

    let service = ScaffoldService::new(
        Box::new(InitializrClient::new().unwrap()),
        Box::new(ZipExtractor::new(LocalFilesystem::new())),
        Box::new(LocalFilesystem::new()),
        Box::new(git.clone()),
    );

    let first = service.run(&config).unwrap();
    assert!(first.committed);
    assert!(root.join(".git").is_dir());
    assert!(!root.join(".discovery-server.zip").exists());
    let dockerfile = std::fs::read_to_string(root.join("discovery-server/Dockerfile")).unwrap();
    assert!(dockerfile.contains("build/libs/*.jar"));

    let second = service.run(&config).unwrap();
    assert!(!second.committed);
    assert_eq!(commit_count(&root), 1);
}

fn commit_count(root: &Path) -> usize {
    let output = std::process::Command::new("git")
        .args(["rev-list", "--count", "HEAD"])
        .current_dir(root)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .unwrap()
}
