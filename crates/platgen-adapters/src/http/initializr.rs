//! Blocking HTTP client for a Spring Initializr compatible service.

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use tracing::{debug, instrument, warn};

use platgen_core::{
    application::{ApplicationError, ports::TemplateClient},
    domain::GenerationRequest,
    error::PlatgenResult,
};

/// Endpoint that answers with a zipped project.
pub const STARTER_PATH: &str = "/starter.zip";

const USER_AGENT: &str = concat!("platgen/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Production [`TemplateClient`].
#[derive(Debug, Clone)]
pub struct InitializrClient {
    client: Client,
}

impl InitializrClient {
    pub fn new() -> PlatgenResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ApplicationError::Transport {
                service: "initializr".into(),
                reason: format!("could not build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

impl TemplateClient for InitializrClient {
    #[instrument(skip_all, fields(service = %request.name))]
    fn fetch(&self, request: &GenerationRequest) -> PlatgenResult<Vec<u8>> {
        let url = format!("{}{STARTER_PATH}", request.base_url);
        debug!(%url, "GET");

        let transport = |e: reqwest::Error| ApplicationError::Transport {
            service: request.name.clone(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .query(&request.query_pairs())
            .send()
            .map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "Generation rejected");
            return Err(ApplicationError::Network {
                service: request.name.clone(),
                status: status.as_u16(),
                body: body.trim().to_string(),
            }
            .into());
        }

        let bytes = response.bytes().map_err(transport)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use platgen_core::{
        domain::{ConfigKey, ConfigLayer, ConfigResolver, ServiceName, ServiceSpec},
        error::PlatgenError,
    };

    fn request(base_url: &str) -> GenerationRequest {
        let config = ConfigResolver::resolve(
            ConfigLayer::defaults(),
            ConfigLayer::new(),
            None,
            ConfigLayer::new()
                .with(ConfigKey::BuildTool, "gradle")
                .with(ConfigKey::GroupId, "com.acme")
                .with(ConfigKey::JavaVersion, "21")
                .with(ConfigKey::InitializrUrl, base_url),
        )
        .unwrap();
        let spec = ServiceSpec::new(
            ServiceName::new("discovery-server").unwrap(),
            "",
            8761,
            &["cloud-eureka-server", "actuator"],
        );
        GenerationRequest::new(&spec, &config)
    }

    #[test]
    fn sends_every_parameter_and_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/starter.zip")
                .query_param("type", "gradle-project")
                .query_param("language", "java")
                .query_param("bootVersion", "3.3.5")
                .query_param("baseDir", "discovery-server")
                .query_param("groupId", "com.acme")
                .query_param("artifactId", "discovery-server")
                .query_param("name", "discovery-server")
                .query_param("packageName", "com.acme.discovery.server")
                .query_param("javaVersion", "21")
                .query_param("dependencies", "cloud-eureka-server,actuator");
            then.status(200)
                .header("content-type", "application/zip")
                .body(b"PK\x03\x04fake".to_vec());
        });

        let client = InitializrClient::new().unwrap();
        let body = client.fetch(&request(&server.base_url())).unwrap();

        mock.assert();
        assert_eq!(body, b"PK\x03\x04fake");
    }

    #[test]
    fn non_success_status_carries_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/starter.zip");
            then.status(400)
                .body("Invalid Spring Boot version '9.9.9'\n");
        });

        let err = InitializrClient::new()
            .unwrap()
            .fetch(&request(&server.base_url()))
            .unwrap_err();

        assert_eq!(
            err,
            PlatgenError::Application(ApplicationError::Network {
                service: "discovery-server".into(),
                status: 400,
                body: "Invalid Spring Boot version '9.9.9'".into(),
            })
        );
    }

    #[test]
    fn only_ok_counts_as_generated() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/starter.zip");
            then.status(202).body("queued");
        });

        let err = InitializrClient::new()
            .unwrap()
            .fetch(&request(&server.base_url()))
            .unwrap_err();

        assert_eq!(err.http_status(), Some(202));
        assert!(err.to_string().contains("queued"));
    }

    #[test]
    fn unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on loopback is closed on test hosts.
        let err = InitializrClient::new()
            .unwrap()
            .fetch(&request("http://127.0.0.1:9"))
            .unwrap_err();

        assert!(matches!(
            err,
            PlatgenError::Application(ApplicationError::Transport { .. })
        ));
        assert_eq!(err.http_status(), None);
    }
}
