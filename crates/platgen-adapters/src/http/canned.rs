//! Deterministic in-memory generation client.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use platgen_core::{
    application::{ApplicationError, ports::TemplateClient},
    domain::GenerationRequest,
    error::PlatgenResult,
};

#[derive(Debug, Clone)]
enum Canned {
    Archive(Vec<u8>),
    Status { status: u16, body: String },
}

/// Answers generation requests from canned responses keyed by artifact id,
/// and records every request it sees.
///
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct CannedTemplateClient {
    responses: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl CannedTemplateClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `artifact_id` with `archive`.
    pub fn with_archive(self, artifact_id: impl Into<String>, archive: Vec<u8>) -> Self {
        self.insert(artifact_id.into(), Canned::Archive(archive));
        self
    }

    /// Answer requests for `artifact_id` with a non-success status.
    pub fn with_status(
        self,
        artifact_id: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.insert(
            artifact_id.into(),
            Canned::Status {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn insert(&self, artifact_id: String, canned: Canned) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(artifact_id, canned);
        }
    }
}

impl TemplateClient for CannedTemplateClient {
    fn fetch(&self, request: &GenerationRequest) -> PlatgenResult<Vec<u8>> {
        self.requests
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(request.clone());

        let canned = self
            .responses
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .get(&request.artifact_id)
            .cloned();

        match canned {
            Some(Canned::Archive(bytes)) => Ok(bytes),
            Some(Canned::Status { status, body }) => Err(ApplicationError::Network {
                service: request.name.clone(),
                status,
                body,
            }
            .into()),
            None => Err(ApplicationError::Network {
                service: request.name.clone(),
                status: 404,
                body: format!("no canned response for '{}'", request.artifact_id),
            }
            .into()),
        }
    }
}
