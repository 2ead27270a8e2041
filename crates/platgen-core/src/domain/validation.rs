use std::collections::HashSet;

use crate::domain::{entities::ServiceSpec, error::DomainError};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    /// A service list is valid when names are unique and every patch stays
    /// inside its own service directory.
    pub fn validate_services(services: &[ServiceSpec]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for spec in services {
            if !seen.insert(spec.name().as_str()) {
                return Err(DomainError::InvalidServiceName {
                    name: spec.name().to_string(),
                    reason: "declared more than once".into(),
                });
            }
            for patch in spec.patches() {
                if patch.target().is_absolute() || !patch.target().starts_with(spec.name().as_str())
                {
                    return Err(DomainError::InvalidPatch {
                        target: patch.target().display().to_string(),
                        reason: format!("must stay inside '{}'", spec.name()),
                    });
                }
            }
        }
        Ok(())
    }
}
