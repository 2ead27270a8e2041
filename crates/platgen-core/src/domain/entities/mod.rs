pub mod generation;
pub mod patch;
pub mod service;

pub use generation::{GeneratedProject, GenerationRequest};
pub use patch::{Anchor, InsertPosition, PatchOperation, PatchOutcome};
pub use service::{Capability, ServiceName, ServiceSpec, platform_services};
