//! Project-generation clients.

mod canned;
mod initializr;

pub use canned::CannedTemplateClient;
pub use initializr::{InitializrClient, STARTER_PATH};
