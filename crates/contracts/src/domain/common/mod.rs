//! Common types shared by all resources

pub mod choice;

pub use choice::Choice;

use serde::{Deserialize, Serialize};

/// Primary keys are database integers on the backend.
pub type EntityId = i64;

/// Plain `{detail}` acknowledgement returned by most action endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub detail: Option<String>,
}

/// `{count}` answer of aggregate endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}
