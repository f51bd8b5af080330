use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::modifier::resolver::IdentifierSource;

/// One identifier decision, serialized as a JSONL line.
#[derive(Debug, Serialize)]
pub struct GenerationEvent {
    pub timestamp_ms: u128,

    pub element_path: String,
    pub role: String,

    pub source: String,
    pub identifier: Option<String>,
}

impl GenerationEvent {
    pub fn now(
        path: &str,
        role: &str,
        source: &IdentifierSource,
        identifier: Option<&str>,
    ) -> Self {
        Self {
            timestamp_ms: timestamp_ms(),
            element_path: path.to_string(),
            role: role.to_string(),
            source: source.to_string(),
            identifier: identifier.map(str::to_string),
        }
    }
}

/// Milliseconds since the Unix epoch; 0 if the clock is before it.
pub fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
