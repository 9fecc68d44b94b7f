//! Submission payload construction and canonical serialization
//!
//! The payload is built once, serialized to canonical bytes, signed, and
//! transmitted; it is never mutated after construction. The canonical
//! bytes double as the request body, so the server verifies exactly what
//! was signed.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::ResolvedConfig;

/// Timestamp format: ISO-8601 UTC, millisecond precision, `Z` suffix
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Payload serialization errors
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("canonical serialization failed: {0}")]
    Canonicalize(String),
}

/// The signed submission document
///
/// Fields are declared in canonical (lexicographic) key order. The
/// canonical serializer sorts keys regardless, so the wire bytes do not
/// depend on declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub action_run_link: String,
    pub email: String,
    pub name: String,
    pub repository_link: String,
    pub resume_link: String,

    /// Generated at construction time, never reused across payloads
    pub timestamp: String,
}

impl SubmissionPayload {
    /// Build the payload from resolved configuration, stamping the current time
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            action_run_link: config.action_run_link.clone(),
            email: config.email.clone(),
            name: config.name.clone(),
            repository_link: config.repository_link.clone(),
            resume_link: config.resume_link.clone(),
            timestamp: current_timestamp(),
        }
    }

    /// Compute the canonical bytes using RFC 8785 JSON Canonicalization (JCS)
    ///
    /// Sorted keys, compact separators, UTF-8 with non-ASCII preserved
    /// literally, minimal string escaping, no trailing newline. These
    /// exact bytes are both the HMAC input and the request body.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        serde_json_canonicalizer::to_vec(self)
            .map_err(|e| PayloadError::Canonicalize(e.to_string()))
    }
}

/// Current UTC time with millisecond precision and a `Z` suffix
pub fn current_timestamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}
