//! Submission pipeline
//!
//! Wires the stages linearly:
//! - Resolve and validate configuration
//! - Build the payload with a fresh timestamp
//! - Canonicalize to the exact wire bytes
//! - Sign with the shared secret
//! - Transmit once and interpret the verdict
//!
//! Progress goes to stdout; callers map errors to stderr and a nonzero
//! exit code.

use crate::client::{Acceptance, ClientError, SubmissionClient};
use crate::config::{ConfigError, ResolvedConfig};
use crate::payload::{PayloadError, SubmissionPayload};
use crate::signature::{sign, SignatureError};

/// Printed when the server accepts without returning a receipt
const NO_RECEIPT: &str = "no-receipt-returned";

/// Pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("signing error: {0}")]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Run one complete submission
pub fn run(config: &ResolvedConfig) -> PipelineResult<Acceptance> {
    let payload = SubmissionPayload::from_config(config);
    let canonical = payload.canonical_bytes()?;
    let signature = sign(&canonical, &config.signing_secret)?;

    println!("Submitting application to {}...", config.endpoint);
    println!("Payload timestamp: {}", payload.timestamp);
    println!("Signature: {}", signature);

    let client = SubmissionClient::new(&config.endpoint, config.timeout)?;
    let acceptance = client.submit(&canonical, &signature)?;

    println!();
    println!("Submission successful!");
    println!(
        "Receipt: {}",
        acceptance.receipt.as_deref().unwrap_or(NO_RECEIPT)
    );
    println!();
    println!(
        "Full response: {}",
        serde_json::to_string_pretty(&acceptance.response)?
    );

    Ok(acceptance)
}

/// Render the signed payload and resolution provenance without transmitting
pub fn dry_run(config: &ResolvedConfig) -> PipelineResult<()> {
    let payload = SubmissionPayload::from_config(config);
    let canonical = payload.canonical_bytes()?;
    let signature = sign(&canonical, &config.signing_secret)?;

    println!("Endpoint: {}", config.endpoint);
    println!("Timeout: {}s", config.timeout.as_secs());
    println!("Field sources:");
    for source in &config.provenance {
        println!("  {}: {}", source.field, source.origin);
    }
    println!("Canonical payload: {}", String::from_utf8_lossy(&canonical));
    println!("Signature: {}", signature);

    Ok(())
}
