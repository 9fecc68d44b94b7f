//! B12 application submission client
//!
//! This crate implements the `b12-apply` tool, a one-shot submitter that
//! builds the applicant payload, canonicalizes it to the exact bytes the
//! server verifies, signs those bytes with a shared-secret HMAC, and
//! transmits them in a single HTTPS POST.

pub mod client;
pub mod config;
pub mod payload;
pub mod pipeline;
pub mod signature;

pub use client::{Acceptance, ClientError, SubmissionClient};
pub use config::{BuiltinDefaults, ConfigError, ConfigOrigin, Overrides, ResolvedConfig};
pub use payload::{PayloadError, SubmissionPayload};
pub use pipeline::{PipelineError, PipelineResult};
pub use signature::{sign, SIGNATURE_HEADER};
