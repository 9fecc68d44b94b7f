//! HMAC-SHA256 signing of canonical payload bytes
//!
//! The signature is a pure function of (canonical bytes, secret): no
//! nonce, no per-request salt. The server holds the same secret and
//! recomputes the digest over the request body it received.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the payload signature
pub const SIGNATURE_HEADER: &str = "X-Signature-256";

/// Scheme prefix attached to the hex digest
const SIGNATURE_PREFIX: &str = "sha256=";

/// Signing errors
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid signing secret")]
    InvalidSecret,
}

/// Sign canonical bytes with the shared secret
///
/// Returns `sha256=` followed by the lowercase hex HMAC-SHA256 digest.
pub fn sign(canonical: &[u8], secret: &str) -> Result<String, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(canonical);
    let digest = mac.finalize().into_bytes();
    Ok(format!("{}{}", SIGNATURE_PREFIX, hex::encode(digest)))
}
