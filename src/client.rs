//! HTTPS submission transport
//!
//! Issues the single POST carrying the canonical bytes and the signature
//! header, then interprets the server's JSON verdict. One attempt per
//! invocation; retry means re-running the tool.

use std::time::Duration;

use crate::signature::SIGNATURE_HEADER;

/// Transport failures and server verdicts that fail the run
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected submission: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("server response is not valid JSON: {body}")]
    InvalidResponse { body: String },

    #[error("server reported success=false: {body}")]
    Failed { body: String },
}

/// An accepted submission: the server's receipt plus the full response
#[derive(Debug, Clone)]
pub struct Acceptance {
    /// Opaque acknowledgment token, when the server returned one
    pub receipt: Option<String>,

    /// Full parsed response document
    pub response: serde_json::Value,
}

/// Blocking submission client with a bounded request timeout
pub struct SubmissionClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl SubmissionClient {
    /// Create a client for the given endpoint
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    /// Submit the canonical bytes exactly as signed
    ///
    /// The body is the canonical byte sequence itself, not a re-serialized
    /// copy, so the server verifies the same bytes the signature covers.
    pub fn submit(&self, canonical: &[u8], signature: &str) -> Result<Acceptance, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(canonical.to_vec())
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        interpret_response(status, &body)
    }
}

/// Interpret the server's verdict from status and body text
///
/// Kept as a pure function so the outcome taxonomy is testable without a
/// socket: non-2xx is a rejection, a 2xx body must be JSON with `success`
/// literally `true`, and the optional `receipt` rides along.
fn interpret_response(status: u16, body: &str) -> Result<Acceptance, ClientError> {
    if !(200..300).contains(&status) {
        return Err(ClientError::Rejected {
            status,
            body: body.to_string(),
        });
    }

    let response: serde_json::Value = serde_json::from_str(body).map_err(|_| {
        ClientError::InvalidResponse {
            body: body.to_string(),
        }
    })?;

    if response.get("success").and_then(|v| v.as_bool()) != Some(true) {
        return Err(ClientError::Failed {
            body: body.to_string(),
        });
    }

    let receipt = response
        .get("receipt")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    Ok(Acceptance { receipt, response })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepted_with_receipt() {
        let acceptance =
            interpret_response(200, r#"{"success":true,"receipt":"R-1"}"#).unwrap();
        assert_eq!(acceptance.receipt.as_deref(), Some("R-1"));
        assert_eq!(acceptance.response["success"], true);
    }

    #[test]
    fn test_accepted_without_receipt() {
        let acceptance = interpret_response(201, r#"{"success":true}"#).unwrap();
        assert!(acceptance.receipt.is_none());
    }

    #[test]
    fn test_non_2xx_is_rejection() {
        let err = interpret_response(500, r#"{"error":"boom"}"#).unwrap_err();
        match err {
            ClientError::Rejected { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_success_false_fails() {
        let err = interpret_response(200, r#"{"success":false,"reason":"nope"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Failed { .. }));
    }

    #[test]
    fn test_success_must_be_literal_true() {
        // A truthy string is not the boolean true.
        let err = interpret_response(200, r#"{"success":"true"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Failed { .. }));

        let err = interpret_response(200, r#"{"receipt":"R-1"}"#).unwrap_err();
        assert!(matches!(err, ClientError::Failed { .. }));
    }

    #[test]
    fn test_non_json_2xx_body_fails() {
        let err = interpret_response(200, "<html>ok</html>").unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse { .. }));
    }

    #[test]
    fn test_non_string_receipt_is_treated_as_absent() {
        let acceptance = interpret_response(200, r#"{"success":true,"receipt":7}"#).unwrap();
        assert!(acceptance.receipt.is_none());
        assert_eq!(acceptance.response["receipt"], 7);
    }
}
