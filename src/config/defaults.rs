//! Built-in defaults (layer 1)
//!
//! Hardcoded defaults for all configuration values.

/// Default submission endpoint
pub const DEFAULT_ENDPOINT: &str = "https://b12.io/apply/submission";

/// Default shared signing secret
pub const DEFAULT_SIGNING_SECRET: &str = "hello-there-from-b12";

/// Built-in default configuration values
#[derive(Debug, Clone)]
pub struct BuiltinDefaults {
    /// Submission endpoint URL
    pub endpoint: String,

    /// Shared signing secret
    pub signing_secret: String,

    /// Request timeout in seconds (default: 15)
    pub timeout_seconds: u64,

    /// GitHub server URL used when deriving repository and run links
    pub github_server_url: String,

    /// Action run link used when no CI run id is available
    pub fallback_action_run_link: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            signing_secret: DEFAULT_SIGNING_SECRET.to_string(),
            timeout_seconds: 15,
            github_server_url: "https://github.com".to_string(),
            fallback_action_run_link: "https://github.com/placeholder/repo/actions/runs/unknown"
                .to_string(),
        }
    }
}
