//! Environment and override resolution (layers 2 and 3)
//!
//! Resolves every configurable value through the precedence chain
//! (explicit override > environment variable > built-in default), records
//! which layer supplied each payload field, and validates the result
//! before any network activity happens.

use std::fmt;
use std::time::Duration;

use super::defaults::BuiltinDefaults;

const ENV_APPLICANT_NAME: &str = "APPLICANT_NAME";
const ENV_APPLICANT_EMAIL: &str = "APPLICANT_EMAIL";
const ENV_RESUME_LINK: &str = "RESUME_LINK";
const ENV_REPOSITORY_URL: &str = "GITHUB_REPOSITORY_URL";
const ENV_SERVER_URL: &str = "GITHUB_SERVER_URL";
const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";
const ENV_RUN_ID: &str = "GITHUB_RUN_ID";
const ENV_ENDPOINT: &str = "B12_ENDPOINT";
const ENV_SIGNING_SECRET: &str = "B12_SIGNING_SECRET";
const ENV_TIMEOUT_SECONDS: &str = "B12_TIMEOUT_SECONDS";

/// Upper bound for the configured request timeout, in seconds
const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Configuration errors, all detected before any network activity
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("{key} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { key: &'static str, value: String },

    #[error("timeout must be in (0, 3600] seconds, got {0}")]
    TimeoutOutOfBounds(u64),
}

/// Origin of a resolved configuration value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    Builtin,
    Env,
    Override,
}

impl ConfigOrigin {
    /// Returns the string representation of the origin
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigOrigin::Builtin => "builtin",
            ConfigOrigin::Env => "env",
            ConfigOrigin::Override => "override",
        }
    }
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which layer supplied one resolved payload field
#[derive(Debug, Clone)]
pub struct FieldProvenance {
    /// Payload key name
    pub field: &'static str,

    /// Layer the value came from
    pub origin: ConfigOrigin,
}

/// Explicit overrides (layer 3), typically populated from CLI flags
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_link: Option<String>,
    pub repository_link: Option<String>,
    pub action_run_link: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Fully resolved, validated configuration
///
/// Construction goes through [`ResolvedConfig::resolve`], which rejects
/// missing payload fields and out-of-bounds timeouts, so holders of a
/// value can submit without re-checking preconditions.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub name: String,
    pub email: String,
    pub resume_link: String,
    pub repository_link: String,
    pub action_run_link: String,

    /// Submission endpoint URL
    pub endpoint: String,

    /// Shared signing secret
    pub signing_secret: String,

    /// Request timeout
    pub timeout: Duration,

    /// Which layer supplied each payload field, in payload key order
    pub provenance: Vec<FieldProvenance>,
}

impl ResolvedConfig {
    /// Resolve against the process environment
    pub fn from_env(overrides: &Overrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve against an explicit environment lookup
    pub fn resolve(
        overrides: &Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let defaults = BuiltinDefaults::default();
        let mut provenance = Vec::new();

        let action_run_link = resolve_action_run_link(overrides, &env, &defaults, &mut provenance);
        let email = resolve_field(
            "email",
            overrides.email.as_deref(),
            env(ENV_APPLICANT_EMAIL),
            "",
            &mut provenance,
        );
        let name = resolve_field(
            "name",
            overrides.name.as_deref(),
            env(ENV_APPLICANT_NAME),
            "",
            &mut provenance,
        );
        let repository_link = resolve_repository_link(overrides, &env, &defaults, &mut provenance);
        let resume_link = resolve_field(
            "resume_link",
            overrides.resume_link.as_deref(),
            env(ENV_RESUME_LINK),
            "",
            &mut provenance,
        );

        let timeout_seconds = resolve_timeout(overrides, &env, &defaults)?;
        let endpoint = overrides
            .endpoint
            .clone()
            .or_else(|| env(ENV_ENDPOINT))
            .unwrap_or(defaults.endpoint);
        let signing_secret = env(ENV_SIGNING_SECRET).unwrap_or(defaults.signing_secret);

        let config = Self {
            name,
            email,
            resume_link,
            repository_link,
            action_run_link,
            endpoint,
            signing_secret,
            timeout: Duration::from_secs(timeout_seconds),
            provenance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject empty (whitespace-trimmed) payload fields, all at once
    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("action_run_link", &self.action_run_link),
            ("email", &self.email),
            ("name", &self.name),
            ("repository_link", &self.repository_link),
            ("resume_link", &self.resume_link),
        ];

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingFields(missing))
        }
    }
}

fn resolve_field(
    field: &'static str,
    override_value: Option<&str>,
    env_value: Option<String>,
    default: &str,
    provenance: &mut Vec<FieldProvenance>,
) -> String {
    let (value, origin) = if let Some(value) = override_value {
        (value.to_string(), ConfigOrigin::Override)
    } else if let Some(value) = env_value {
        (value, ConfigOrigin::Env)
    } else {
        (default.to_string(), ConfigOrigin::Builtin)
    };
    provenance.push(FieldProvenance { field, origin });
    value
}

/// Repository link: whole-link env override, else derived from the GitHub
/// server URL and repository slug. Without a slug there is no repository
/// to point at, so the value stays empty and validation rejects it.
fn resolve_repository_link(
    overrides: &Overrides,
    env: &impl Fn(&str) -> Option<String>,
    defaults: &BuiltinDefaults,
    provenance: &mut Vec<FieldProvenance>,
) -> String {
    let derived = env(ENV_REPOSITORY)
        .filter(|repository| !repository.is_empty())
        .map(|repository| {
            let server = env(ENV_SERVER_URL).unwrap_or_else(|| defaults.github_server_url.clone());
            format!("{}/{}", server, repository)
        });

    resolve_field(
        "repository_link",
        overrides.repository_link.as_deref(),
        env(ENV_REPOSITORY_URL).or(derived),
        "",
        provenance,
    )
}

/// Action run link: derived from the CI run id when one is present,
/// otherwise the builtin placeholder link.
fn resolve_action_run_link(
    overrides: &Overrides,
    env: &impl Fn(&str) -> Option<String>,
    defaults: &BuiltinDefaults,
    provenance: &mut Vec<FieldProvenance>,
) -> String {
    let derived = env(ENV_RUN_ID).filter(|run_id| !run_id.is_empty()).map(|run_id| {
        let server = env(ENV_SERVER_URL).unwrap_or_else(|| defaults.github_server_url.clone());
        let repository = env(ENV_REPOSITORY).unwrap_or_default();
        format!("{}/{}/actions/runs/{}", server, repository, run_id)
    });

    resolve_field(
        "action_run_link",
        overrides.action_run_link.as_deref(),
        derived,
        &defaults.fallback_action_run_link,
        provenance,
    )
}

fn resolve_timeout(
    overrides: &Overrides,
    env: &impl Fn(&str) -> Option<String>,
    defaults: &BuiltinDefaults,
) -> Result<u64, ConfigError> {
    let seconds = match overrides.timeout_seconds {
        Some(seconds) => seconds,
        None => match env(ENV_TIMEOUT_SECONDS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    key: ENV_TIMEOUT_SECONDS,
                    value: raw,
                })?,
            None => defaults.timeout_seconds,
        },
    };

    // Must be in (0, 3600]; a zero timeout would never complete and an
    // unbounded one defeats the point of having one.
    if seconds == 0 || seconds > MAX_TIMEOUT_SECONDS {
        return Err(ConfigError::TimeoutOutOfBounds(seconds));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn applicant_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("APPLICANT_NAME", "Ada Lovelace"),
            ("APPLICANT_EMAIL", "ada@example.com"),
            ("RESUME_LINK", "https://example.com/resume.pdf"),
            ("GITHUB_REPOSITORY", "ada/engine"),
            ("GITHUB_RUN_ID", "42"),
        ]
    }

    #[test]
    fn test_env_layer_resolves_all_fields() {
        let config =
            ResolvedConfig::resolve(&Overrides::default(), env_from(&applicant_env())).unwrap();

        assert_eq!(config.name, "Ada Lovelace");
        assert_eq!(config.email, "ada@example.com");
        assert_eq!(config.repository_link, "https://github.com/ada/engine");
        assert_eq!(
            config.action_run_link,
            "https://github.com/ada/engine/actions/runs/42"
        );
        assert_eq!(config.endpoint, "https://b12.io/apply/submission");
        assert_eq!(config.timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_override_beats_env() {
        let overrides = Overrides {
            email: Some("override@example.com".to_string()),
            ..Overrides::default()
        };
        let config = ResolvedConfig::resolve(&overrides, env_from(&applicant_env())).unwrap();

        assert_eq!(config.email, "override@example.com");
        let origin = config
            .provenance
            .iter()
            .find(|p| p.field == "email")
            .unwrap()
            .origin;
        assert_eq!(origin, ConfigOrigin::Override);
    }

    #[test]
    fn test_whole_link_env_beats_derived_repository_link() {
        let mut env = applicant_env();
        env.push(("GITHUB_REPOSITORY_URL", "https://git.example.com/ada/engine"));
        let config = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap();

        assert_eq!(config.repository_link, "https://git.example.com/ada/engine");
    }

    #[test]
    fn test_custom_server_url_feeds_derived_links() {
        let mut env = applicant_env();
        env.push(("GITHUB_SERVER_URL", "https://ghe.example.com"));
        let config = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap();

        assert_eq!(config.repository_link, "https://ghe.example.com/ada/engine");
        assert_eq!(
            config.action_run_link,
            "https://ghe.example.com/ada/engine/actions/runs/42"
        );
    }

    #[test]
    fn test_action_run_link_falls_back_without_run_id() {
        let env: Vec<_> = applicant_env()
            .into_iter()
            .filter(|(key, _)| *key != "GITHUB_RUN_ID")
            .collect();
        let config = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap();

        assert_eq!(
            config.action_run_link,
            "https://github.com/placeholder/repo/actions/runs/unknown"
        );
        let origin = config
            .provenance
            .iter()
            .find(|p| p.field == "action_run_link")
            .unwrap()
            .origin;
        assert_eq!(origin, ConfigOrigin::Builtin);
    }

    #[test]
    fn test_missing_fields_reported_together() {
        let env = env_from(&[("APPLICANT_NAME", "Ada Lovelace")]);
        let err = ResolvedConfig::resolve(&Overrides::default(), env).unwrap_err();

        match err {
            ConfigError::MissingFields(fields) => {
                assert_eq!(fields, vec!["email", "repository_link", "resume_link"]);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_only_field_is_missing() {
        let mut env = applicant_env();
        env.retain(|(key, _)| *key != "APPLICANT_EMAIL");
        env.push(("APPLICANT_EMAIL", "   "));
        let err = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap_err();

        match err {
            ConfigError::MissingFields(fields) => assert_eq!(fields, vec!["email"]),
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_env_and_override() {
        let mut env = applicant_env();
        env.push(("B12_TIMEOUT_SECONDS", "30"));
        let config = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));

        let overrides = Overrides {
            timeout_seconds: Some(5),
            ..Overrides::default()
        };
        let config = ResolvedConfig::resolve(&overrides, env_from(&env)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_parse_error() {
        let mut env = applicant_env();
        env.push(("B12_TIMEOUT_SECONDS", "soon"));
        let err = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_timeout_bounds() {
        let overrides = Overrides {
            timeout_seconds: Some(0),
            ..Overrides::default()
        };
        let err =
            ResolvedConfig::resolve(&overrides, env_from(&applicant_env())).unwrap_err();
        assert!(matches!(err, ConfigError::TimeoutOutOfBounds(0)));

        let overrides = Overrides {
            timeout_seconds: Some(7200),
            ..Overrides::default()
        };
        let err =
            ResolvedConfig::resolve(&overrides, env_from(&applicant_env())).unwrap_err();
        assert!(matches!(err, ConfigError::TimeoutOutOfBounds(7200)));
    }

    #[test]
    fn test_signing_secret_env_override() {
        let mut env = applicant_env();
        env.push(("B12_SIGNING_SECRET", "rotated-secret"));
        let config = ResolvedConfig::resolve(&Overrides::default(), env_from(&env)).unwrap();

        assert_eq!(config.signing_secret, "rotated-secret");
    }
}
