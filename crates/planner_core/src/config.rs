//! Runtime configuration for the planning core.
//!
//! # Responsibility
//! - Collect tunables for the store, the session layer and dashboards.
//! - Load overrides from JSON with every field optional.
//!
//! # Invariants
//! - `Default` matches the hosted application: 1000/1500 ms auth delays,
//!   `user`/`church` cache keys, dangling references retained.
//! - Session cache keys are non-blank and distinct.

use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// How deleting a record treats references held by other collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Leave dangling references in place.
    #[default]
    Retain,
    /// Scrub references to the deleted record from other collections.
    Detach,
    /// Refuse the delete while any reference exists.
    Reject,
}

impl ReferencePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Retain => "retain",
            Self::Detach => "detach",
            Self::Reject => "reject",
        }
    }
}

/// Simulated authentication latency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub sign_in_delay_ms: u64,
    pub register_delay_ms: u64,
}

impl AuthConfig {
    /// Zero-latency settings for tests and scripted callers.
    pub fn immediate() -> Self {
        Self {
            sign_in_delay_ms: 0,
            register_delay_ms: 0,
        }
    }

    pub fn sign_in_delay(&self) -> Duration {
        Duration::from_millis(self.sign_in_delay_ms)
    }

    pub fn register_delay(&self) -> Duration {
        Duration::from_millis(self.register_delay_ms)
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            sign_in_delay_ms: 1000,
            register_delay_ms: 1500,
        }
    }
}

/// Cache keys the session identity pair is mirrored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionKeys {
    pub user: String,
    pub organization: String,
}

impl Default for SessionKeys {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            organization: "church".to_string(),
        }
    }
}

/// Row limits for dashboard projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardLimits {
    pub admin_upcoming: usize,
    pub volunteer_upcoming: usize,
}

impl Default for DashboardLimits {
    fn default() -> Self {
        Self {
            admin_upcoming: 3,
            volunteer_upcoming: 5,
        }
    }
}

/// Logging bootstrap settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub log_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub reference_policy: ReferencePolicy,
    pub auth: AuthConfig,
    pub session_keys: SessionKeys,
    pub dashboard: DashboardLimits,
    pub logging: LoggingConfig,
}

impl PlannerConfig {
    /// Parses a JSON document; absent fields keep their defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let user_key = self.session_keys.user.trim();
        let organization_key = self.session_keys.organization.trim();
        if user_key.is_empty() || organization_key.is_empty() {
            return Err(ConfigError::Invalid(
                "session keys must not be blank".to_string(),
            ));
        }
        if user_key == organization_key {
            return Err(ConfigError::Invalid(format!(
                "session keys must differ, both are `{user_key}`"
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse planner config: {err}"),
            Self::Invalid(message) => write!(f, "invalid planner config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PlannerConfig, ReferencePolicy};

    #[test]
    fn empty_document_yields_defaults() {
        let config = PlannerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.reference_policy, ReferencePolicy::Retain);
        assert_eq!(config.auth.sign_in_delay_ms, 1000);
        assert_eq!(config.dashboard.admin_upcoming, 3);
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let config = PlannerConfig::from_json_str(
            r#"{"reference_policy":"detach","auth":{"register_delay_ms":0}}"#,
        )
        .unwrap();

        assert_eq!(config.reference_policy, ReferencePolicy::Detach);
        assert_eq!(config.auth.register_delay_ms, 0);
        assert_eq!(config.auth.sign_in_delay_ms, 1000);
    }

    #[test]
    fn identical_session_keys_are_rejected() {
        let err = PlannerConfig::from_json_str(
            r#"{"session_keys":{"user":"identity","organization":"identity"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let err = PlannerConfig::from_json_str(r#"{"reference_policy":"cascade"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
