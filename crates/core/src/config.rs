//! Router configuration.
//!
//! All fields have defaults, so an empty JSON object (or no configuration at
//! all) yields a working router. Unknown fields are rejected to catch typos.

use serde::{Deserialize, Serialize};

use crate::error::{RouterError, RouterResult};

/// Environment variable holding inline JSON configuration.
pub const CONFIG_ENV_VAR: &str = "SWITCHYARD_CONFIG";

/// What the router does when `notify` finds no handler.
///
/// The outcome is returned to the caller either way; this only controls how
/// loudly it is logged.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnhandledPolicy {
    #[default]
    Warn,
    Ignore,
}

/// Log output format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterConfig {
    pub unhandled: UnhandledPolicy,
    pub log_format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            unhandled: UnhandledPolicy::default(),
            log_format: LogFormat::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl RouterConfig {
    pub fn from_json(raw: &str) -> RouterResult<Self> {
        serde_json::from_str(raw).map_err(|e| RouterError::config(e.to_string()))
    }

    /// Load from `SWITCHYARD_CONFIG`, falling back to defaults when unset.
    pub fn from_env() -> RouterResult<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(raw) => Self::from_json(&raw),
            Err(std::env::VarError::NotPresent) => {
                tracing::debug!("{CONFIG_ENV_VAR} not set, using default router config");
                Ok(Self::default())
            }
            Err(e) => Err(RouterError::config(format!("{CONFIG_ENV_VAR}: {e}"))),
        }
    }

    pub fn with_unhandled(mut self, policy: UnhandledPolicy) -> Self {
        self.unhandled = policy;
        self
    }
}
