//! Configuration loading and representation.
//!
//! Loaded once at process start; the resulting values are handed explicitly
//! to the source and reconciler constructors.

use std::time::Duration;

use thiserror::Error;

use supplyrecon_core::LocationId;

pub const DEFAULT_API_URL: &str = "https://esi.evetech.net/latest";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const API_URL_VAR: &str = "SUPPLYRECON_API_URL";
const CORPORATION_ID_VAR: &str = "SUPPLYRECON_CORPORATION_ID";
const FACILITY_ID_VAR: &str = "SUPPLYRECON_FACILITY_ID";
const ACCESS_TOKEN_VAR: &str = "SUPPLYRECON_ACCESS_TOKEN";
const TIMEOUT_SECS_VAR: &str = "SUPPLYRECON_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection settings for the upstream inventory API.
#[derive(Clone)]
pub struct SourceConfig {
    pub api_url: String,
    pub corporation_id: i64,
    /// Facility whose hangars are reconciled. `None` is a caller error that
    /// surfaces on the first fetch, not at load time.
    pub facility_id: Option<LocationId>,
    pub access_token: Option<String>,
    pub request_timeout: Duration,
}

impl core::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("api_url", &self.api_url)
            .field("corporation_id", &self.corporation_id)
            .field("facility_id", &self.facility_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl SourceConfig {
    pub fn new(api_url: impl Into<String>, corporation_id: i64) -> Self {
        Self {
            api_url: api_url.into(),
            corporation_id,
            facility_id: None,
            access_token: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_facility(mut self, facility_id: LocationId) -> Self {
        self.facility_id = Some(facility_id);
        self
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary key lookup (environment, map, ...).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = non_empty(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let corporation_id = non_empty(CORPORATION_ID_VAR)
            .ok_or(ConfigError::Missing(CORPORATION_ID_VAR))?
            .trim()
            .parse::<i64>()
            .map_err(|e| ConfigError::Invalid {
                var: CORPORATION_ID_VAR,
                reason: e.to_string(),
            })?;

        let facility_id = non_empty(FACILITY_ID_VAR)
            .map(|raw| {
                raw.parse::<LocationId>().map_err(|e| ConfigError::Invalid {
                    var: FACILITY_ID_VAR,
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        let request_timeout = non_empty(TIMEOUT_SECS_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::Invalid {
                        var: TIMEOUT_SECS_VAR,
                        reason: e.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            corporation_id,
            facility_id,
            access_token: non_empty(ACCESS_TOKEN_VAR),
            request_timeout,
        })
    }
}
