//! SDK configuration.
//!
//! Configuration is explicit: a [`SynapseConfig`] is built once and handed to
//! [`Client::new`](crate::Client::new). [`SynapseConfig::from_env`] is a
//! convenience loader that reads `SYNAPSE_*` variables (and a `.env` file,
//! when present).

use std::time::Duration;

use strum::{Display, EnumString};
use url::Url;

use crate::credentials::ClientCredentials;
use crate::error::ConfigError;

/// API version path segment.
pub const API_VERSION: &str = "v3.1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_CLIENT_ID: &str = "SYNAPSE_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "SYNAPSE_CLIENT_SECRET";
const ENV_FINGERPRINT: &str = "SYNAPSE_FINGERPRINT";
const ENV_IP_ADDRESS: &str = "SYNAPSE_IP_ADDRESS";
const ENV_ENVIRONMENT: &str = "SYNAPSE_ENVIRONMENT";
const ENV_BASE_URL: &str = "SYNAPSE_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "SYNAPSE_TIMEOUT_SECS";

/// The SynapseFI deployment to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Environment {
    /// The UAT sandbox.
    #[default]
    Sandbox,
    /// Live production.
    Production,
}

impl Environment {
    /// Returns the API host for this environment.
    pub fn host(self) -> &'static str {
        match self {
            Self::Sandbox => "uat-api.synapsefi.com",
            Self::Production => "api.synapsefi.com",
        }
    }

    /// Returns the versioned API root, e.g. `https://uat-api.synapsefi.com/v3.1`.
    ///
    /// ## Errors
    ///
    /// Returns a parse error only if the static host table is malformed.
    pub fn base_url(self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("https://{}/{API_VERSION}", self.host()))
    }
}

/// Everything a [`Client`](crate::Client) needs.
#[derive(Debug, Clone)]
pub struct SynapseConfig {
    /// Versioned API root every endpoint is built from.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Platform credentials.
    pub credentials: ClientCredentials,
}

impl SynapseConfig {
    /// Starts a builder for the given credentials.
    pub fn builder(credentials: ClientCredentials) -> SynapseConfigBuilder {
        SynapseConfigBuilder::new(credentials)
    }

    /// Loads configuration from the process environment.
    ///
    /// A `.env` file in the working directory (or a parent) is read first,
    /// without overriding variables that are already set.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when a required variable is unset
    /// and [`ConfigError::InvalidEnv`] / [`ConfigError::InvalidUrl`] when a
    /// value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// ## Errors
    ///
    /// Same as [`SynapseConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingEnv { var })
        };

        let credentials = ClientCredentials::new(
            required(ENV_CLIENT_ID)?,
            required(ENV_CLIENT_SECRET)?,
            required(ENV_FINGERPRINT)?,
            required(ENV_IP_ADDRESS)?,
        );

        let mut builder = Self::builder(credentials);

        if let Some(raw) = lookup(ENV_ENVIRONMENT) {
            let environment = raw
                .parse::<Environment>()
                .map_err(|_| ConfigError::invalid_env(ENV_ENVIRONMENT, raw.as_str()))?;
            builder = builder.environment(environment);
        }

        if let Some(raw) = lookup(ENV_BASE_URL) {
            builder = builder.base_url(Url::parse(&raw)?);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| ConfigError::invalid_env(ENV_TIMEOUT_SECS, raw.as_str()))?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }
}

/// Builder for [`SynapseConfig`].
#[derive(Debug)]
pub struct SynapseConfigBuilder {
    credentials: ClientCredentials,
    environment: Environment,
    base_url: Option<Url>,
    timeout: Duration,
}

impl SynapseConfigBuilder {
    fn new(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            environment: Environment::default(),
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Selects the deployment. Ignored when an explicit base URL is set.
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Overrides the API root, e.g. to point at a mock server.
    ///
    /// The URL should include the version segment.
    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Finishes the configuration.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if the environment root cannot be
    /// parsed.
    pub fn build(self) -> Result<SynapseConfig, ConfigError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => self.environment.base_url()?,
        };
        Ok(SynapseConfig {
            base_url,
            timeout: self.timeout,
            credentials: self.credentials,
        })
    }
}
