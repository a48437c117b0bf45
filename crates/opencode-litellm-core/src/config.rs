//! Run configuration
//!
//! A [`RunConfig`] is resolved once at startup from flags and the environment
//! and is never mutated afterwards.

use crate::error::{ConfigGenError, ConfigGenResult};
use std::env::{self, VarError};
use std::fmt;
use std::path::PathBuf;

/// Default LiteLLM base URL
pub const DEFAULT_BASE_URL: &str = "https://litellm.dius.network/v1";

/// Default provider display name
pub const DEFAULT_PROVIDER_NAME: &str = "LiteLLM Dius";

/// Default provider key in the generated config
pub const DEFAULT_PROVIDER_KEY: &str = "litellm-dius";

/// Environment variable holding the LiteLLM API key
pub const API_KEY_ENV_VAR: &str = "DIUS_LITELLM_SK";

/// Fully resolved settings for one run
#[derive(Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Root of the LiteLLM API, also written into the output as the provider's base URL
    pub base_url: String,
    /// Provider display name
    pub provider_name: String,
    /// Key the provider entry is stored under
    pub provider_key: String,
    /// File the generated config is written to
    pub output_path: PathBuf,
    api_key: String,
}

impl RunConfig {
    /// Create a run configuration
    pub fn new(
        base_url: impl Into<String>,
        provider_name: impl Into<String>,
        provider_key: impl Into<String>,
        output_path: impl Into<PathBuf>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            provider_name: provider_name.into(),
            provider_key: provider_key.into(),
            output_path: output_path.into(),
            api_key: api_key.into(),
        }
    }

    /// Secret API key. Must never be logged or written to the output.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("base_url", &self.base_url)
            .field("provider_name", &self.provider_name)
            .field("provider_key", &self.provider_key)
            .field("output_path", &self.output_path)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Read a required environment variable, rejecting unset and empty values
pub fn require_env_var(name: &str) -> ConfigGenResult<String> {
    match env::var(name) {
        Ok(value) => require_non_empty(name, Some(value)),
        Err(VarError::NotPresent) => require_non_empty(name, None),
        Err(VarError::NotUnicode(_)) => Err(ConfigGenError::config(format!(
            "{name} env var is not valid UTF-8"
        ))),
    }
}

fn require_non_empty(name: &str, value: Option<String>) -> ConfigGenResult<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigGenError::config(format!("{name} env var not set"))),
    }
}

/// Pick the single output path out of the positional arguments
pub fn single_output_path(positionals: Vec<PathBuf>) -> ConfigGenResult<PathBuf> {
    let count = positionals.len();
    let mut iter = positionals.into_iter();
    match (iter.next(), iter.next()) {
        (Some(path), None) => Ok(path),
        _ => Err(ConfigGenError::usage(format!(
            "expected exactly one output file, got {count}"
        ))),
    }
}
