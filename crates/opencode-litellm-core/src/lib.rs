//! Core library for generating OpenCode provider configs from a LiteLLM proxy
//!
//! The run is a straight line: resolve a [`RunConfig`], fetch the model list
//! with [`ModelsApiClient`], turn it into an [`OpenCodeConfig`] with
//! [`build_config`], then write it with [`write_config`].

pub mod config;
pub mod error;
pub mod generate;
pub mod models_api;
pub mod opencode;
pub mod writer;

// Re-export commonly used types
pub use config::{
    API_KEY_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_PROVIDER_KEY, DEFAULT_PROVIDER_NAME, RunConfig,
    require_env_var, single_output_path,
};
pub use error::{ConfigGenError, ConfigGenResult};
pub use generate::{generate, generate_with_client};
pub use models_api::{Model, ModelsApiClient};
pub use opencode::{OpenCodeConfig, ProviderEntry, build_config};
pub use writer::{create_parent_dirs, write_config};
