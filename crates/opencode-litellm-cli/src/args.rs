//! CLI argument definitions using clap

use clap::Parser;
use opencode_litellm_core::{
    API_KEY_ENV_VAR, ConfigGenResult, DEFAULT_BASE_URL, DEFAULT_PROVIDER_KEY,
    DEFAULT_PROVIDER_NAME, RunConfig, require_env_var, single_output_path,
};
use std::path::PathBuf;

const ENVIRONMENT_HELP: &str = "Environment:
  DIUS_LITELLM_SK            Required. API key for LiteLLM";

#[derive(Parser, Debug)]
#[command(name = "opencode-litellm")]
#[command(about = "Generates OpenCode config from LiteLLM models endpoint.")]
#[command(override_usage = "opencode-litellm [OPTIONS] <OUTPUT_FILE>")]
#[command(after_help = ENVIRONMENT_HELP)]
#[command(version)]
pub struct Cli {
    /// LiteLLM base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Provider display name
    #[arg(long, default_value = DEFAULT_PROVIDER_NAME)]
    pub provider_name: String,

    /// Provider key in config
    #[arg(long, default_value = DEFAULT_PROVIDER_KEY)]
    pub provider_key: String,

    /// Path of the config file to write
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_files: Vec<PathBuf>,
}

impl Cli {
    /// Resolve flags, the positional output path and the API key into a run
    /// configuration. Arguments are checked before the environment.
    pub fn into_run_config(self) -> ConfigGenResult<RunConfig> {
        let output_path = single_output_path(self.output_files)?;
        let api_key = require_env_var(API_KEY_ENV_VAR)?;

        Ok(RunConfig::new(
            self.base_url,
            self.provider_name,
            self.provider_key,
            output_path,
            api_key,
        ))
    }
}
