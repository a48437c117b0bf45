//! OpenCode config generator for LiteLLM
//!
//! Fetches the model list from a LiteLLM proxy and writes it out as an
//! OpenCode provider config.
//!
//! ```bash
//! DIUS_LITELLM_SK=sk-... opencode-litellm ~/.config/opencode/opencode.json
//! ```
//!
//! Set `RUST_LOG=debug` for request-level logging on stderr.

mod args;

use args::Cli;
use clap::{CommandFactory, Parser};
use opencode_litellm_core::{ConfigGenError, ConfigGenResult, generate};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout only carries the confirmation line
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version print to stdout and succeed. err.exit()
            // would use status 2 for parse errors; a failed print has
            // nowhere left to be reported.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(output_path) => {
            println!("Config written to {}", output_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> ConfigGenResult<PathBuf> {
    let config = cli.into_run_config()?;
    tracing::debug!(?config, "Resolved run configuration");

    generate(&config).await?;
    Ok(config.output_path)
}

fn report(err: &ConfigGenError) {
    tracing::debug!(code = err.error_code(), "Run aborted");
    if err.is_usage() {
        eprintln!("{}", Cli::command().render_help());
    }
    eprintln!("Error: {err}");
}
