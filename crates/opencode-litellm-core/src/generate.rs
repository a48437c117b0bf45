//! Fetch → transform → persist pipeline for one run

use crate::config::RunConfig;
use crate::error::ConfigGenResult;
use crate::models_api::ModelsApiClient;
use crate::opencode::build_config;
use crate::writer::{create_parent_dirs, write_config};
use tracing::info;

/// Generate the OpenCode config described by `config` using `client`.
///
/// Nothing is written unless the fetch succeeds.
pub async fn generate_with_client(
    client: &ModelsApiClient,
    config: &RunConfig,
) -> ConfigGenResult<()> {
    let models = client
        .fetch_models(&config.base_url, config.api_key())
        .await?;

    let document = build_config(config, &models);

    create_parent_dirs(&config.output_path)?;
    write_config(&config.output_path, &document)?;

    info!(
        provider = %config.provider_key,
        models = document.provider.values().map(|p| p.models.len()).sum::<usize>(),
        "Config written to {}",
        config.output_path.display()
    );
    Ok(())
}

/// Generate the OpenCode config with a default client
pub async fn generate(config: &RunConfig) -> ConfigGenResult<()> {
    let client = ModelsApiClient::new()?;
    generate_with_client(&client, config).await
}
