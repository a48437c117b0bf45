//! OpenCode config document
//!
//! Field names and the `npm` package constant are read by OpenCode and must
//! not change. Maps are `BTreeMap` so the serialized file is byte-stable.

use crate::config::RunConfig;
use crate::models_api::Model;
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON schema URL written at the top of the config
pub const OPENCODE_SCHEMA_URL: &str = "https://opencode.ai/config.json";

/// AI SDK package OpenCode loads for OpenAI-compatible providers
pub const OPENAI_COMPATIBLE_NPM: &str = "@ai-sdk/openai-compatible";

/// Top-level OpenCode config
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenCodeConfig {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub provider: BTreeMap<String, ProviderEntry>,
}

/// A single provider block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderEntry {
    pub npm: String,
    pub name: String,
    pub options: ProviderOptions,
    pub models: BTreeMap<String, ModelConfig>,
}

/// Connection options handed to the AI SDK package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOptions {
    #[serde(rename = "baseURL")]
    pub base_url: String,
}

/// Per-model settings; only the display name is emitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    pub name: String,
}

/// Build the OpenCode config for the fetched models.
///
/// Each model id doubles as its display name. Duplicate ids collapse into a
/// single entry, the last one winning.
pub fn build_config(config: &RunConfig, models: &[Model]) -> OpenCodeConfig {
    let models = models
        .iter()
        .map(|m| (m.id.clone(), ModelConfig { name: m.id.clone() }))
        .collect();

    let entry = ProviderEntry {
        npm: OPENAI_COMPATIBLE_NPM.to_string(),
        name: config.provider_name.clone(),
        options: ProviderOptions {
            base_url: config.base_url.clone(),
        },
        models,
    };

    OpenCodeConfig {
        schema: OPENCODE_SCHEMA_URL.to_string(),
        provider: BTreeMap::from([(config.provider_key.clone(), entry)]),
    }
}
