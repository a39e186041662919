//! CLI command implementations.

pub mod field;
pub mod flights;
pub mod locations;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::domain::models::Config;
use crate::infrastructure::provider::ProviderClient;

/// Build the provider client every command talks to.
pub(crate) fn provider_client(config: &Config) -> Result<Arc<ProviderClient>> {
    let client = ProviderClient::new(config.provider.clone())
        .context("Failed to create provider client. Set SKYROUTE_PROVIDER__API_KEY or provider.api_key in .skyroute/config.yaml")?
        .with_search_config(config.search.clone());
    Ok(Arc::new(client))
}
