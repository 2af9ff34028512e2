mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

/// Builds the process configuration from `CONFIG_PATH` (or `config.yaml`)
/// and the process environment.
pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path, |key| env::var(key).ok()).await
}

/// Like [`load`], with the file path and environment lookup injected.
///
/// A missing file is not an error; the defaults are used instead.
pub async fn load_from<F>(config_path: &str, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if Path::new(config_path).exists() {
        debug!("Loading configuration from: {}", config_path);
        let config_str = tokio::fs::read_to_string(config_path).await?;
        serde_yaml::from_str(&config_str)?
    } else {
        debug!("No configuration file at {}, using defaults", config_path);
        Config::default()
    };

    apply_env_overrides(&mut config, lookup)?;
    validate(&config)?;

    Ok(config)
}

pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("OPENAI_API_KEY") {
        config.upstream.api_key = api_key;
    }
    if let Some(base_url) = lookup("OPENAI_BASE_URL") {
        config.upstream.base_url = base_url;
    }
    if let Some(model) = lookup("OPENAI_MODEL") {
        config.upstream.model = model;
    }
    if let Some(host) = lookup("HOST") {
        config.server.host = host;
    }
    if let Some(port) = lookup("PORT") {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|_| Error::config(format!("Invalid PORT value: '{}'", port)))?;
    }
    Ok(())
}

pub fn validate(config: &Config) -> Result<()> {
    if config.upstream.api_key.trim().is_empty() {
        return Err(Error::config(
            "Missing upstream API key: set OPENAI_API_KEY or upstream.api_key",
        ));
    }
    if config.upstream.base_url.trim().is_empty() {
        return Err(Error::config("upstream.base_url must not be empty"));
    }
    Ok(())
}
