//! Configuration loading
//!
//! Embedded defaults, then optional files, then `SANAD_*` environment
//! variables (e.g. `SANAD_LLM__MODEL`, `SANAD_EVAL__SEED`).

use super::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Defaults compiled into the binary
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Deployment profile, selects `config/<profile>.toml`
fn profile() -> String {
    std::env::var("SANAD_ENV").unwrap_or_else(|_| "development".to_string())
}

/// Load the layered configuration
pub fn load_config() -> Result<AppConfig> {
    let overrides = [
        "config/default".to_string(),
        format!("config/{}", profile()),
        "config/local".to_string(),
    ];

    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
    for name in &overrides {
        builder = builder.add_source(File::with_name(name).required(false));
    }

    builder
        .add_source(
            Environment::with_prefix("SANAD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?
        .try_deserialize()
        .context("Failed to deserialize configuration")
}
