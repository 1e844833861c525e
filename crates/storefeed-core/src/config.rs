use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Runtime settings for one export run.
///
/// Everything except the shop URL has a default matching the reference
/// export job: 250 records per page, 15 pages per batch, 2 batches.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Storefront base URL, e.g. `https://shop.example.com`. The
    /// `products.json` path is appended by the client.
    pub shop_url: String,
    /// Records requested per page (`per_page` query parameter).
    pub page_size: u32,
    /// Contiguous page numbers consumed per output file.
    pub pages_per_batch: u32,
    /// Number of output files to produce in one run.
    pub batch_count: u32,
    /// Directory the CSV files are written into.
    pub out_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

/// Load export configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if `STOREFEED_SHOP_URL` is missing or any value is
/// invalid.
pub fn load_config() -> Result<ExportConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load export configuration from environment variables already in the process.
///
/// Unlike [`load_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_config_from_env() -> Result<ExportConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build export configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_config<F>(lookup: F) -> Result<ExportConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_nonzero_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })?;
        if value == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    };

    let shop_url = require("STOREFEED_SHOP_URL")?;
    let page_size = parse_nonzero_u32("STOREFEED_PAGE_SIZE", "250")?;
    let pages_per_batch = parse_nonzero_u32("STOREFEED_PAGES_PER_BATCH", "15")?;
    let batch_count = parse_nonzero_u32("STOREFEED_BATCHES", "2")?;
    let out_dir = PathBuf::from(or_default("STOREFEED_OUT_DIR", "."));

    let request_timeout_secs = {
        let var = "STOREFEED_REQUEST_TIMEOUT_SECS";
        let raw = or_default(var, "30");
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?
    };

    let user_agent = or_default(
        "STOREFEED_USER_AGENT",
        concat!("storefeed/", env!("CARGO_PKG_VERSION")),
    );

    Ok(ExportConfig {
        shop_url,
        page_size,
        pages_per_batch,
        batch_count,
        out_dir,
        request_timeout_secs,
        user_agent,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
