pub mod config;
pub mod export;

pub use config::{load_config, load_config_from_env, ConfigError, ExportConfig};
pub use export::{ExportRow, COLUMNS};
