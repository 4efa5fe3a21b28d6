use config as config_rs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::hasher::DEFAULT_CACHE_CAPACITY;

/// Prefix for environment overrides, e.g. `JOAAT_RESTORE_WORKERS=4`
pub const ENV_PREFIX: &str = "JOAAT_RESTORE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Worker pool size, 0 = one per CPU
    pub workers: usize,
    pub cache_capacity: usize,
    /// File name suffixes collected when scanning directories
    pub extensions: Vec<String>,
    pub dry_run: bool,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            extensions: vec!["ytyp.xml".to_string(), "ymap.xml".to_string()],
            dry_run: false,
            json_logs: false,
        }
    }
}

/// Values given on the command line. They win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub workers: Option<usize>,
    pub cache_capacity: Option<usize>,
    pub extensions: Option<Vec<String>>,
    pub dry_run: bool,
    pub json_logs: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
}

pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let mut builder = config_rs::Config::builder()
        .set_default("workers", defaults.workers as i64)?
        .set_default("cache_capacity", defaults.cache_capacity as i64)?
        .set_default("extensions", defaults.extensions)?
        .set_default("dry_run", defaults.dry_run)?
        .set_default("json_logs", defaults.json_logs)?;

    if let Some(path) = path {
        builder = builder.add_source(config_rs::File::from(path).required(true));
    }

    builder = builder.add_source(
        config_rs::Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("extensions"),
    );

    // CLI flags take precedence
    if let Some(workers) = overrides.workers {
        builder = builder.set_override("workers", workers as i64)?;
    }
    if let Some(capacity) = overrides.cache_capacity {
        builder = builder.set_override("cache_capacity", capacity as i64)?;
    }
    if let Some(extensions) = overrides.extensions.clone() {
        builder = builder.set_override("extensions", extensions)?;
    }
    if overrides.dry_run {
        builder = builder.set_override("dry_run", true)?;
    }
    if overrides.json_logs {
        builder = builder.set_override("json_logs", true)?;
    }

    let cfg = builder.build()?;
    Ok(cfg.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.workers, 0);
        assert_eq!(cfg.cache_capacity, 1024);
        assert_eq!(cfg.extensions, vec!["ytyp.xml", "ymap.xml"]);
        assert!(!cfg.dry_run);
    }

    #[test]
    fn test_cli_overrides_win() {
        let overrides = ConfigOverrides {
            workers: Some(3),
            cache_capacity: Some(16),
            extensions: Some(vec!["xml".to_string()]),
            dry_run: true,
            json_logs: false,
        };

        let cfg = load_config(None, &overrides).unwrap();
        assert_eq!(cfg.workers, 3);
        assert_eq!(cfg.cache_capacity, 16);
        assert_eq!(cfg.extensions, vec!["xml"]);
        assert!(cfg.dry_run);
    }
}
