//! Configuration loading

use anyhow::Result;
use std::path::Path;

use crate::Config;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "NEOVIDEO_CONFIG_PATH";

/// Default config file locations, checked in order
const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config.yaml", "/config/config.yaml"];

/// Load configuration from config file or environment variables
///
/// Config file search order:
/// 1. `NEOVIDEO_CONFIG_PATH` environment variable (explicit path, must exist)
/// 2. ./config.yaml (current working directory)
/// 3. /config/config.yaml (container mount path)
/// 4. Fall back to environment variables only
///
/// Runs before logging is set up, so progress goes to stderr.
pub fn load_config() -> Result<Config> {
    let explicit = std::env::var(CONFIG_PATH_ENV).ok();
    let config_path = resolve_config_path(explicit, &DEFAULT_CONFIG_PATHS)?;

    let config = if let Some(path) = config_path {
        eprintln!("Loading config from {path}");
        Config::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to load {path}: {e}"))?
    } else {
        eprintln!("No config file found, using environment variables");
        Config::from_env()?
    };

    // Fail fast on misconfigurations
    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Config validation error: {error}");
        }
        return Err(anyhow::anyhow!(
            "Configuration validation failed with {} error(s): {}",
            errors.len(),
            errors.join("; ")
        ));
    }

    Ok(config)
}

/// Pick the config file to read. An explicit path that does not exist is an
/// error; the defaults are only used when no explicit path is given.
fn resolve_config_path(explicit: Option<String>, defaults: &[&str]) -> Result<Option<String>> {
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        if !Path::new(&path).exists() {
            return Err(anyhow::anyhow!(
                "Config file {path} (from {CONFIG_PATH_ENV}) does not exist"
            ));
        }
        return Ok(Some(path));
    }

    Ok(defaults
        .iter()
        .find(|p| Path::new(p).exists())
        .map(|p| (*p).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_config_path_is_an_error() {
        let err = resolve_config_path(
            Some("/nonexistent/neovideo/config.yaml".to_string()),
            &["Cargo.toml"],
        )
        .unwrap_err();
        assert!(err.to_string().contains(CONFIG_PATH_ENV));
    }

    #[test]
    fn test_explicit_config_path_wins_over_defaults() {
        let path = resolve_config_path(Some("Cargo.toml".to_string()), &["src/lib.rs"]).unwrap();
        assert_eq!(path.as_deref(), Some("Cargo.toml"));
    }

    #[test]
    fn test_defaults_used_without_explicit_path() {
        let path = resolve_config_path(None, &["/nonexistent/config.yaml", "Cargo.toml"]).unwrap();
        assert_eq!(path.as_deref(), Some("Cargo.toml"));

        let path = resolve_config_path(Some(String::new()), &["/nonexistent/config.yaml"]).unwrap();
        assert!(path.is_none());
    }
}
