//! ConfigStore - Loading and saving `config.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::config::AppConfig;
use crate::helpers::get_or_create_config_dir;

pub const CONFIG_FILE: &str = "config.toml";

/// Default config location in the platform config directory
pub fn default_config_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(CONFIG_FILE))
}

/// Load the configuration from `path`. Without a path the default location
/// is used, and a missing file there is created with the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => load_config_from(path),
        None => init_config_at(&default_config_path()?),
    }
}

/// Load `path`, first writing the defaults there when the file is missing
pub fn init_config_at(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        return load_config_from(path);
    }
    let config = AppConfig::default();
    match save_config(path, &config) {
        Ok(()) => tracing::info!("Wrote default config to {}", path.display()),
        Err(err) => tracing::warn!("Could not write default config: {:#}", err),
    }
    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        tracing::info!("No config at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Write `config` as TOML, creating the parent directory if needed
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::medal::MedalType;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("medal-viz-config-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_config_from(&scratch("absent.toml")).expect("defaults");
        assert_eq!(config.server.base_url, AppConfig::default().server.base_url);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("saved.toml");
        let mut config = AppConfig::default();
        config.heatmap.medal_type = MedalType::Bronze;
        config.export.frames = true;
        save_config(&path, &config).expect("save");

        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.heatmap.medal_type, MedalType::Bronze);
        assert!(loaded.export.frames);
        fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let path = scratch("fresh/config.toml");
        let _ = fs::remove_file(&path);
        let config = init_config_at(&path).expect("defaults");
        assert!(path.exists());
        assert_eq!(config.server.base_url, AppConfig::default().server.base_url);

        let mut edited = config.clone();
        edited.heatmap.medal_type = MedalType::Silver;
        save_config(&path, &edited).expect("save");
        let reloaded = init_config_at(&path).expect("reload");
        assert_eq!(reloaded.heatmap.medal_type, MedalType::Silver);
        fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn test_invalid_toml_names_the_file() {
        let path = scratch("broken.toml");
        fs::create_dir_all(path.parent().expect("parent")).expect("dir");
        fs::write(&path, "[server\nbase_url = 1").expect("write");
        let err = load_config_from(&path).expect_err("invalid");
        assert!(err.to_string().contains("broken.toml"));
        fs::remove_file(&path).expect("cleanup");
    }
}
