//! File System Utilities
//!
//! Configuration, data and export directory management.

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("io", "medalviz", "medal-viz").ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/medal-viz/` or `$XDG_CONFIG_HOME/medal-viz/`
/// - **macOS**: `~/Library/Application Support/io.medalviz.medal-viz/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\medalviz\medal-viz\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    Ok(config_dir.to_path_buf())
}

/// Get the data directory (log files)
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/medal-viz/`
/// - **macOS**: `~/Library/Application Support/io.medalviz.medal-viz/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\medalviz\medal-viz\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let data_dir = project_dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

/// Create `dir` (and parents) if missing
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Turn a chart or sport name into a safe file stem
pub fn file_stem(name: &str) -> String {
    let mut stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    while stem.contains("--") {
        stem = stem.replace("--", "-");
    }
    stem.trim_matches('-').to_string()
}
