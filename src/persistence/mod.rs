pub mod config;
pub mod logging;

use std::path::PathBuf;

/// Get or create the trajscope data directory (~/.local/share/trajscope/).
pub fn data_dir() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("trajscope");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Get or create the trajscope config directory (~/.config/trajscope/).
pub fn config_dir() -> Option<PathBuf> {
    let dir = dirs::config_dir()?.join("trajscope");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}
