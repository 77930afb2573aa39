use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Path to the log file.
pub fn log_path() -> Option<PathBuf> {
    Some(super::data_dir()?.join("trajscope.log"))
}

/// Route `log` output to the log file; the terminal belongs to the UI.
/// `RUST_LOG` wins over `default_level`. Returns the file in use.
pub fn init_logging(default_level: &str) -> Option<PathBuf> {
    let path = log_path()?;
    init_logging_to(&path, default_level).ok()?;
    Some(path)
}

pub fn init_logging_to(path: &Path, default_level: &str) -> Result<(), String> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("open {}: {}", path.display(), e))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| format!("logger: {}", e))
}
