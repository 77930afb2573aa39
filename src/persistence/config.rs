use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::data::ColumnKeys;
use crate::playback::clock::DEFAULT_TICK_INTERVAL;
use crate::playback::controller::{PlaybackOptions, DEFAULT_SCRUB_TOLERANCE, DEFAULT_TRAIL_LENGTH};
use crate::plot::cache::DEFAULT_FRAME_CACHE;
use crate::plot::types::{AxisRounding, ColorScale};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Trajectory file used when none is given on the command line.
    pub data_file: PathBuf,
    /// Key of the horizontal variable in the `data` object.
    pub a_key: String,
    /// Key of the vertical variable in the `data` object.
    pub b_key: String,
    /// Number of samples kept in the trail.
    pub trail_length: usize,
    /// Animation clock interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Scrub match tolerance as a fraction of the time span.
    pub scrub_tolerance: f64,
    /// "window" or "session".
    pub color_scale: ColorScale,
    /// "ceil" or "even".
    pub axis_rounding: AxisRounding,
    /// Rasterized frames kept in memory.
    pub frame_cache: usize,
    /// Log level used when RUST_LOG is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("goodwin_prob2_9a.json"),
            a_key: "wages".to_string(),
            b_key: "outputs".to_string(),
            trail_length: DEFAULT_TRAIL_LENGTH,
            tick_interval_ms: DEFAULT_TICK_INTERVAL.as_millis() as u64,
            scrub_tolerance: DEFAULT_SCRUB_TOLERANCE,
            color_scale: ColorScale::default(),
            axis_rounding: AxisRounding::default(),
            frame_cache: DEFAULT_FRAME_CACHE,
            log_level: "info".to_string(),
        }
    }
}

/// A loaded config plus the problems found while loading it.
///
/// Config is read before the logger exists, so warnings are carried here
/// and logged by the caller once logging is up.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<String>,
}

impl Config {
    /// Clamp values that would make playback meaningless; returns what was changed.
    pub fn normalize(&mut self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.trail_length == 0 {
            warnings.push("trail_length = 0 is not allowed, using 1".to_string());
            self.trail_length = 1;
        }
        if self.tick_interval_ms == 0 {
            warnings.push("tick_interval_ms = 0 is not allowed, using 1".to_string());
            self.tick_interval_ms = 1;
        }
        if self.frame_cache == 0 {
            warnings.push("frame_cache = 0 is not allowed, using 1".to_string());
            self.frame_cache = 1;
        }
        if !(self.scrub_tolerance >= 0.0) {
            warnings.push(format!(
                "scrub_tolerance = {} is not allowed, using default",
                self.scrub_tolerance
            ));
            self.scrub_tolerance = DEFAULT_SCRUB_TOLERANCE;
        }
        warnings
    }

    pub fn column_keys(&self) -> ColumnKeys {
        ColumnKeys {
            a: self.a_key.clone(),
            b: self.b_key.clone(),
        }
    }

    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            trail_length: self.trail_length,
            scrub_tolerance: self.scrub_tolerance,
            color_scale: self.color_scale,
            axis_rounding: self.axis_rounding,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Trajectory path: the command-line argument if any, else `data_file`.
    pub fn data_path(&self, arg: Option<&Path>) -> PathBuf {
        match arg {
            Some(path) => path.to_path_buf(),
            None => self.data_file.clone(),
        }
    }
}

/// Path to the config file.
pub fn config_path() -> Option<PathBuf> {
    Some(super::config_dir()?.join("config.toml"))
}

/// Load config from disk, returning defaults if file doesn't exist or is invalid.
pub fn load_config() -> LoadedConfig {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => LoadedConfig {
            config: Config::default(),
            warnings: vec!["no config directory, using defaults".to_string()],
        },
    }
}

pub fn load_config_from(path: &Path) -> LoadedConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(_) => {
            // Create default config file on first run
            let config = Config::default();
            let warnings = match write_default_config(path, &config) {
                Ok(()) => Vec::new(),
                Err(e) => vec![format!("could not create {}: {}", path.display(), e)],
            };
            LoadedConfig { config, warnings }
        }
    }
}

pub fn parse_config(content: &str) -> LoadedConfig {
    match toml::from_str::<Config>(content) {
        Ok(mut config) => {
            let warnings = config.normalize();
            LoadedConfig { config, warnings }
        }
        Err(e) => LoadedConfig {
            config: Config::default(),
            warnings: vec![format!("invalid config, using defaults: {}", e)],
        },
    }
}

/// Write a default config file with comments.
fn write_default_config(path: &Path, config: &Config) -> Result<(), String> {
    let content = format!(
        "# trajscope configuration\n\
         \n\
         # Trajectory file used when no path is given on the command line\n\
         data_file = \"{}\"\n\
         \n\
         # Keys of the two variables inside the file's \"data\" object\n\
         a_key = \"{}\"\n\
         b_key = \"{}\"\n\
         \n\
         # Samples kept in the trailing highlight\n\
         trail_length = {}\n\
         \n\
         # Animation clock interval (ms)\n\
         tick_interval_ms = {}\n\
         \n\
         # Scrub match tolerance, as a fraction of the time span\n\
         scrub_tolerance = {}\n\
         \n\
         # Trail color normalisation: \"window\" or \"session\"\n\
         color_scale = \"window\"\n\
         \n\
         # Axis extents: \"ceil\" ([0, ceil(max)]) or \"even\" (next even integer)\n\
         axis_rounding = \"ceil\"\n\
         \n\
         # Rasterized frames kept in memory\n\
         frame_cache = {}\n\
         \n\
         # Log level when RUST_LOG is unset\n\
         log_level = \"{}\"\n",
        config.data_file.display(),
        config.a_key,
        config.b_key,
        config.trail_length,
        config.tick_interval_ms,
        config.scrub_tolerance,
        config.frame_cache,
        config.log_level,
    );
    std::fs::write(path, content.as_bytes())
        .map_err(|e| format!("write error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let loaded = parse_config("trail_length = 20\ncolor_scale = \"session\"\n");
        assert!(loaded.warnings.is_empty());
        let config = loaded.config;
        assert_eq!(config.trail_length, 20);
        assert_eq!(config.color_scale, ColorScale::Session);
        assert_eq!(config.a_key, "wages");
        assert_eq!(config.tick_interval_ms, 10);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        for content in ["trail_length = \"long\"", "axis_rounding = \"floor\""] {
            let loaded = parse_config(content);
            assert_eq!(loaded.config, Config::default());
            assert_eq!(loaded.warnings.len(), 1);
            assert!(loaded.warnings[0].starts_with("invalid config"));
        }
    }

    #[test]
    fn test_normalize_clamps() {
        let loaded = parse_config("trail_length = 0\ntick_interval_ms = 0\nscrub_tolerance = -1.0\nframe_cache = 0");
        assert_eq!(loaded.warnings.len(), 4);
        let config = loaded.config;
        assert_eq!(config.trail_length, 1);
        assert_eq!(config.tick_interval_ms, 1);
        assert_eq!(config.frame_cache, 1);
        assert_eq!(config.scrub_tolerance, DEFAULT_SCRUB_TOLERANCE);
    }

    #[test]
    fn test_default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let first = load_config_from(&path);
        assert!(path.exists());
        assert!(first.warnings.is_empty());
        let second = load_config_from(&path);
        assert_eq!(first, second);
        assert_eq!(second.config.tick_interval(), DEFAULT_TICK_INTERVAL);
    }

    #[test]
    fn test_data_path_prefers_argument() {
        let config = Config::default();
        assert_eq!(config.data_path(Some(Path::new("run.json"))), PathBuf::from("run.json"));
        assert_eq!(config.data_path(None), PathBuf::from("goodwin_prob2_9a.json"));
    }

    #[test]
    fn test_playback_options() {
        let config = parse_config("trail_length = 12\naxis_rounding = \"even\"").config;
        let options = config.playback_options();
        assert_eq!(options.trail_length, 12);
        assert_eq!(options.axis_rounding, AxisRounding::Even);
        assert_eq!(config.column_keys(), ColumnKeys::default());
    }
}
