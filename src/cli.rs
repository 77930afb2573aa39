use clap::Parser;
use std::path::PathBuf;

/// Play back a two-variable trajectory with a time-colored trail.
#[derive(Parser, Debug)]
#[command(name = "trajscope", version, about)]
pub struct Cli {
    /// Trajectory JSON file; defaults to `data_file` from the config.
    pub path: Option<PathBuf>,
}
