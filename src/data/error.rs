use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a trajectory. All of them are fatal: the session
/// never starts.
#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("trajectory file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("malformed trajectory data: {0}")]
    DataFormat(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TrajectoryError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat(_))
    }
}

pub type TrajectoryResult<T> = Result<T, TrajectoryError>;
