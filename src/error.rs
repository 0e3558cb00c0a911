//! Error types for landscape construction and per-frame data recovery.

/// Fatal setup error. Raised once while building the landscape, never from
/// inside the running frame loop.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn invalid<T: ToString>(field: &'static str, reason: T) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Failure loading an audio track for analysis
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("failed to decode WAV: {0}")]
    Wav(#[from] hound::Error),

    #[error("{path} contains no audio samples")]
    Empty { path: String },
}

/// Shape mismatch in per-frame input. Always recovered where it is detected
/// (truncate, read as silence or clamp) and only reported through the log.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataShapeError {
    #[error("audio frame has {actual} bins, expected {expected}")]
    FrameLength { expected: usize, actual: usize },

    #[error("grid index ({column}, {row}) outside {columns}x{rows}")]
    IndexOutOfBounds {
        column: i64,
        row: i64,
        columns: usize,
        rows: usize,
    },
}
