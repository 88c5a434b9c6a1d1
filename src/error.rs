//! Error types for descriptor analysis

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that abort an analysis
///
/// Degenerate numeric input (silent audio, fewer than two beats) is not an
/// error: the estimators resolve it to fallback values.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// File extension outside the accepted set
    #[error("unsupported file format: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// Payload larger than the configured ceiling
    #[error("file too large: {size} bytes (max {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// Payload could not be decoded into a waveform
    #[error("failed to decode audio: {0}")]
    DecodeFailure(String),

    /// Any other failure inside the pipeline
    #[error("analysis failed during {stage}: {source}")]
    AnalysisFailure {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Invalid configuration values
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Wrap an arbitrary cause as a pipeline failure for `stage`
    pub fn failure<E>(stage: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        AnalysisError::AnalysisFailure {
            stage,
            source: source.into(),
        }
    }

    /// True for errors raised by the format/size gate before decoding
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AnalysisError::UnsupportedFormat { .. } | AnalysisError::FileTooLarge { .. }
        )
    }
}
