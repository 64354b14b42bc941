//! Error types for RekhaGrid

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// RekhaGrid error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Pose lookup failed; the update for this reading is dropped
    #[error("Transform unavailable at t={timestamp:.3}: {reason}")]
    TransformUnavailable {
        /// Timestamp that was requested
        timestamp: f64,
        /// Why the lookup failed
        reason: String,
    },

    /// Reading rejected at the boundary
    #[error("Malformed reading: {0}")]
    MalformedReading(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Recording could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Grid sink refused a snapshot
    #[error("Sink error: {0}")]
    Sink(String),
}

impl Error {
    /// Shorthand for [`Error::TransformUnavailable`].
    pub fn transform_unavailable(timestamp: f64, reason: impl Into<String>) -> Self {
        Error::TransformUnavailable {
            timestamp,
            reason: reason.into(),
        }
    }

    /// Does this error mean the update was dropped before touching the grid?
    pub fn is_dropped_update(&self) -> bool {
        matches!(
            self,
            Error::TransformUnavailable { .. } | Error::MalformedReading(_)
        )
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Parse(e.to_string())
    }
}
