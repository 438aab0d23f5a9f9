/// Convenience result type used across cdgplay.
pub type CdgResult<T> = Result<T, CdgError>;

/// Top-level error taxonomy used by decoder and renderer APIs.
#[derive(thiserror::Error, Debug)]
pub enum CdgError {
    /// Caller-supplied argument outside its domain (bad time value, empty range).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Stream-level condition reported by inspection helpers.
    #[error("decode error: {0}")]
    Decode(String),

    /// Errors while converting or writing rendered frames.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CdgError {
    /// Build a [`CdgError::InvalidArgument`] value.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Build a [`CdgError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`CdgError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
