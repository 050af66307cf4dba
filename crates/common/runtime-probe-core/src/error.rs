use thiserror::Error;

/// Errors raised by host-side probing collaborators.
///
/// The detection contract itself is total: these never cross
/// [`parse`](crate::parse) or [`resolve`](crate::resolve), which degrade to the best
/// identity derivable. Platform collaborators use this type internally and
/// report `None` at the trait boundary.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("I/O error while probing host: {0}")]
    Io(#[from] std::io::Error),

    #[error("registry error: {0}")]
    Registry(String),

    #[error("malformed version: {0}")]
    Version(#[from] semver::Error),
}

impl ProbeError {
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry(message.into())
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;
