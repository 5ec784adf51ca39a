use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Resource exhausted: cannot allocate node {requested} (limit {limit:?})")]
    ResourceExhausted {
        requested: usize,
        limit: Option<usize>,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Red-black invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl Error {
    /// Allocation can succeed later if nodes are erased, everything else is a bug
    /// in the caller or in the tree.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::ResourceExhausted { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::ResourceExhausted { .. } => "RESOURCE_EXHAUSTED",
            Error::Configuration { .. } => "CONFIG_ERROR",
            Error::InvariantViolation { .. } => "INVARIANT_VIOLATION",
        }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Error {
        Error::InvariantViolation {
            message: message.into(),
        }
    }
}
