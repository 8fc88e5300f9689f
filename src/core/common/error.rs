use std::fmt;

use crate::core::indexing::kdtree::KdTreeError;

#[derive(Debug)]
pub enum OxiclustError {
    /// A construction parameter was rejected; `parameter` names it.
    InvalidArgument { parameter: &'static str, message: String },
    Index(KdTreeError),
    Configuration(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Internal(String),
}

impl fmt::Display for OxiclustError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { parameter, message } => {
                write!(f, "Invalid argument '{}': {}", parameter, message)
            }
            Self::Index(e) => write!(f, "Index Error: {}", e),
            Self::Configuration(s) => write!(f, "Configuration error: {}", s),
            Self::Io(e) => write!(f, "IO Error: {}", e),
            Self::Json(e) => write!(f, "JSON Serialization/Deserialization Error: {}", e),
            Self::Internal(s) => write!(f, "Internal Error: {}", s),
        }
    }
}

impl std::error::Error for OxiclustError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Index(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

// Manual From implementations
impl From<KdTreeError> for OxiclustError {
    fn from(err: KdTreeError) -> Self {
        Self::Index(err)
    }
}

impl From<std::io::Error> for OxiclustError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for OxiclustError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl OxiclustError {
    /// Shorthand for `InvalidArgument`.
    #[must_use]
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument { parameter, message: message.into() }
    }
}
