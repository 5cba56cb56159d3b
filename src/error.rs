/// Error types for document model operations.
use thiserror::Error;

/// Result type for document model operations.
pub type Result<T> = std::result::Result<T, DomError>;

/// Error types for document model operations.
#[derive(Error, Debug)]
pub enum DomError {
    /// A caller-supplied value or operation failed a local precondition
    #[error("validation error: {0}")]
    Validation(String),

    /// Cross-reference or structural inconsistency in the document
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// XML parsing or generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// Part not found in the backing store
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for DomError {
    fn from(err: quick_xml::Error) -> Self {
        DomError::Xml(err.to_string())
    }
}

impl From<std::fmt::Error> for DomError {
    fn from(err: std::fmt::Error) -> Self {
        DomError::Xml(err.to_string())
    }
}
