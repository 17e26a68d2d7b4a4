//! Error types for loading CAEX documents

use std::path::PathBuf;

/// Result type for loading CAEX documents
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading, sniffing or generalizing a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not well-formed XML
    #[error("XML parsing error: {0}")]
    Xml(String),

    /// The file could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `SchemaVersion` names a version no model exists for
    #[error("unsupported CAEX schema version '{0}'")]
    UnsupportedSchemaVersion(String),

    /// The document is well-formed but not a usable CAEX file
    #[error("malformed CAEX document: {0}")]
    MalformedDocument(String),

    /// The typed model could not be generalized
    #[error("generalization failed: {0}")]
    Generalize(#[from] caex_generic::Error),
}

impl Error {
    /// Create a new malformed document error
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedDocument(msg.into())
    }
}
