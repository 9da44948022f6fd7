//! Error types for XML document handling.

use thiserror::Error;

use crate::base::Position;

/// Errors that can occur while reading or writing XML documents.
#[derive(Debug, Error)]
pub enum XmlError {
    /// Malformed XML at a known location.
    #[error("XML error at {position}: {message}")]
    Syntax { position: Position, message: String },

    /// XML error without a useful location.
    #[error("XML error: {0}")]
    Xml(String),

    /// Tag, attribute or text that is not valid UTF-8.
    #[error("Invalid UTF-8 in {0}")]
    InvalidUtf8(&'static str),

    /// The document has no root element.
    #[error("Missing root element")]
    MissingRoot,

    /// The document ended inside an element.
    #[error("Unclosed element: {0}")]
    Unclosed(String),
}

impl XmlError {
    /// Create an XML error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }

    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }
}
