//! Error types for ENML conversion.

use std::str::Utf8Error;

/// Error while converting a note to HTML.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EnmlError {
    /// The note body is not well-formed XML.
    #[error("malformed markup: {0}")]
    MalformedMarkup(#[from] MarkupError),

    /// An `en-media` element references a hash with no matching resource.
    #[error("resource not found for hash {hash:?}")]
    ResourceNotFound {
        /// Hex-encoded content hash taken from the `hash` attribute.
        hash: String,
    },
}

/// Reason a note body could not be parsed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MarkupError {
    /// XML syntax error.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] Utf8Error),

    /// XML attribute error.
    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[error("encoding error: {0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Undefined entity, illegal character reference or bare `&`.
    #[error("invalid reference: {0}")]
    Reference(String),

    /// The event stream does not describe a single-rooted document.
    #[error("{0}")]
    Structure(String),
}

impl MarkupError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }
}
