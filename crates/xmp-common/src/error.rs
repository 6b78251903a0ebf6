//! Error types for pano-xmp crates.

use thiserror::Error;

/// Result type alias using XmpError.
pub type XmpResult<T> = Result<T, XmpError>;

/// Primary error type for XMP document operations.
#[derive(Debug, Error)]
pub enum XmpError {
    // === Document Errors ===
    #[error("Document is read-only")]
    ReadOnlyDocument,

    #[error("Invalid node handle: {0}")]
    InvalidNodeHandle(usize),

    // === Schema Errors ===
    #[error("Invalid panorama descriptor: {0}")]
    InvalidDescriptor(String),

    // === Packet Errors ===
    #[error("Failed to parse XMP packet: {0}")]
    XmlParse(String),
}

impl From<quick_xml::Error> for XmpError {
    fn from(err: quick_xml::Error) -> Self {
        XmpError::XmlParse(err.to_string())
    }
}
