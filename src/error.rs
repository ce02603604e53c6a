//! Error types for pdfstory.

use std::io;
use thiserror::Error;

use crate::model::SemanticStyle;

/// Result type alias for pdfstory operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a conversion before any story is built.
///
/// Problems with individual fragments are never reported through this type;
/// they are recorded as [`Diagnostic`](crate::parser::Diagnostic)s instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading fragment dumps or configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a fragment dump or configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required semantic style has no anchor match anywhere in the corpus.
    #[error("required style '{style}' not found using anchor '{anchor}'")]
    MissingRequiredStyle {
        /// The style that could not be calibrated
        style: SemanticStyle,
        /// The anchor text that was searched for ("" when none was configured)
        anchor: String,
    },

    /// The document code names a family the configuration does not know.
    #[error("document family '{0}' does not exist in the configuration")]
    UnknownFamily(String),

    /// The configuration is structurally invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fragment input is not in any recognised shape.
    #[error("unknown fragment format: expected a fragment array, NDJSON or a page dump")]
    UnknownFormat,

    /// Invalid page selection string.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
