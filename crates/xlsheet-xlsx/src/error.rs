//! XLSX error types

use thiserror::Error;
use xlsheet_core::ErrorKind;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur during XLSX reading/writing
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Structurally invalid part
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Core error
    #[error(transparent)]
    Core(#[from] xlsheet_core::Error),
}

impl XlsxError {
    /// Create a malformed-markup error with a message
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        XlsxError::MalformedMarkup(msg.into())
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            XlsxError::Io(_) | XlsxError::Zip(_) => ErrorKind::IoFailure,
            XlsxError::Xml(_) | XlsxError::MalformedMarkup(_) | XlsxError::MissingPart(_) => {
                ErrorKind::MalformedMarkup
            }
            XlsxError::Core(e) => e.kind(),
        }
    }
}
