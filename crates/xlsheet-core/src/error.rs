//! Error types for xlsheet-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a failure.
///
/// Every concrete error reports one of these through [`Error::kind`], so callers
/// can branch on the category without matching each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required container element or attribute is missing or unreadable
    MalformedMarkup,
    /// A keyword is not part of a closed vocabulary
    UnknownEnumValue,
    /// A registry reference exceeds the registry's current size
    IndexOutOfRange,
    /// A name or index lookup missed
    NotFound,
    /// A duplicate worksheet title, relationship id, style name or format id
    NameCollision,
    /// A worksheet handle from a different workbook was used
    NotOwned,
    /// The underlying archive or stream failed
    IoFailure,
}

/// Errors that can occur in xlsheet-core
#[derive(Debug, Error)]
pub enum Error {
    /// Structurally invalid markup
    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    /// Keyword not recognised for the given vocabulary
    #[error("Unknown {vocabulary} value: {value:?}")]
    UnknownEnumValue {
        vocabulary: &'static str,
        value: String,
    },

    /// Registry reference out of bounds
    #[error("{table} index {index} out of range (len: {len})")]
    IndexOutOfRange {
        table: &'static str,
        index: usize,
        len: usize,
    },

    /// Lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// Duplicate key
    #[error("Name already exists: {0}")]
    NameCollision(String),

    /// Custom number format id inside the builtin range
    #[error("Number format id {0} is reserved for builtin formats")]
    ReservedNumberFormatId(u32),

    /// Worksheet handle belongs to another workbook
    #[error("Worksheet is not owned by this workbook")]
    NotOwned,

    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Sheet title that is empty, too long or contains a forbidden character
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),
}

impl Error {
    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MalformedMarkup(_) | Error::InvalidAddress(_) | Error::InvalidSheetName(_) => {
                ErrorKind::MalformedMarkup
            }
            Error::UnknownEnumValue { .. } => ErrorKind::UnknownEnumValue,
            Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::NameCollision(_) | Error::ReservedNumberFormatId(_) => ErrorKind::NameCollision,
            Error::NotOwned => ErrorKind::NotOwned,
        }
    }

    /// Create a malformed-markup error with a message
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Error::MalformedMarkup(msg.into())
    }

    /// Create an unknown-keyword error for a vocabulary
    pub fn unknown_enum(vocabulary: &'static str, value: &str) -> Self {
        Error::UnknownEnumValue {
            vocabulary,
            value: value.to_string(),
        }
    }
}
