//! # xlsheet-xlsx
//!
//! XLSX (Office Open XML) package reader and writer for xlsheet.
//!
//! The package is a zip archive of XML parts. Each part is parsed into an
//! [`XmlElement`] tree and translated into the [`xlsheet_core::Workbook`]
//! model; writing runs the same translation in reverse.

pub mod error;
mod escape;
mod package;
pub mod reader;
pub mod styles;
pub mod writer;
pub mod xml;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use styles::{read_stylesheet, read_stylesheet_bytes, write_stylesheet, write_stylesheet_bytes};
pub use writer::{XlsxWriteOptions, XlsxWriter};
pub use xml::XmlElement;

/// Re-exported so callers can hand an open archive to [`XlsxReader::read_archive`]
pub use zip;
