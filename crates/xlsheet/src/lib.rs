//! # xlsheet
//!
//! A spreadsheet style model with a full XLSX package round trip.
//!
//! ## Features
//!
//! - Fonts, fills, borders and number formats interned in one [`Stylesheet`]
//! - Named styles and cell formats keyed by style name
//! - Builtin number-format catalog with per-workbook overrides
//! - Read and write XLSX packages (styles, shared strings, worksheets, theme,
//!   thumbnail, defined names)
//!
//! ## Example
//!
//! ```rust
//! use xlsheet::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let bold = workbook.add_font(Font::default().with_bold(true));
//! workbook.create_style("Header").unwrap().base = BaseFormat::new().with_font(bold);
//! let header = workbook
//!     .add_format(Format::from_base(BaseFormat::new().with_font(bold)).with_style("Header"))
//!     .unwrap();
//!
//! let sheet = workbook.get_sheet_by_index_mut(0).unwrap();
//! sheet.set_value("A1", "Total").unwrap();
//! sheet.set_format("A1", header).unwrap();
//!
//! let bytes = workbook.save_to_vec().unwrap();
//! let back = Workbook::load_bytes(&bytes).unwrap();
//! assert_eq!(back.style("Header").unwrap().name(), "Header");
//! ```

pub mod prelude;

// Re-export core types
pub use xlsheet_core::{
    content_type, Alignment, BaseFormat, Border, BorderEdge, BorderId, BorderLineStyle,
    BorderSide, Cell, CellAddress, CellValue, Color, ColorKind, Error, ErrorKind, Fill, FillId,
    Font, FontId, Format, GradientFill, GradientStop, GradientType, HorizontalAlignment, Keyword,
    Manifest, NameScope, NamedRange, NamedRangeCollection, NumberFormat, PatternFill, PatternType,
    Protection, Relationship, RelationshipType, Relationships, Result, SheetHandle, Style,
    Stylesheet, Underline, VerticalAlignment, Workbook, WorkbookId, WorkbookSettings, Worksheet,
    MAX_COLS, MAX_ROWS, MAX_SHEET_NAME_LEN,
};

// Re-export I/O types
pub use xlsheet_xlsx::{
    read_stylesheet, read_stylesheet_bytes, write_stylesheet, write_stylesheet_bytes, XlsxError,
    XlsxReader, XlsxResult, XlsxWriteOptions, XlsxWriter, XmlElement,
};

/// The zip crate used for package archives
pub use xlsheet_xlsx::zip;

use std::io::{Read, Seek, Write};
use std::path::Path;

/// Extension trait for Workbook to add package I/O
pub trait WorkbookExt: Sized {
    /// Load a workbook from an XLSX file
    fn load<P: AsRef<Path>>(path: P) -> XlsxResult<Self>;

    /// Load a workbook from an in-memory XLSX package
    fn load_bytes(bytes: &[u8]) -> XlsxResult<Self>;

    /// Load a workbook from a seekable stream
    fn load_from<R: Read + Seek>(reader: R) -> XlsxResult<Self>;

    /// Load a workbook from an already opened zip archive
    fn load_archive<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Self>;

    /// Save the workbook to an XLSX file
    fn save<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()>;

    /// Save the workbook into a new in-memory package
    fn save_to_vec(&self) -> XlsxResult<Vec<u8>>;

    /// Save the workbook to a seekable stream
    fn save_to<W: Write + Seek>(&self, writer: W) -> XlsxResult<()>;
}

impl WorkbookExt for Workbook {
    fn load<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        XlsxReader::read_file(path)
    }

    fn load_bytes(bytes: &[u8]) -> XlsxResult<Workbook> {
        XlsxReader::read_bytes(bytes)
    }

    fn load_from<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        XlsxReader::read(reader)
    }

    fn load_archive<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Workbook> {
        XlsxReader::read_archive(archive)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> XlsxResult<()> {
        XlsxWriter::write_file(self, path)
    }

    fn save_to_vec(&self) -> XlsxResult<Vec<u8>> {
        XlsxWriter::to_vec(self)
    }

    fn save_to<W: Write + Seek>(&self, writer: W) -> XlsxResult<()> {
        XlsxWriter::write(self, writer)
    }
}
