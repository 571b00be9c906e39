//! # xlsheet-core
//!
//! Core data structures for the xlsheet spreadsheet library.
//!
//! This crate provides the in-memory document model:
//! - [`Workbook`], [`Worksheet`] - The main document structures
//! - [`Stylesheet`] - Interned fonts, fills, borders and number formats, plus
//!   named [`Style`]s and cell [`Format`]s
//! - [`Relationships`] and [`Manifest`] - Package bookkeeping
//!
//! ## Example
//!
//! ```rust
//! use xlsheet_core::{BaseFormat, Font, Format, Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let bold = workbook.add_font(Font::default().with_bold(true));
//! workbook
//!     .add_style(Style::new("Header").with_base(BaseFormat::new().with_font(bold)))
//!     .unwrap();
//! let header = workbook
//!     .add_format(Format::from_base(BaseFormat::new().with_font(bold)).with_style("Header"))
//!     .unwrap();
//!
//! let sheet = workbook.get_sheet_by_index_mut(0).unwrap();
//! sheet.set_value("A1", "Name").unwrap();
//! sheet.set_format("A1", header).unwrap();
//! ```

pub mod cell;
pub mod error;
pub mod manifest;
pub mod named_range;
pub mod relationship;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{Cell, CellAddress, CellValue};
pub use error::{Error, ErrorKind, Result};
pub use manifest::{content_type, Manifest};
pub use named_range::{NameScope, NamedRange, NamedRangeCollection};
pub use relationship::{Relationship, RelationshipType, Relationships};
pub use workbook::{Workbook, WorkbookId, WorkbookSettings};
pub use worksheet::{SheetHandle, Worksheet};

// Re-export all style types for convenience
pub use style::{
    Alignment, BaseFormat, Border, BorderEdge, BorderId, BorderLineStyle, BorderSide, Color,
    ColorKind, Fill, FillId, Font, FontId, Format, GradientFill, GradientStop, GradientType,
    HorizontalAlignment, Keyword, NumberFormat, PatternFill, PatternType, Protection, Style,
    Stylesheet, Underline, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
