//! Prelude module - common imports for xlsheet users
//!
//! ```rust
//! use xlsheet::prelude::*;
//! ```

pub use crate::{
    // Style types
    Alignment,
    BaseFormat,
    Border,
    BorderLineStyle,
    BorderSide,
    // Cell types
    CellAddress,
    CellValue,
    Color,
    // Error types
    Error,
    ErrorKind,
    Fill,
    Font,
    Format,
    HorizontalAlignment,
    NamedRange,
    NumberFormat,
    PatternType,
    Result,
    Style,
    Stylesheet,
    Underline,
    VerticalAlignment,
    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
    // I/O types
    XlsxError,
    XlsxReader,
    XlsxWriter,
};
