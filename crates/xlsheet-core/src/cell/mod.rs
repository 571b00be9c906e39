//! Cell-related types and utilities
//!
//! This module contains:
//! - [`CellValue`] - The value stored in a cell
//! - [`CellAddress`] - A cell's location (e.g., "A1")
//! - [`Cell`] - A value plus an optional index into the cell-format table

mod address;
mod value;

pub use address::CellAddress;
pub use value::CellValue;

/// One populated cell of a worksheet
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Cell content
    pub value: CellValue,
    /// Index into the workbook's cell-format table, `None` for the default format
    pub format: Option<usize>,
}

impl Cell {
    /// Create an unformatted cell
    pub fn new<V: Into<CellValue>>(value: V) -> Self {
        Self {
            value: value.into(),
            format: None,
        }
    }

    /// Attach a cell-format index
    pub fn with_format(mut self, format: usize) -> Self {
        self.format = Some(format);
        self
    }
}
