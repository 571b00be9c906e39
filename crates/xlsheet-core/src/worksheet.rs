//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{Cell, CellAddress, CellValue};
use crate::error::Result;
use crate::workbook::WorkbookId;

/// Identifies one worksheet of one workbook
///
/// Handles are plain values; a handle whose sheet has been removed simply stops
/// resolving, and a handle from another workbook is rejected with
/// [`Error::NotOwned`](crate::Error::NotOwned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SheetHandle {
    pub(crate) workbook: WorkbookId,
    pub(crate) sheet_id: u32,
}

impl SheetHandle {
    /// The package-level sheet id (`sheetId` in the workbook part)
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }
}

/// A worksheet (single sheet in a workbook)
///
/// Cells are stored sparsely and iterate in row-major order.
#[derive(Debug, Clone)]
pub struct Worksheet {
    owner: WorkbookId,
    sheet_id: u32,
    title: String,
    /// Relationship id of this sheet's part in the workbook relationships
    rel_id: String,
    cells: BTreeMap<(u32, u16), Cell>,
}

impl Worksheet {
    pub(crate) fn new(owner: WorkbookId, sheet_id: u32, title: String, rel_id: String) -> Self {
        Self {
            owner,
            sheet_id,
            title,
            rel_id,
            cells: BTreeMap::new(),
        }
    }

    /// A handle that identifies this sheet within its workbook
    pub fn handle(&self) -> SheetHandle {
        SheetHandle {
            workbook: self.owner,
            sheet_id: self.sheet_id,
        }
    }

    pub(crate) fn set_owner(&mut self, owner: WorkbookId) {
        self.owner = owner;
    }

    pub(crate) fn set_sheet_id(&mut self, sheet_id: u32) {
        self.sheet_id = sheet_id;
    }

    pub(crate) fn set_rel_id(&mut self, rel_id: String) {
        self.rel_id = rel_id;
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// The package-level sheet id
    pub fn sheet_id(&self) -> u32 {
        self.sheet_id
    }

    /// Get the sheet title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Relationship id of this sheet's part
    pub fn rel_id(&self) -> &str {
        &self.rel_id
    }

    // === Cell Access ===

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&Cell>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_at(addr.row, addr.col))
    }

    /// Get a cell by row and column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get a cell's value, [`CellValue::Empty`] when unset
    pub fn value(&self, address: &str) -> Result<CellValue> {
        Ok(self
            .cell(address)?
            .map(|c| c.value.clone())
            .unwrap_or_default())
    }

    /// Set a cell value by address string, keeping any existing format
    pub fn set_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_value_at(addr.row, addr.col, value);
        Ok(())
    }

    /// Set a cell value by row and column indices, keeping any existing format
    pub fn set_value_at<V: Into<CellValue>>(&mut self, row: u32, col: u16, value: V) {
        self.cells.entry((row, col)).or_default().value = value.into();
    }

    /// Attach a cell-format index to a cell by address string
    ///
    /// The index is checked against the workbook's format table when the
    /// workbook is saved.
    pub fn set_format(&mut self, address: &str, format: usize) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_format_at(addr.row, addr.col, format);
        Ok(())
    }

    /// Attach a cell-format index by row and column indices
    pub fn set_format_at(&mut self, row: u32, col: u16, format: usize) {
        self.cells.entry((row, col)).or_default().format = Some(format);
    }

    /// Store a complete cell
    pub fn set_cell_at(&mut self, row: u32, col: u16, cell: Cell) {
        self.cells.insert((row, col), cell);
    }

    /// Remove a cell, returning it if it existed
    pub fn clear_cell_at(&mut self, row: u32, col: u16) -> Option<Cell> {
        self.cells.remove(&(row, col))
    }

    /// Number of populated cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if no cell is populated
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over populated cells in row-major order
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter().map(|(&(row, col), cell)| (row, col, cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Worksheet {
        Worksheet::new(WorkbookId::next(), 1, "Sheet1".into(), "rId1".into())
    }

    #[test]
    fn test_set_and_get() {
        let mut ws = sheet();
        ws.set_value("B2", 42.0).unwrap();
        ws.set_format("B2", 3).unwrap();
        ws.set_value("B2", "text").unwrap();

        let cell = ws.cell("B2").unwrap().unwrap();
        assert_eq!(cell.value, CellValue::string("text"));
        assert_eq!(cell.format, Some(3));
        assert_eq!(ws.value("Z9").unwrap(), CellValue::Empty);
        assert!(ws.set_value("9Z", 1.0).is_err());
    }

    #[test]
    fn test_row_major_iteration() {
        let mut ws = sheet();
        ws.set_value_at(1, 0, 3.0);
        ws.set_value_at(0, 5, 2.0);
        ws.set_value_at(0, 1, 1.0);

        let order: Vec<_> = ws.iter_cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(order, vec![(0, 1), (0, 5), (1, 0)]);
    }
}
