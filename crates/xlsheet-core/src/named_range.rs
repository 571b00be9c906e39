//! Named range definitions (`definedNames` in the workbook part)

use crate::error::{Error, Result};

/// Scope of a named range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NameScope {
    /// Available throughout the workbook (global)
    Workbook,
    /// Local to the sheet at this position (`localSheetId`)
    Sheet(usize),
}

/// A named range definition
///
/// `refers_to` is kept as written, e.g. `Sheet1!$A$1:$D$10` or a constant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRange {
    pub name: String,
    pub scope: NameScope,
    pub refers_to: String,
    pub comment: Option<String>,
    pub hidden: bool,
}

impl NamedRange {
    /// Create a new named range
    pub fn new(name: impl Into<String>, refers_to: impl Into<String>, scope: NameScope) -> Self {
        Self {
            name: name.into(),
            scope,
            refers_to: refers_to.into(),
            comment: None,
            hidden: false,
        }
    }

    /// Create a workbook-scoped named range
    pub fn workbook_scope(name: impl Into<String>, refers_to: impl Into<String>) -> Self {
        Self::new(name, refers_to, NameScope::Workbook)
    }

    /// Mark this named range as hidden
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    fn same_key(&self, name: &str, scope: NameScope) -> bool {
        self.scope == scope && self.name.eq_ignore_ascii_case(name)
    }
}

/// Named ranges in definition order; names are unique per scope, ignoring ASCII case
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRangeCollection {
    ranges: Vec<NamedRange>,
}

impl NamedRangeCollection {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a new named range, failing with [`Error::NameCollision`] if the
    /// name already exists in that scope
    pub fn define(&mut self, range: NamedRange) -> Result<()> {
        if self.contains(&range.name, range.scope) {
            return Err(Error::NameCollision(range.name));
        }
        self.ranges.push(range);
        Ok(())
    }

    /// Look a name up from a sheet: the sheet's own scope first, then the workbook
    pub fn resolve(&self, name: &str, current_sheet: usize) -> Option<&NamedRange> {
        self.get(name, NameScope::Sheet(current_sheet))
            .or_else(|| self.get(name, NameScope::Workbook))
    }

    /// Get a named range by exact scope
    pub fn get(&self, name: &str, scope: NameScope) -> Option<&NamedRange> {
        self.ranges.iter().find(|r| r.same_key(name, scope))
    }

    /// Remove a named range
    pub fn remove(&mut self, name: &str, scope: NameScope) -> Option<NamedRange> {
        let idx = self.ranges.iter().position(|r| r.same_key(name, scope))?;
        Some(self.ranges.remove(idx))
    }

    /// Check if a name exists in the given scope
    pub fn contains(&self, name: &str, scope: NameScope) -> bool {
        self.get(name, scope).is_some()
    }

    /// Drop every range local to `sheet` and shift later local scopes down by one
    pub(crate) fn sheet_removed(&mut self, sheet: usize) {
        self.ranges.retain(|r| r.scope != NameScope::Sheet(sheet));
        for range in &mut self.ranges {
            if let NameScope::Sheet(idx) = &mut range.scope {
                if *idx > sheet {
                    *idx -= 1;
                }
            }
        }
    }

    /// Iterate over all named ranges in definition order
    pub fn iter(&self) -> impl Iterator<Item = &NamedRange> {
        self.ranges.iter()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}
