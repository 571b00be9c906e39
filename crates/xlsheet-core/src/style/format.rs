//! Named styles and cell formats
//!
//! Both share [`BaseFormat`]: references into the owning stylesheet's interned
//! font/fill/border tables, a number format id, inline alignment and protection,
//! and one "applied" flag per facet.

use std::ops::{Deref, DerefMut};

use super::{Alignment, Protection};

/// Index of a font in the stylesheet's font table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontId(pub u32);

/// Index of a fill in the stylesheet's fill table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FillId(pub u32);

/// Index of a border in the stylesheet's border table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderId(pub u32);

/// The facets shared by styles and formats
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseFormat {
    pub font_id: FontId,
    pub fill_id: FillId,
    pub border_id: BorderId,
    /// Builtin or custom number format id
    pub number_format_id: u32,
    pub alignment: Alignment,
    pub protection: Protection,

    pub font_applied: bool,
    pub fill_applied: bool,
    pub border_applied: bool,
    pub number_format_applied: bool,
    pub alignment_applied: bool,
    pub protection_applied: bool,
}

impl BaseFormat {
    /// Create a format referencing entry 0 of every table, nothing applied
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference a font and mark it applied
    pub fn with_font(mut self, id: FontId) -> Self {
        self.font_id = id;
        self.font_applied = true;
        self
    }

    /// Reference a fill and mark it applied
    pub fn with_fill(mut self, id: FillId) -> Self {
        self.fill_id = id;
        self.fill_applied = true;
        self
    }

    /// Reference a border and mark it applied
    pub fn with_border(mut self, id: BorderId) -> Self {
        self.border_id = id;
        self.border_applied = true;
        self
    }

    /// Reference a number format and mark it applied
    pub fn with_number_format(mut self, id: u32) -> Self {
        self.number_format_id = id;
        self.number_format_applied = true;
        self
    }

    /// Set inline alignment and mark it applied
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self.alignment_applied = true;
        self
    }

    /// Set inline protection and mark it applied
    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self.protection_applied = true;
        self
    }
}

/// A named, reusable formatting template
///
/// The name is the stable key; renaming is not supported.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    name: String,
    /// Builtin style id (0 = "Normal")
    pub builtin_id: u32,
    /// Hidden from the style gallery
    pub hidden: bool,
    pub base: BaseFormat,
}

impl Style {
    /// Create a style with default facets
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            builtin_id: 0,
            hidden: false,
            base: BaseFormat::default(),
        }
    }

    /// The "Normal" style every workbook starts with
    pub fn normal() -> Self {
        Self::new("Normal")
    }

    /// The style name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the facets, returning the modified style
    pub fn with_base(mut self, base: BaseFormat) -> Self {
        self.base = base;
        self
    }

    /// Set the builtin id, returning the modified style
    pub fn with_builtin_id(mut self, id: u32) -> Self {
        self.builtin_id = id;
        self
    }
}

impl Deref for Style {
    type Target = BaseFormat;

    fn deref(&self) -> &BaseFormat {
        &self.base
    }
}

impl DerefMut for Style {
    fn deref_mut(&mut self) -> &mut BaseFormat {
        &mut self.base
    }
}

/// One concrete formatting combination applied to cells
///
/// Value-identical formats are allowed: each entry is a usage point, and cells
/// refer to formats by position.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Format {
    pub base: BaseFormat,
    /// Name of the owning style
    pub style: Option<String>,
}

impl Format {
    /// Create a format with default facets and no owning style
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a format from facets
    pub fn from_base(base: BaseFormat) -> Self {
        Self { base, style: None }
    }

    /// Attach an owning style by name
    pub fn with_style<S: Into<String>>(mut self, name: S) -> Self {
        self.style = Some(name.into());
        self
    }
}

impl Deref for Format {
    type Target = BaseFormat;

    fn deref(&self) -> &BaseFormat {
        &self.base
    }
}

impl DerefMut for Format {
    fn deref_mut(&mut self) -> &mut BaseFormat {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_mark_facets_applied() {
        let base = BaseFormat::new().with_font(FontId(2)).with_number_format(10);
        assert!(base.font_applied);
        assert!(base.number_format_applied);
        assert!(!base.fill_applied);
        assert_eq!(base.font_id, FontId(2));
    }

    #[test]
    fn test_style_deref() {
        let mut style = Style::new("Header");
        style.fill_id = FillId(3);
        assert_eq!(style.base.fill_id, FillId(3));
        assert_eq!(style.name(), "Header");
    }
}
