//! Cell styling types
//!
//! This module contains the styling model:
//! - [`Font`], [`Fill`], [`Border`], [`Alignment`], [`Protection`], [`NumberFormat`] - one facet each
//! - [`Color`] - Color representation
//! - [`BaseFormat`], [`Style`], [`Format`] - facet references plus applied flags
//! - [`Stylesheet`] - the interning registry that owns all of the above

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod format;
mod keyword;
mod number_format;
mod stylesheet;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{Border, BorderEdge, BorderLineStyle, BorderSide};
pub use color::{Color, ColorKind};
pub use fill::{Fill, GradientFill, GradientStop, GradientType, PatternFill, PatternType};
pub use font::{Font, Underline};
pub use format::{BaseFormat, BorderId, FillId, FontId, Format, Style};
pub use keyword::Keyword;
pub use number_format::NumberFormat;
pub use stylesheet::Stylesheet;

/// Cell protection settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Protection {
    /// Cell is locked (protected when sheet is protected)
    pub locked: bool,
    /// Formula is hidden when sheet is protected
    pub hidden: bool,
}

impl Protection {
    /// Create protection with both flags cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Create locked protection
    pub fn locked() -> Self {
        Self {
            locked: true,
            hidden: false,
        }
    }
}
