//! Text alignment types

use super::keyword::Keyword;

/// Text alignment settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Horizontal alignment, if set
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical alignment, if set
    pub vertical: Option<VerticalAlignment>,
    /// Wrap text
    pub wrap_text: bool,
    /// Shrink to fit
    pub shrink_to_fit: bool,
}

impl Alignment {
    /// Create a new default alignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set horizontal alignment
    pub fn with_horizontal(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = Some(align);
        self
    }

    /// Set vertical alignment
    pub fn with_vertical(mut self, align: VerticalAlignment) -> Self {
        self.vertical = Some(align);
        self
    }

    /// Enable text wrapping
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap_text = wrap;
        self
    }

    /// Enable shrink to fit
    pub fn with_shrink_to_fit(mut self, shrink: bool) -> Self {
        self.shrink_to_fit = shrink;
        self
    }
}

/// Horizontal alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HorizontalAlignment {
    /// General alignment (text left, numbers right)
    General,
    Left,
    Center,
    Right,
    /// Repeat content to fill cell width
    Fill,
    Justify,
    /// Center across selection
    CenterContinuous,
    Distributed,
}

impl Keyword for HorizontalAlignment {
    const VOCABULARY: &'static str = "horizontal alignment";
    const TABLE: &'static [(Self, &'static str)] = &[
        (HorizontalAlignment::General, "general"),
        (HorizontalAlignment::Left, "left"),
        (HorizontalAlignment::Center, "center"),
        (HorizontalAlignment::Right, "right"),
        (HorizontalAlignment::Fill, "fill"),
        (HorizontalAlignment::Justify, "justify"),
        (HorizontalAlignment::CenterContinuous, "centerContinuous"),
        (HorizontalAlignment::Distributed, "distributed"),
    ];
}

/// Vertical alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

impl Keyword for VerticalAlignment {
    const VOCABULARY: &'static str = "vertical alignment";
    const TABLE: &'static [(Self, &'static str)] = &[
        (VerticalAlignment::Top, "top"),
        (VerticalAlignment::Center, "center"),
        (VerticalAlignment::Bottom, "bottom"),
        (VerticalAlignment::Justify, "justify"),
        (VerticalAlignment::Distributed, "distributed"),
    ];
}
