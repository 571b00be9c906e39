//! Border style types

use super::keyword::Keyword;
use super::Color;

/// Border style for a cell
///
/// A side left as `None` produces no element in the styles part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Border {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
    pub diagonal: Option<BorderEdge>,
    pub vertical: Option<BorderEdge>,
    pub horizontal: Option<BorderEdge>,
}

/// Names the sides of a [`Border`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Left,
    Right,
    Top,
    Bottom,
    Diagonal,
    Vertical,
    Horizontal,
}

impl BorderSide {
    /// All sides, in the order their elements appear in the styles part
    pub const ALL: [BorderSide; 7] = [
        BorderSide::Left,
        BorderSide::Right,
        BorderSide::Top,
        BorderSide::Bottom,
        BorderSide::Diagonal,
        BorderSide::Vertical,
        BorderSide::Horizontal,
    ];

    /// Element name of this side
    pub fn element_name(self) -> &'static str {
        match self {
            BorderSide::Left => "left",
            BorderSide::Right => "right",
            BorderSide::Top => "top",
            BorderSide::Bottom => "bottom",
            BorderSide::Diagonal => "diagonal",
            BorderSide::Vertical => "vertical",
            BorderSide::Horizontal => "horizontal",
        }
    }
}

impl Border {
    /// Create a new border style with no sides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set left, right, top and bottom to the same edge
    pub fn outline(style: BorderLineStyle, color: Color) -> Self {
        let edge = Some(BorderEdge::new(style, color));
        Self {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
            ..Default::default()
        }
    }

    /// Get one side
    pub fn side(&self, side: BorderSide) -> Option<&BorderEdge> {
        match side {
            BorderSide::Left => self.left.as_ref(),
            BorderSide::Right => self.right.as_ref(),
            BorderSide::Top => self.top.as_ref(),
            BorderSide::Bottom => self.bottom.as_ref(),
            BorderSide::Diagonal => self.diagonal.as_ref(),
            BorderSide::Vertical => self.vertical.as_ref(),
            BorderSide::Horizontal => self.horizontal.as_ref(),
        }
    }

    /// Replace one side
    pub fn set_side(&mut self, side: BorderSide, edge: Option<BorderEdge>) {
        let slot = match side {
            BorderSide::Left => &mut self.left,
            BorderSide::Right => &mut self.right,
            BorderSide::Top => &mut self.top,
            BorderSide::Bottom => &mut self.bottom,
            BorderSide::Diagonal => &mut self.diagonal,
            BorderSide::Vertical => &mut self.vertical,
            BorderSide::Horizontal => &mut self.horizontal,
        };
        *slot = edge;
    }

    /// Set one side, returning the modified border
    pub fn with_side(mut self, side: BorderSide, style: BorderLineStyle, color: Color) -> Self {
        self.set_side(side, Some(BorderEdge::new(style, color)));
        self
    }

    /// Check if all sides are absent
    pub fn is_empty(&self) -> bool {
        BorderSide::ALL.iter().all(|s| self.side(*s).is_none())
    }
}

/// A single border edge; both the line style and the color are optional
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BorderEdge {
    pub style: Option<BorderLineStyle>,
    pub color: Option<Color>,
}

impl BorderEdge {
    /// Create a new border edge
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self {
            style: Some(style),
            color: Some(color),
        }
    }

    /// Create a thin black border
    pub fn thin() -> Self {
        Self::new(BorderLineStyle::Thin, Color::BLACK)
    }
}

/// Border line styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BorderLineStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    /// Hair line (very thin)
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl Keyword for BorderLineStyle {
    const VOCABULARY: &'static str = "border style";
    const TABLE: &'static [(Self, &'static str)] = &[
        (BorderLineStyle::None, "none"),
        (BorderLineStyle::Thin, "thin"),
        (BorderLineStyle::Medium, "medium"),
        (BorderLineStyle::Thick, "thick"),
        (BorderLineStyle::Dashed, "dashed"),
        (BorderLineStyle::Dotted, "dotted"),
        (BorderLineStyle::Double, "double"),
        (BorderLineStyle::Hair, "hair"),
        (BorderLineStyle::MediumDashed, "mediumDashed"),
        (BorderLineStyle::DashDot, "dashDot"),
        (BorderLineStyle::MediumDashDot, "mediumDashDot"),
        (BorderLineStyle::DashDotDot, "dashDotDot"),
        (BorderLineStyle::MediumDashDotDot, "mediumDashDotDot"),
        (BorderLineStyle::SlantDashDot, "slantDashDot"),
    ];
}
