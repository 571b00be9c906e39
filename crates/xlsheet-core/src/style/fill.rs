//! Fill/background style types

use super::keyword::Keyword;
use super::Color;

/// Fill style for cell background
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fill {
    /// Pattern fill (`patternType="none"` is the empty fill)
    Pattern(PatternFill),

    /// Gradient fill
    Gradient(GradientFill),
}

impl Default for Fill {
    fn default() -> Self {
        Fill::Pattern(PatternFill::default())
    }
}

impl Fill {
    /// Create a fill of the given pattern type with no colors
    pub fn pattern(pattern_type: PatternType) -> Self {
        Fill::Pattern(PatternFill {
            pattern_type,
            foreground: None,
            background: None,
        })
    }

    /// Create a solid fill with the given color
    pub fn solid(color: Color) -> Self {
        Fill::Pattern(PatternFill {
            pattern_type: PatternType::Solid,
            foreground: Some(color),
            background: None,
        })
    }

    /// Create a gradient fill of the given type with no stops
    pub fn gradient(gradient_type: GradientType) -> Self {
        Fill::Gradient(GradientFill {
            gradient_type,
            ..Default::default()
        })
    }

    /// Check if this is a "no fill"
    pub fn is_none(&self) -> bool {
        matches!(self, Fill::Pattern(p) if p.pattern_type == PatternType::None)
    }
}

/// A pattern fill
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatternFill {
    pub pattern_type: PatternType,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
}

/// A gradient fill
///
/// Floating-point fields compare and hash by bit pattern.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientFill {
    pub gradient_type: GradientType,
    /// Angle of a linear gradient in degrees
    pub degree: f64,
    /// Path gradient margins (0.0 to 1.0)
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    /// Stops in document order
    pub stops: Vec<GradientStop>,
}

impl GradientFill {
    /// Append a stop, returning the modified gradient
    pub fn with_stop(mut self, position: f64, color: Color) -> Self {
        self.stops.push(GradientStop::new(position, color));
        self
    }

    fn bits(&self) -> [u64; 5] {
        [self.degree, self.left, self.right, self.top, self.bottom].map(f64::to_bits)
    }
}

impl PartialEq for GradientFill {
    fn eq(&self, other: &Self) -> bool {
        self.gradient_type == other.gradient_type
            && self.bits() == other.bits()
            && self.stops == other.stops
    }
}

impl Eq for GradientFill {}

impl std::hash::Hash for GradientFill {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.gradient_type.hash(state);
        self.bits().hash(state);
        self.stops.hash(state);
    }
}

impl std::hash::Hash for Fill {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Fill::Pattern(p) => p.hash(state),
            Fill::Gradient(g) => g.hash(state),
        }
    }
}

impl Eq for Fill {}

/// Pattern fill types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternType {
    /// No pattern
    #[default]
    None,
    /// Solid (100% foreground)
    Solid,
    /// 50% gray
    MediumGray,
    /// 75% gray
    DarkGray,
    /// 25% gray
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
    /// 12.5% gray
    Gray125,
    /// 6.25% gray
    Gray0625,
}

impl Keyword for PatternType {
    const VOCABULARY: &'static str = "pattern fill type";
    const TABLE: &'static [(Self, &'static str)] = &[
        (PatternType::None, "none"),
        (PatternType::Solid, "solid"),
        (PatternType::MediumGray, "mediumGray"),
        (PatternType::DarkGray, "darkGray"),
        (PatternType::LightGray, "lightGray"),
        (PatternType::DarkHorizontal, "darkHorizontal"),
        (PatternType::DarkVertical, "darkVertical"),
        (PatternType::DarkDown, "darkDown"),
        (PatternType::DarkUp, "darkUp"),
        (PatternType::DarkGrid, "darkGrid"),
        (PatternType::DarkTrellis, "darkTrellis"),
        (PatternType::LightHorizontal, "lightHorizontal"),
        (PatternType::LightVertical, "lightVertical"),
        (PatternType::LightDown, "lightDown"),
        (PatternType::LightUp, "lightUp"),
        (PatternType::LightGrid, "lightGrid"),
        (PatternType::LightTrellis, "lightTrellis"),
        (PatternType::Gray125, "gray125"),
        (PatternType::Gray0625, "gray0625"),
    ];
}

/// Gradient types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GradientType {
    /// Linear gradient
    #[default]
    Linear,
    /// Radial/path gradient
    Path,
}

impl Keyword for GradientType {
    const VOCABULARY: &'static str = "gradient fill type";
    const TABLE: &'static [(Self, &'static str)] =
        &[(GradientType::Linear, "linear"), (GradientType::Path, "path")];
}

/// Gradient stop (position and color)
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradientStop {
    /// Position (0.0 to 1.0)
    pub position: f64,
    /// Color at this position
    pub color: Color,
}

impl GradientStop {
    /// Create a new gradient stop
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

impl PartialEq for GradientStop {
    fn eq(&self, other: &Self) -> bool {
        self.position.to_bits() == other.position.to_bits() && self.color == other.color
    }
}

impl Eq for GradientStop {}

impl std::hash::Hash for GradientStop {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.position.to_bits().hash(state);
        self.color.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_is_none() {
        assert!(Fill::default().is_none());
        assert!(!Fill::solid(Color::RED).is_none());
    }

    #[test]
    fn test_gradient_hash_distinguishes_stops() {
        let a = Fill::Gradient(
            GradientFill::default()
                .with_stop(0.0, Color::WHITE)
                .with_stop(1.0, Color::BLUE),
        );
        let b = Fill::Gradient(
            GradientFill::default()
                .with_stop(0.0, Color::WHITE)
                .with_stop(1.0, Color::RED),
        );
        let set: HashSet<Fill> = [a.clone(), b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_signed_zero_stops_are_distinct() {
        let at = |position: f64| Fill::Gradient(GradientFill::default().with_stop(position, Color::RED));
        assert_ne!(at(0.0), at(-0.0));
        assert_eq!(at(f64::NAN), at(f64::NAN));
    }
}
