//! Color representation

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// Which of the four color spaces a [`Color`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorKind {
    /// Automatic/default color
    #[default]
    Auto,

    /// ARGB color
    Rgb { a: u8, r: u8, g: u8, b: u8 },

    /// Indexed color (legacy palette, or the stylesheet's own `indexedColors`)
    Indexed(u32),

    /// Theme color
    ///
    /// Theme indices:
    /// 0 = Background 1 (light)
    /// 1 = Text 1 (dark)
    /// 2 = Background 2
    /// 3 = Text 2
    /// 4-9 = Accent 1-6
    Theme(u32),
}

/// A color with an optional tint
///
/// Tint ranges from -1.0 (darken fully) to 1.0 (lighten fully) and has no effect
/// on automatic colors.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    kind: ColorKind,
    tint: Option<f64>,
}

impl Color {
    /// The automatic color
    pub const AUTO: Color = Color {
        kind: ColorKind::Auto,
        tint: None,
    };

    /// Create an opaque RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(0xFF, r, g, b)
    }

    /// Create an ARGB color
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color {
            kind: ColorKind::Rgb { a, r, g, b },
            tint: None,
        }
    }

    /// Create a theme color
    pub const fn theme(index: u32) -> Self {
        Color {
            kind: ColorKind::Theme(index),
            tint: None,
        }
    }

    /// Create an indexed color
    pub const fn indexed(index: u32) -> Self {
        Color {
            kind: ColorKind::Indexed(index),
            tint: None,
        }
    }

    /// Create from a hex string ("FF0000", "#FF0000" or the 8-digit "FFFF0000" ARGB form)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        let byte = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| Error::malformed(format!("invalid rgb color {hex:?}")))
        };

        match digits.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(Error::malformed(format!("invalid rgb color {hex:?}"))),
        }
    }

    /// Set the tint, returning the modified color
    ///
    /// Tint is clamped to -1.0..=1.0 and ignored for automatic colors.
    pub fn with_tint(mut self, tint: f64) -> Self {
        if !self.is_auto() {
            self.tint = Some(tint.clamp(-1.0, 1.0));
        }
        self
    }

    /// The color space of this color
    pub fn kind(&self) -> ColorKind {
        self.kind
    }

    /// The tint, if one was set
    pub fn tint(&self) -> Option<f64> {
        self.tint
    }

    /// Check if color is automatic/default
    pub fn is_auto(&self) -> bool {
        matches!(self.kind, ColorKind::Auto)
    }

    /// The 8-digit ARGB hex string for RGB colors
    pub fn to_argb_hex(&self) -> Option<String> {
        match self.kind {
            ColorKind::Rgb { a, r, g, b } => Some(format!("{:02X}{:02X}{:02X}{:02X}", a, r, g, b)),
            _ => None,
        }
    }

    // Common colors
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.tint.map(f64::to_bits) == other.tint.map(f64::to_bits)
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.tint.map(f64::to_bits).hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ColorKind::Auto => write!(f, "auto")?,
            ColorKind::Rgb { a, r, g, b } => write!(f, "#{:02X}{:02X}{:02X}{:02X}", a, r, g, b)?,
            ColorKind::Theme(i) => write!(f, "theme({})", i)?,
            ColorKind::Indexed(i) => write!(f, "indexed({})", i)?,
        }
        if let Some(tint) = self.tint {
            write!(f, " tint {}", tint)?;
        }
        Ok(())
    }
}
