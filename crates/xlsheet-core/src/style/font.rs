//! Font style types

use super::keyword::Keyword;
use super::Color;

/// Font settings
///
/// Equality and hashing compare `size` by bit pattern, so every value interns
/// consistently.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    /// Font name (e.g., "Calibri", "Arial")
    pub name: String,
    /// Font size in points
    pub size: f64,
    /// Font family id (1 = Roman, 2 = Swiss, ...)
    pub family: Option<u32>,
    /// Font scheme ("minor", "major")
    pub scheme: Option<String>,
    /// Bold
    pub bold: bool,
    /// Italic
    pub italic: bool,
    /// Strikethrough
    pub strikethrough: bool,
    /// Underline style
    pub underline: Option<Underline>,
    /// Font color
    pub color: Option<Color>,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Calibri".to_string(),
            size: 11.0,
            family: Some(2),
            scheme: Some("minor".to_string()),
            bold: false,
            italic: false,
            strikethrough: false,
            underline: None,
            color: Some(Color::theme(1)),
        }
    }
}

impl Font {
    /// Create a font with the given name and size and nothing else set
    pub fn new<S: Into<String>>(name: S, size: f64) -> Self {
        Self {
            name: name.into(),
            size,
            family: None,
            scheme: None,
            bold: false,
            italic: false,
            strikethrough: false,
            underline: None,
            color: None,
        }
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set italic
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Set underline
    ///
    /// `Underline::None` clears the setting, as no `<u>` element is written for it.
    pub fn with_underline(mut self, underline: Underline) -> Self {
        self.underline = (underline != Underline::None).then_some(underline);
        self
    }

    /// Set strikethrough
    pub fn with_strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set family id
    pub fn with_family(mut self, family: u32) -> Self {
        self.family = Some(family);
        self
    }

    /// Set scheme
    pub fn with_scheme<S: Into<String>>(mut self, scheme: S) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Whether any underline other than `none` is set
    pub fn is_underline(&self) -> bool {
        !matches!(self.underline, None | Some(Underline::None))
    }
}

impl PartialEq for Font {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.size.to_bits() == other.size.to_bits()
            && self.family == other.family
            && self.scheme == other.scheme
            && self.bold == other.bold
            && self.italic == other.italic
            && self.strikethrough == other.strikethrough
            && self.underline == other.underline
            && self.color == other.color
    }
}

impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.to_bits().hash(state);
        self.family.hash(state);
        self.scheme.hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.strikethrough.hash(state);
        self.underline.hash(state);
        self.color.hash(state);
    }
}

impl Eq for Font {}

/// Underline style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Underline {
    /// No underline
    #[default]
    None,
    /// Single underline
    Single,
    /// Double underline
    Double,
    /// Single accounting underline (extends to cell width)
    SingleAccounting,
    /// Double accounting underline
    DoubleAccounting,
}

impl Keyword for Underline {
    const VOCABULARY: &'static str = "underline style";
    const TABLE: &'static [(Self, &'static str)] = &[
        (Underline::None, "none"),
        (Underline::Single, "single"),
        (Underline::Double, "double"),
        (Underline::SingleAccounting, "singleAccounting"),
        (Underline::DoubleAccounting, "doubleAccounting"),
    ];
    const CASE_INSENSITIVE: bool = false;
}
