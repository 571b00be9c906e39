//! The styling registry for one workbook

use std::hash::Hash;

use ahash::AHashMap;

use super::{
    BaseFormat, Border, BorderId, Color, Fill, FillId, Font, FontId, Format, NumberFormat,
    PatternType, Style,
};
use crate::error::{Error, Result};

/// An append-only collection in which no two equal values occupy different indices
///
/// Index 0 is whatever was inserted first; entries are never removed or reordered,
/// so an index handed out once stays valid for the life of the table.
#[derive(Debug, Clone)]
struct InternTable<T> {
    values: Vec<T>,
    index_map: AHashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    fn new() -> Self {
        Self {
            values: Vec::with_capacity(8),
            index_map: AHashMap::with_capacity(8),
        }
    }

    /// Return the index of an equal value, inserting it if absent
    fn get_or_insert(&mut self, value: T) -> u32 {
        if let Some(&idx) = self.index_map.get(&value) {
            return idx;
        }
        let idx = self.values.len() as u32;
        self.index_map.insert(value.clone(), idx);
        self.values.push(value);
        idx
    }

    fn get(&self, index: u32) -> Option<&T> {
        self.values.get(index as usize)
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn as_slice(&self) -> &[T] {
        &self.values
    }
}

/// Canonical fonts, fills, borders, number formats, indexed colors, named styles
/// and cell formats of one workbook
///
/// Every insert path interns, so the font/fill/border/number-format tables never
/// hold two equal values. Styles and formats refer into those tables by id and are
/// validated against the current table sizes when added.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    fonts: InternTable<Font>,
    fills: InternTable<Fill>,
    borders: InternTable<Border>,
    /// Registered number formats, in registration order
    number_formats: Vec<NumberFormat>,
    /// Indexed-color palette override (positional, not interned)
    indexed_colors: Vec<Color>,
    styles: Vec<Style>,
    formats: Vec<Format>,
}

impl Default for Stylesheet {
    /// One default font, the two mandatory fills (`none`, `gray125`), one empty
    /// border, the "Normal" style and one format owned by it.
    fn default() -> Self {
        let mut sheet = Self::empty();
        sheet.fonts.get_or_insert(Font::default());
        sheet.fills.get_or_insert(Fill::pattern(PatternType::None));
        sheet.fills.get_or_insert(Fill::pattern(PatternType::Gray125));
        sheet.borders.get_or_insert(Border::default());
        sheet.styles.push(Style::normal());
        sheet.formats.push(Format::new().with_style("Normal"));
        sheet
    }
}

impl Stylesheet {
    /// Create a stylesheet with the workbook defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stylesheet with every table empty
    ///
    /// This is the starting point when a styles part is loaded from a package.
    pub fn empty() -> Self {
        Self {
            fonts: InternTable::new(),
            fills: InternTable::new(),
            borders: InternTable::new(),
            number_formats: Vec::new(),
            indexed_colors: Vec::new(),
            styles: Vec::new(),
            formats: Vec::new(),
        }
    }

    // === Fonts, fills, borders ===

    /// Intern a font, returning the id of the equal entry
    pub fn add_font(&mut self, font: Font) -> FontId {
        FontId(self.fonts.get_or_insert(font))
    }

    /// Intern a fill, returning the id of the equal entry
    pub fn add_fill(&mut self, fill: Fill) -> FillId {
        FillId(self.fills.get_or_insert(fill))
    }

    /// Intern a border, returning the id of the equal entry
    pub fn add_border(&mut self, border: Border) -> BorderId {
        BorderId(self.borders.get_or_insert(border))
    }

    /// Get a font by id
    pub fn font(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0)
    }

    /// Get a fill by id
    pub fn fill(&self, id: FillId) -> Option<&Fill> {
        self.fills.get(id.0)
    }

    /// Get a border by id
    pub fn border(&self, id: BorderId) -> Option<&Border> {
        self.borders.get(id.0)
    }

    /// All fonts in id order
    pub fn fonts(&self) -> &[Font] {
        self.fonts.as_slice()
    }

    /// All fills in id order
    pub fn fills(&self) -> &[Fill] {
        self.fills.as_slice()
    }

    /// All borders in id order
    pub fn borders(&self) -> &[Border] {
        self.borders.as_slice()
    }

    // === Number formats ===

    /// Intern a format code, returning its id
    ///
    /// A code that matches the builtin catalog resolves to the builtin id without
    /// being registered, unless this workbook has overridden that id with another
    /// code. A code already registered returns its existing id. Any other code is
    /// registered under `max(custom ids) + 1`, but never below 164.
    pub fn add_number_format<S: AsRef<str>>(&mut self, code: S) -> u32 {
        let code = code.as_ref();
        if let Some(existing) = self.registered_id_for(code) {
            return existing;
        }
        if let Some(id) = self.unshadowed_builtin_id(code) {
            return id;
        }
        let id = self.next_number_format_id();
        self.number_formats.push(NumberFormat::new(id, code));
        id
    }

    /// Register a number format under a caller-chosen id
    ///
    /// Ids below 164 are only accepted when the code is that id's builtin catalog
    /// code; anything else fails with [`Error::ReservedNumberFormatId`]. If the
    /// workbook has overridden that builtin id, the code is interned as with
    /// [`Stylesheet::add_number_format`]. An id already registered to a different
    /// code fails with [`Error::NameCollision`].
    pub fn add_number_format_with_id(&mut self, format: NumberFormat) -> Result<u32> {
        let id = format.id();
        if NumberFormat::is_reserved_id(id) {
            return if format.is_builtin() {
                Ok(self.add_number_format(format.format_code()))
            } else {
                Err(Error::ReservedNumberFormatId(id))
            };
        }
        if let Some(existing) = self.registered_id_for(format.format_code()) {
            return Ok(existing);
        }
        if self.number_formats.iter().any(|f| f.id() == id) {
            return Err(Error::NameCollision(format!("number format id {}", id)));
        }
        self.number_formats.push(format);
        Ok(id)
    }

    /// Register a number format exactly as a producer declared it
    ///
    /// Unlike [`Stylesheet::add_number_format_with_id`], ids in the builtin range are
    /// accepted and override the catalog entry for this workbook. A later declaration
    /// of an id replaces the earlier one.
    pub fn load_number_format(&mut self, format: NumberFormat) {
        match self
            .number_formats
            .iter_mut()
            .find(|f| f.id() == format.id())
        {
            Some(slot) => *slot = format,
            None => self.number_formats.push(format),
        }
    }

    /// Look up a number format by id: registry first, then the builtin catalog
    pub fn number_format(&self, id: u32) -> Option<NumberFormat> {
        self.number_formats
            .iter()
            .find(|f| f.id() == id)
            .cloned()
            .or_else(|| NumberFormat::from_builtin_id(id))
    }

    /// Like [`Stylesheet::number_format`], but unresolvable ids become "General"
    ///
    /// This lenience exists for producers that reference ids neither registered
    /// nor in the catalog; the returned format keeps id 0.
    pub fn number_format_or_general(&self, id: u32) -> NumberFormat {
        self.number_format(id).unwrap_or_else(NumberFormat::general)
    }

    /// Registered number formats in registration order
    pub fn number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    fn registered_id_for(&self, code: &str) -> Option<u32> {
        self.number_formats
            .iter()
            .find(|f| f.format_code() == code)
            .map(|f| f.id())
    }

    /// The catalog id for `code`, if this workbook still resolves that id to it
    fn unshadowed_builtin_id(&self, code: &str) -> Option<u32> {
        NumberFormat::builtin_id_for(code).filter(|&id| {
            self.number_format(id)
                .is_some_and(|f| f.format_code() == code)
        })
    }

    fn next_number_format_id(&self) -> u32 {
        self.number_formats
            .iter()
            .map(|f| f.id() + 1)
            .max()
            .unwrap_or(0)
            .max(NumberFormat::FIRST_CUSTOM_ID)
    }

    // === Indexed colors ===

    /// The indexed-color palette override, empty when the default palette applies
    pub fn indexed_colors(&self) -> &[Color] {
        &self.indexed_colors
    }

    /// Replace the indexed-color palette
    pub fn set_indexed_colors(&mut self, colors: Vec<Color>) {
        self.indexed_colors = colors;
    }

    // === Styles ===

    /// Add a named style, returning its position
    ///
    /// Fails with [`Error::NameCollision`] if the name is taken, or with
    /// [`Error::IndexOutOfRange`] if a facet reference does not resolve.
    pub fn add_style(&mut self, style: Style) -> Result<usize> {
        if self.has_style(style.name()) {
            return Err(Error::NameCollision(style.name().to_string()));
        }
        self.check_base(&style.base)?;
        self.styles.push(style);
        Ok(self.styles.len() - 1)
    }

    /// Add an empty style with the given name and return it for editing
    ///
    /// References set on the returned style are not validated until the next save;
    /// prefer building the [`Style`] first and using [`Stylesheet::add_style`].
    pub fn create_style<S: Into<String>>(&mut self, name: S) -> Result<&mut Style> {
        let idx = self.add_style(Style::new(name))?;
        Ok(&mut self.styles[idx])
    }

    /// Check whether a style with this name exists
    pub fn has_style(&self, name: &str) -> bool {
        self.styles.iter().any(|s| s.name() == name)
    }

    /// Get a style by name
    pub fn style(&self, name: &str) -> Result<&Style> {
        self.styles
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::NotFound(format!("style {:?}", name)))
    }

    /// Get a style by position
    pub fn style_by_id(&self, index: usize) -> Result<&Style> {
        self.styles.get(index).ok_or(Error::IndexOutOfRange {
            table: "style",
            index,
            len: self.styles.len(),
        })
    }

    /// Position of the named style
    pub fn style_id(&self, name: &str) -> Result<usize> {
        self.styles
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| Error::NotFound(format!("style {:?}", name)))
    }

    /// All styles in order
    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    /// Remove a style, detaching every format that referenced it
    pub fn remove_style(&mut self, name: &str) -> Result<Style> {
        let idx = self.style_id(name)?;
        for format in &mut self.formats {
            if format.style.as_deref() == Some(name) {
                format.style = None;
            }
        }
        Ok(self.styles.remove(idx))
    }

    /// Remove every style and detach all formats from them
    pub fn clear_styles(&mut self) {
        self.styles.clear();
        for format in &mut self.formats {
            format.style = None;
        }
    }

    // === Formats ===

    /// Append a cell format, returning its index
    ///
    /// Value-identical formats are kept as separate entries. The owning style, if
    /// any, must exist ([`Error::NotFound`]) and every facet reference must resolve.
    pub fn add_format(&mut self, format: Format) -> Result<usize> {
        if let Some(name) = &format.style {
            if !self.has_style(name) {
                return Err(Error::NotFound(format!("style {:?}", name)));
            }
        }
        self.check_base(&format.base)?;
        self.formats.push(format);
        Ok(self.formats.len() - 1)
    }

    /// Get a format by index
    pub fn format(&self, index: usize) -> Result<&Format> {
        self.formats.get(index).ok_or(Error::IndexOutOfRange {
            table: "format",
            index,
            len: self.formats.len(),
        })
    }

    /// All formats in order
    pub fn formats(&self) -> &[Format] {
        &self.formats
    }

    /// Remove every format
    pub fn clear_formats(&mut self) {
        self.formats.clear();
    }

    /// Validate that every reference of `base` resolves in this stylesheet
    pub fn check_base(&self, base: &BaseFormat) -> Result<()> {
        check_index("font", base.font_id.0, self.fonts.len())?;
        check_index("fill", base.fill_id.0, self.fills.len())?;
        check_index("border", base.border_id.0, self.borders.len())?;
        if self.number_format(base.number_format_id).is_none() {
            return Err(Error::NotFound(format!(
                "number format {}",
                base.number_format_id
            )));
        }
        Ok(())
    }
}

fn check_index(table: &'static str, index: u32, len: usize) -> Result<()> {
    if (index as usize) < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange {
            table,
            index: index as usize,
            len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::style::{BorderLineStyle, Underline};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let sheet = Stylesheet::new();
        assert_eq!(sheet.fonts().len(), 1);
        assert_eq!(sheet.fills().len(), 2);
        assert_eq!(sheet.borders().len(), 1);
        assert_eq!(sheet.styles().len(), 1);
        assert_eq!(sheet.styles()[0].name(), "Normal");
        assert_eq!(sheet.formats().len(), 1);
        assert_eq!(sheet.formats()[0].style.as_deref(), Some("Normal"));
    }

    #[test]
    fn test_interning_is_idempotent() {
        let mut sheet = Stylesheet::new();
        let font = Font::new("Arial", 12.0).with_underline(Underline::Double);

        let a = sheet.add_font(font.clone());
        let len = sheet.fonts().len();
        let b = sheet.add_font(font);
        assert_eq!(a, b);
        assert_eq!(sheet.fonts().len(), len);

        let f1 = sheet.add_fill(Fill::solid(Color::RED));
        let f2 = sheet.add_fill(Fill::solid(Color::RED));
        assert_eq!(f1, f2);
        assert_eq!(sheet.fills().len(), 3);

        let border = Border::outline(BorderLineStyle::Thin, Color::BLACK);
        assert_eq!(sheet.add_border(border.clone()), sheet.add_border(border));
        assert_eq!(sheet.borders().len(), 2);
    }

    #[test]
    fn test_default_font_dedups_against_first_entry() {
        let mut sheet = Stylesheet::new();
        assert_eq!(sheet.add_font(Font::default()), FontId(0));
        assert_eq!(sheet.add_fill(Fill::default()), FillId(0));
    }

    #[test]
    fn test_number_format_ids() {
        let mut sheet = Stylesheet::new();
        assert_eq!(sheet.add_number_format("0.00%"), 10);
        assert!(sheet.number_formats().is_empty());

        let a = sheet.add_number_format("0.000");
        let b = sheet.add_number_format("yyyy-mm-dd");
        assert_eq!(a, 164);
        assert_eq!(b, 165);
        assert_eq!(sheet.add_number_format("0.000"), 164);
        assert_eq!(sheet.number_formats().len(), 2);

        assert_eq!(
            sheet
                .add_number_format_with_id(NumberFormat::new(200, "#,##0.000"))
                .unwrap(),
            200
        );
        assert_eq!(sheet.add_number_format("0.0"), 201);
    }

    #[test]
    fn test_reserved_number_format_id() {
        let mut sheet = Stylesheet::new();
        let err = sheet
            .add_number_format_with_id(NumberFormat::new(14, "yyyy"))
            .unwrap_err();
        assert!(matches!(err, Error::ReservedNumberFormatId(14)));
        assert_eq!(err.kind(), ErrorKind::NameCollision);

        assert_eq!(
            sheet
                .add_number_format_with_id(NumberFormat::new(14, "mm-dd-yy"))
                .unwrap(),
            14
        );
    }

    #[test]
    fn test_overridden_builtin_id_is_not_reused() {
        let mut sheet = Stylesheet::new();
        sheet.load_number_format(NumberFormat::new(14, "yyyy-mm-dd"));

        let id = sheet.add_number_format("mm-dd-yy");
        assert!(id >= NumberFormat::FIRST_CUSTOM_ID);
        assert_eq!(sheet.number_format(id).unwrap().format_code(), "mm-dd-yy");
        assert_eq!(sheet.number_format(14).unwrap().format_code(), "yyyy-mm-dd");

        let again = sheet
            .add_number_format_with_id(NumberFormat::new(14, "mm-dd-yy"))
            .unwrap();
        assert_eq!(again, id);

        // Untouched builtin ids still resolve to the catalog
        assert_eq!(sheet.add_number_format("0.00%"), 10);
    }

    #[test]
    fn test_number_format_resolution() {
        let mut sheet = Stylesheet::new();
        assert_eq!(sheet.number_format(0).unwrap().format_code(), "General");
        assert_eq!(sheet.number_format(14).unwrap().format_code(), "mm-dd-yy");

        sheet.load_number_format(NumberFormat::new(14, "m/d/yyyy"));
        assert_eq!(sheet.number_format(14).unwrap().format_code(), "m/d/yyyy");

        assert!(sheet.number_format(30).is_none());
        assert_eq!(sheet.number_format_or_general(30).format_code(), "General");
    }

    #[test]
    fn test_style_names_are_unique() {
        let mut sheet = Stylesheet::new();
        sheet.create_style("Header").unwrap();
        let err = sheet.add_style(Style::new("Header")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NameCollision);
        assert_eq!(sheet.style_id("Header").unwrap(), 1);
        assert!(sheet.style("Missing").is_err());
    }

    #[test]
    fn test_add_format_validates_references() {
        let mut sheet = Stylesheet::new();
        let err = sheet
            .add_format(Format::from_base(BaseFormat::new().with_font(FontId(7))))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        let err = sheet
            .add_format(Format::new().with_style("Nope"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = sheet
            .add_format(Format::from_base(BaseFormat::new().with_number_format(999)))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_identical_formats_share_registry_entries() {
        fn add(sheet: &mut Stylesheet) -> usize {
            let font = sheet.add_font(Font::default().with_bold(true));
            let fill = sheet.add_fill(Fill::solid(Color::YELLOW));
            let border = sheet.add_border(Border::outline(BorderLineStyle::Thin, Color::BLACK));
            let base = BaseFormat::new()
                .with_font(font)
                .with_fill(fill)
                .with_border(border);
            sheet.add_format(Format::from_base(base)).unwrap()
        }
        let mut sheet = Stylesheet::new();
        let a = add(&mut sheet);
        let b = add(&mut sheet);
        assert_ne!(a, b);
        assert_eq!(sheet.formats().len(), 3);
        assert_eq!(sheet.fonts().len(), 2);
        assert_eq!(sheet.fills().len(), 3);
        assert_eq!(sheet.borders().len(), 2);
    }

    #[test]
    fn test_remove_style_detaches_formats() {
        let mut sheet = Stylesheet::new();
        sheet.remove_style("Normal").unwrap();
        assert!(sheet.styles().is_empty());
        assert_eq!(sheet.formats()[0].style, None);
    }
}
