//! Workbook type - the root aggregate of a spreadsheet document

use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::manifest::{content_type, Manifest};
use crate::named_range::{NameScope, NamedRange, NamedRangeCollection};
use crate::relationship::{resolve_target, Relationship, RelationshipType, Relationships};
use crate::style::{
    Border, BorderId, Fill, FillId, Font, FontId, Format, NumberFormat, Style, Stylesheet,
};
use crate::worksheet::{SheetHandle, Worksheet};
use crate::MAX_SHEET_NAME_LEN;

/// Distinguishes workbook instances so worksheet handles cannot cross between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkbookId(u64);

impl WorkbookId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        WorkbookId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A workbook (spreadsheet document)
///
/// Owns the worksheets, the shared-string table, both relationship lists, the
/// content-type manifest, the [`Stylesheet`], named ranges and the opaque theme
/// and thumbnail parts. Cloning deep-copies all of it into a new, independent
/// workbook whose sheet handles do not resolve against the original.
#[derive(Debug)]
pub struct Workbook {
    id: WorkbookId,
    worksheets: Vec<Worksheet>,
    shared_strings: Vec<String>,
    shared_string_index: AHashMap<String, usize>,
    /// Relationships of the workbook part
    relationships: Relationships,
    /// Relationships of the package root
    root_relationships: Relationships,
    manifest: Manifest,
    stylesheet: Stylesheet,
    named_ranges: NamedRangeCollection,
    theme: Option<Vec<u8>>,
    thumbnail: Option<Vec<u8>>,
    settings: WorkbookSettings,
}

/// Part name of the workbook part inside the package
pub const WORKBOOK_PART: &str = "xl/workbook.xml";

impl Workbook {
    /// Create a new workbook with one worksheet and the default stylesheet
    pub fn new() -> Self {
        let mut wb = Self::empty();

        wb.root_relationships
            .add_next(RelationshipType::OfficeDocument, WORKBOOK_PART);
        wb.manifest.add_override(WORKBOOK_PART, content_type::WORKBOOK);

        wb.relationships
            .add_next(RelationshipType::Styles, "styles.xml");
        wb.manifest.add_override("xl/styles.xml", content_type::STYLES);

        wb.create_sheet();
        wb
    }

    /// Create a workbook with no worksheets, no relationships and only the
    /// manifest defaults; the starting point for loading a package
    pub fn empty() -> Self {
        Self {
            id: WorkbookId::next(),
            worksheets: Vec::new(),
            shared_strings: Vec::new(),
            shared_string_index: AHashMap::new(),
            relationships: Relationships::new(),
            root_relationships: Relationships::new(),
            manifest: Manifest::with_defaults(),
            stylesheet: Stylesheet::new(),
            named_ranges: NamedRangeCollection::new(),
            theme: None,
            thumbnail: None,
            settings: WorkbookSettings::default(),
        }
    }

    // ==================== Worksheets ====================

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Append a new empty worksheet with a generated, unique title
    pub fn create_sheet(&mut self) -> &mut Worksheet {
        let index = self.worksheets.len();
        let title = self.generate_sheet_name();
        self.insert_new_sheet(index, title)
    }

    /// Insert a new empty worksheet at `index` with a generated, unique title
    pub fn create_sheet_at(&mut self, index: usize) -> Result<&mut Worksheet> {
        if index > self.worksheets.len() {
            return Err(Error::IndexOutOfRange {
                table: "worksheet",
                index,
                len: self.worksheets.len(),
            });
        }
        let title = self.generate_sheet_name();
        Ok(self.insert_new_sheet(index, title))
    }

    /// Append a worksheet whose part is already registered as relationship `rel_id`
    ///
    /// Fails with [`Error::NotFound`] if the relationship does not exist and with
    /// [`Error::NameCollision`] if the title is already taken.
    pub fn create_sheet_with_rel(&mut self, title: &str, rel_id: &str) -> Result<&mut Worksheet> {
        self.relationships.get(rel_id)?;
        self.validate_sheet_name(title, None)?;
        let sheet_id = self.next_sheet_id();
        self.worksheets.push(Worksheet::new(
            self.id,
            sheet_id,
            title.to_string(),
            rel_id.to_string(),
        ));
        let last = self.worksheets.len() - 1;
        Ok(&mut self.worksheets[last])
    }

    /// Append a copy of a worksheet's cells under a new unique title
    pub fn copy_sheet(&mut self, handle: SheetHandle) -> Result<&mut Worksheet> {
        let index = self.worksheets.len();
        self.copy_sheet_at(handle, index)
    }

    /// Insert a copy of a worksheet's cells at `index` under a new unique title
    pub fn copy_sheet_at(&mut self, handle: SheetHandle, index: usize) -> Result<&mut Worksheet> {
        let source = self.sheet(handle)?.clone();
        if index > self.worksheets.len() {
            return Err(Error::IndexOutOfRange {
                table: "worksheet",
                index,
                len: self.worksheets.len(),
            });
        }
        let title = self.copy_title(source.title());
        let fresh = self.insert_new_sheet(index, title);
        let (sheet_id, rel_id, title) = (
            fresh.sheet_id(),
            fresh.rel_id().to_string(),
            fresh.title().to_string(),
        );
        let mut copy = source;
        copy.set_sheet_id(sheet_id);
        copy.set_rel_id(rel_id);
        copy.set_title(title);
        self.worksheets[index] = copy;
        Ok(&mut self.worksheets[index])
    }

    /// Remove a worksheet together with its relationship and manifest entry
    ///
    /// Fails with [`Error::NotOwned`] for a handle from another workbook and with
    /// [`Error::NotFound`] if the sheet was already removed. On failure the
    /// worksheet list is unchanged.
    pub fn remove_sheet(&mut self, handle: SheetHandle) -> Result<Worksheet> {
        let index = self.index_of(handle)?;
        let sheet = self.worksheets.remove(index);

        self.drop_sheet_part(sheet.rel_id());
        self.named_ranges.sheet_removed(index);

        let active = &mut self.settings.active_sheet;
        if *active > index || *active >= self.worksheets.len() {
            *active = active.saturating_sub(1);
        }
        Ok(sheet)
    }

    /// Rename a worksheet
    pub fn rename_sheet(&mut self, handle: SheetHandle, title: &str) -> Result<()> {
        let index = self.index_of(handle)?;
        self.validate_sheet_name(title, Some(index))?;
        self.worksheets[index].set_title(title.to_string());
        Ok(())
    }

    /// Resolve a handle to its worksheet
    pub fn sheet(&self, handle: SheetHandle) -> Result<&Worksheet> {
        let index = self.index_of(handle)?;
        Ok(&self.worksheets[index])
    }

    /// Resolve a handle to its worksheet, mutably
    pub fn sheet_mut(&mut self, handle: SheetHandle) -> Result<&mut Worksheet> {
        let index = self.index_of(handle)?;
        Ok(&mut self.worksheets[index])
    }

    /// Get a worksheet by title
    pub fn get_sheet_by_name(&self, title: &str) -> Result<&Worksheet> {
        self.worksheets
            .iter()
            .find(|ws| ws.title() == title)
            .ok_or_else(|| Error::NotFound(format!("worksheet {:?}", title)))
    }

    /// Get a mutable worksheet by title
    pub fn get_sheet_by_name_mut(&mut self, title: &str) -> Result<&mut Worksheet> {
        self.worksheets
            .iter_mut()
            .find(|ws| ws.title() == title)
            .ok_or_else(|| Error::NotFound(format!("worksheet {:?}", title)))
    }

    /// Get a worksheet by position
    pub fn get_sheet_by_index(&self, index: usize) -> Result<&Worksheet> {
        self.worksheets
            .get(index)
            .ok_or_else(|| Error::NotFound(format!("worksheet at index {}", index)))
    }

    /// Get a mutable worksheet by position
    pub fn get_sheet_by_index_mut(&mut self, index: usize) -> Result<&mut Worksheet> {
        self.worksheets
            .get_mut(index)
            .ok_or_else(|| Error::NotFound(format!("worksheet at index {}", index)))
    }

    /// Check whether a worksheet with this title exists
    pub fn contains(&self, title: &str) -> bool {
        self.worksheets.iter().any(|ws| ws.title() == title)
    }

    /// Position of the worksheet a handle refers to
    pub fn index_of(&self, handle: SheetHandle) -> Result<usize> {
        if handle.workbook != self.id {
            return Err(Error::NotOwned);
        }
        self.worksheets
            .iter()
            .position(|ws| ws.sheet_id() == handle.sheet_id)
            .ok_or_else(|| Error::NotFound(format!("worksheet with id {}", handle.sheet_id)))
    }

    /// Titles of all worksheets in order
    pub fn sheet_titles(&self) -> Vec<String> {
        self.worksheets.iter().map(|ws| ws.title().to_string()).collect()
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Iterate over all worksheets mutably
    pub fn worksheets_mut(&mut self) -> impl Iterator<Item = &mut Worksheet> {
        self.worksheets.iter_mut()
    }

    /// Drop every worksheet, shared string, named range, style and format
    ///
    /// The stylesheet returns to its defaults; package-level relationships other
    /// than worksheets are kept.
    pub fn clear(&mut self) {
        for sheet in std::mem::take(&mut self.worksheets) {
            self.drop_sheet_part(sheet.rel_id());
        }
        self.shared_strings.clear();
        self.shared_string_index.clear();
        self.named_ranges.clear();
        self.stylesheet = Stylesheet::new();
        self.settings.active_sheet = 0;
    }

    fn insert_new_sheet(&mut self, index: usize, title: String) -> &mut Worksheet {
        let sheet_id = self.next_sheet_id();
        let base_dir = self.workbook_dir();
        let (target, part) = (1..)
            .map(|n| {
                let target = format!("worksheets/sheet{}.xml", n);
                let part = resolve_target(&base_dir, &target);
                (target, part)
            })
            .find(|(_, part)| !self.part_in_use(&base_dir, part))
            .unwrap_or_default();
        self.manifest.add_override(part, content_type::WORKSHEET);
        let rel_id = self
            .relationships
            .add_next(RelationshipType::Worksheet, target);
        self.worksheets
            .insert(index, Worksheet::new(self.id, sheet_id, title, rel_id));
        &mut self.worksheets[index]
    }

    /// Directory of the workbook part, as named by the office-document relationship
    fn workbook_dir(&self) -> String {
        let part = self
            .root_relationships
            .find_by_type(&RelationshipType::OfficeDocument)
            .and_then(|rel| rel.part_name(""))
            .unwrap_or_else(|| WORKBOOK_PART.to_string());
        part.rsplit_once('/')
            .map_or(String::new(), |(dir, _)| dir.to_string())
    }

    fn part_in_use(&self, base_dir: &str, part: &str) -> bool {
        self.manifest.has_override(part)
            || self
                .relationships
                .iter()
                .any(|rel| rel.part_name(base_dir).as_deref() == Some(part))
    }

    /// Remove a worksheet relationship and the manifest entry of its part
    fn drop_sheet_part(&mut self, rel_id: &str) {
        if let Some(rel) = self.relationships.remove(rel_id) {
            if let Some(part) = rel.part_name(&self.workbook_dir()) {
                self.manifest.remove_override(&part);
            }
        }
    }

    fn next_sheet_id(&self) -> u32 {
        self.worksheets
            .iter()
            .map(|ws| ws.sheet_id())
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Validate a sheet name, optionally excluding a sheet from the duplicate check
    fn validate_sheet_name(&self, name: &str, exclude_index: Option<usize>) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Titles compare case-insensitively
        let taken = self
            .worksheets
            .iter()
            .enumerate()
            .any(|(i, ws)| Some(i) != exclude_index && ws.title().to_lowercase() == name.to_lowercase());
        if taken {
            return Err(Error::NameCollision(name.into()));
        }

        Ok(())
    }

    fn generate_sheet_name(&self) -> String {
        let mut n = self.worksheets.len() + 1;
        loop {
            let name = format!("Sheet{}", n);
            if self.validate_sheet_name(&name, None).is_ok() {
                return name;
            }
            n += 1;
        }
    }

    fn copy_title(&self, base: &str) -> String {
        (2..)
            .map(|n| format!("{} ({})", base, n))
            .take(64)
            .find(|name| self.validate_sheet_name(name, None).is_ok())
            .unwrap_or_else(|| self.generate_sheet_name())
    }

    // ==================== Styles and formats ====================

    /// The workbook's stylesheet (read-only)
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Replace the whole stylesheet, as a load does
    pub fn replace_stylesheet(&mut self, stylesheet: Stylesheet) {
        self.stylesheet = stylesheet;
    }

    /// Intern a font
    pub fn add_font(&mut self, font: Font) -> FontId {
        self.stylesheet.add_font(font)
    }

    /// Intern a fill
    pub fn add_fill(&mut self, fill: Fill) -> FillId {
        self.stylesheet.add_fill(fill)
    }

    /// Intern a border
    pub fn add_border(&mut self, border: Border) -> BorderId {
        self.stylesheet.add_border(border)
    }

    /// Intern a number format code, returning its id
    pub fn add_number_format<S: AsRef<str>>(&mut self, code: S) -> u32 {
        self.stylesheet.add_number_format(code)
    }

    /// Register a number format under an explicit id
    pub fn add_number_format_with_id(&mut self, format: NumberFormat) -> Result<u32> {
        self.stylesheet.add_number_format_with_id(format)
    }

    /// Append a cell format, returning its index
    pub fn add_format(&mut self, format: Format) -> Result<usize> {
        self.stylesheet.add_format(format)
    }

    /// Get a cell format by index
    pub fn format(&self, index: usize) -> Result<&Format> {
        self.stylesheet.format(index)
    }

    /// Remove every cell format
    pub fn clear_formats(&mut self) {
        self.stylesheet.clear_formats();
    }

    /// Add an empty named style and return it for editing
    pub fn create_style(&mut self, name: &str) -> Result<&mut Style> {
        self.stylesheet.create_style(name)
    }

    /// Add a named style, returning its position
    pub fn add_style(&mut self, style: Style) -> Result<usize> {
        self.stylesheet.add_style(style)
    }

    /// Check whether a style with this name exists
    pub fn has_style(&self, name: &str) -> bool {
        self.stylesheet.has_style(name)
    }

    /// Get a style by name
    pub fn style(&self, name: &str) -> Result<&Style> {
        self.stylesheet.style(name)
    }

    /// Get a style by position
    pub fn style_by_id(&self, index: usize) -> Result<&Style> {
        self.stylesheet.style_by_id(index)
    }

    /// Position of the named style
    pub fn style_id(&self, name: &str) -> Result<usize> {
        self.stylesheet.style_id(name)
    }

    /// All styles in order
    pub fn styles(&self) -> &[Style] {
        self.stylesheet.styles()
    }

    /// Remove every style
    pub fn clear_styles(&mut self) {
        self.stylesheet.clear_styles();
    }

    // ==================== Relationships and manifest ====================

    /// Register a workbook-part relationship under a fresh id, returning the id
    pub fn create_relationship<T: Into<String>>(&mut self, rel_type: RelationshipType, target: T) -> String {
        self.relationships.add_next(rel_type, target)
    }

    /// Register a workbook-part relationship with a caller-chosen id
    pub fn add_relationship(&mut self, relationship: Relationship) -> Result<()> {
        self.relationships.add(relationship)
    }

    /// Get a workbook-part relationship by id
    pub fn relationship(&self, id: &str) -> Result<&Relationship> {
        self.relationships.get(id)
    }

    /// Relationships of the workbook part
    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// The id the next [`Workbook::create_relationship`] call will use
    pub fn next_relationship_id(&self) -> String {
        self.relationships.next_id()
    }

    /// Register a package-root relationship under a fresh id, returning the id
    pub fn create_root_relationship<T: Into<String>>(
        &mut self,
        rel_type: RelationshipType,
        target: T,
    ) -> String {
        self.root_relationships.add_next(rel_type, target)
    }

    /// Register a package-root relationship with a caller-chosen id
    pub fn add_root_relationship(&mut self, relationship: Relationship) -> Result<()> {
        self.root_relationships.add(relationship)
    }

    /// Relationships of the package root
    pub fn root_relationships(&self) -> &Relationships {
        &self.root_relationships
    }

    /// The content-type manifest
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// The content-type manifest, mutably
    pub fn manifest_mut(&mut self) -> &mut Manifest {
        &mut self.manifest
    }

    // ==================== Shared strings ====================

    /// Add a string to the shared-string table, returning its index
    ///
    /// Without `allow_duplicates`, an existing equal entry is reused.
    pub fn add_shared_string<S: Into<String>>(&mut self, text: S, allow_duplicates: bool) -> usize {
        let text = text.into();
        if !allow_duplicates {
            if let Some(&idx) = self.shared_string_index.get(&text) {
                return idx;
            }
        }
        let idx = self.shared_strings.len();
        self.shared_string_index.entry(text.clone()).or_insert(idx);
        self.shared_strings.push(text);
        idx
    }

    /// The shared-string table
    pub fn shared_strings(&self) -> &[String] {
        &self.shared_strings
    }

    // ==================== Theme and thumbnail ====================

    /// Whether a theme part was loaded or set
    pub fn has_loaded_theme(&self) -> bool {
        self.theme.is_some()
    }

    /// The theme part, kept verbatim
    pub fn loaded_theme(&self) -> Option<&[u8]> {
        self.theme.as_deref()
    }

    /// Set the theme part, registering its relationship and content type
    pub fn set_theme(&mut self, theme: Vec<u8>) {
        if self
            .relationships
            .find_by_type(&RelationshipType::Theme)
            .is_none()
        {
            self.relationships
                .add_next(RelationshipType::Theme, "theme/theme1.xml");
            self.manifest
                .add_override("xl/theme/theme1.xml", content_type::THEME);
        }
        self.theme = Some(theme);
    }

    /// The thumbnail image bytes
    pub fn thumbnail(&self) -> Option<&[u8]> {
        self.thumbnail.as_deref()
    }

    /// Set the thumbnail image, stored as `docProps/thumbnail.<extension>`
    pub fn set_thumbnail(&mut self, data: Vec<u8>, extension: &str, content_type: &str) {
        self.root_relationships.remove_type(&RelationshipType::Thumbnail);
        self.root_relationships.add_next(
            RelationshipType::Thumbnail,
            format!("docProps/thumbnail.{}", extension),
        );
        if !self.manifest.has_default(extension) {
            self.manifest.add_default(extension, content_type);
        }
        self.thumbnail = Some(data);
    }

    // ==================== Named Ranges ====================

    /// Define a workbook-scoped named range
    ///
    /// # Example
    /// ```
    /// use xlsheet_core::Workbook;
    ///
    /// let mut wb = Workbook::new();
    /// wb.create_named_range("TaxRate", "Sheet1!$B$1").unwrap();
    /// assert!(wb.has_named_range("TaxRate"));
    /// ```
    pub fn create_named_range(&mut self, name: &str, refers_to: &str) -> Result<()> {
        self.named_ranges
            .define(NamedRange::workbook_scope(name, refers_to))
    }

    /// Define a named range with any scope
    pub fn add_named_range(&mut self, range: NamedRange) -> Result<()> {
        self.named_ranges.define(range)
    }

    /// Check whether a workbook-scoped name exists
    pub fn has_named_range(&self, name: &str) -> bool {
        self.named_ranges.contains(name, NameScope::Workbook)
    }

    /// Get a workbook-scoped named range
    pub fn named_range(&self, name: &str) -> Result<&NamedRange> {
        self.named_ranges
            .get(name, NameScope::Workbook)
            .ok_or_else(|| Error::NotFound(format!("named range {:?}", name)))
    }

    /// Remove a workbook-scoped named range
    pub fn remove_named_range(&mut self, name: &str) -> Result<NamedRange> {
        self.named_ranges
            .remove(name, NameScope::Workbook)
            .ok_or_else(|| Error::NotFound(format!("named range {:?}", name)))
    }

    /// All named ranges
    pub fn named_ranges(&self) -> &NamedRangeCollection {
        &self.named_ranges
    }

    // ==================== Settings ====================

    /// Get workbook settings
    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }

    /// Get mutable workbook settings
    pub fn settings_mut(&mut self) -> &mut WorkbookSettings {
        &mut self.settings
    }
}

impl Clone for Workbook {
    fn clone(&self) -> Self {
        let id = WorkbookId::next();
        let mut worksheets = self.worksheets.clone();
        for ws in &mut worksheets {
            ws.set_owner(id);
        }
        Self {
            id,
            worksheets,
            shared_strings: self.shared_strings.clone(),
            shared_string_index: self.shared_string_index.clone(),
            relationships: self.relationships.clone(),
            root_relationships: self.root_relationships.clone(),
            manifest: self.manifest.clone(),
            stylesheet: self.stylesheet.clone(),
            named_ranges: self.named_ranges.clone(),
            theme: self.theme.clone(),
            thumbnail: self.thumbnail.clone(),
            settings: self.settings.clone(),
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Workbook-level settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkbookSettings {
    /// Date system: false = 1900 (Windows), true = 1904 (Mac)
    pub date_1904: bool,
    /// VBA code name of the workbook
    pub code_name: Option<String>,
    /// Index of the sheet shown when the document opens
    pub active_sheet: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.sheet_titles(), vec!["Sheet1".to_string()]);
        assert_eq!(wb.styles().len(), 1);
        assert_eq!(wb.stylesheet().formats().len(), 1);
        assert!(wb.manifest().has_override("/xl/worksheets/sheet1.xml"));
        assert!(wb
            .root_relationships()
            .find_by_type(&RelationshipType::OfficeDocument)
            .is_some());
    }

    #[test]
    fn test_create_sheet_titles_are_unique() {
        let mut wb = Workbook::new();
        wb.create_sheet();
        let handle = wb.get_sheet_by_index(0).unwrap().handle();
        wb.rename_sheet(handle, "Sheet3").unwrap();
        let title = wb.create_sheet().title().to_string();
        assert_eq!(title, "Sheet4");

        let inserted = wb.create_sheet_at(0).unwrap().title().to_string();
        assert_eq!(wb.sheet_titles()[0], inserted);
        assert!(wb.create_sheet_at(99).is_err());
    }

    #[test]
    fn test_create_sheet_with_rel() {
        let mut wb = Workbook::new();
        let rel = wb.create_relationship(RelationshipType::Worksheet, "worksheets/data.xml");
        wb.create_sheet_with_rel("Data", &rel).unwrap();
        assert!(wb.contains("Data"));

        let err = wb.create_sheet_with_rel("data", &rel).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NameCollision);
        let err = wb.create_sheet_with_rel("Other", "rId99").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_remove_sheet_not_owned() {
        let mut a = Workbook::new();
        let b = Workbook::new();
        let foreign = b.get_sheet_by_index(0).unwrap().handle();

        let err = a.remove_sheet(foreign).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotOwned);
        assert_eq!(a.sheet_titles(), vec!["Sheet1".to_string()]);
    }

    #[test]
    fn test_remove_sheet_drops_relationship() {
        let mut wb = Workbook::new();
        let handle = wb.create_sheet().handle();
        let rel_id = wb.sheet(handle).unwrap().rel_id().to_string();

        wb.remove_sheet(handle).unwrap();
        assert!(wb.relationship(&rel_id).is_err());
        assert!(!wb.manifest().has_override("/xl/worksheets/sheet2.xml"));
        assert_eq!(wb.remove_sheet(handle).unwrap_err().kind(), ErrorKind::NotFound);
    }

    fn loaded_with_sheet_target(target: &str) -> Workbook {
        let mut wb = Workbook::empty();
        wb.create_root_relationship(RelationshipType::OfficeDocument, "/xl/workbook.xml");
        wb.manifest_mut()
            .add_override("/xl/worksheets/sheet2.xml", content_type::WORKSHEET);
        let rel = wb.create_relationship(RelationshipType::Worksheet, target);
        wb.create_sheet_with_rel("Only", &rel).unwrap();
        wb
    }

    #[test]
    fn test_new_sheet_avoids_targets_in_use() {
        let mut wb = loaded_with_sheet_target("worksheets/sheet2.xml");

        let first = wb.create_sheet().rel_id().to_string();
        let second = wb.create_sheet().rel_id().to_string();
        assert_eq!(wb.relationship(&first).unwrap().target, "worksheets/sheet1.xml");
        assert_eq!(wb.relationship(&second).unwrap().target, "worksheets/sheet3.xml");

        let handle = wb.get_sheet_by_name("Only").unwrap().handle();
        let copy = wb.copy_sheet(handle).unwrap().rel_id().to_string();
        assert_eq!(wb.relationship(&copy).unwrap().target, "worksheets/sheet4.xml");
        assert!(wb.manifest().has_override("/xl/worksheets/sheet4.xml"));
    }

    #[test]
    fn test_remove_sheet_with_rooted_target() {
        let mut wb = loaded_with_sheet_target("/xl/worksheets/sheet2.xml");
        let handle = wb.get_sheet_by_name("Only").unwrap().handle();

        wb.remove_sheet(handle).unwrap();
        assert!(!wb.manifest().has_override("/xl/worksheets/sheet2.xml"));
        assert!(wb.relationships().is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let wb = Workbook::new();
        let handle = wb.get_sheet_by_index(0).unwrap().handle();
        let mut copy = wb.clone();

        assert_eq!(copy.remove_sheet(handle).unwrap_err().kind(), ErrorKind::NotOwned);
        let own = copy.get_sheet_by_index(0).unwrap().handle();
        copy.remove_sheet(own).unwrap();
        assert_eq!(wb.sheet_count(), 1);
    }

    #[test]
    fn test_copy_sheet() {
        let mut wb = Workbook::new();
        let handle = wb.get_sheet_by_index(0).unwrap().handle();
        wb.sheet_mut(handle).unwrap().set_value("A1", 5.0).unwrap();

        let copy = wb.copy_sheet(handle).unwrap();
        assert_eq!(copy.title(), "Sheet1 (2)");
        assert_eq!(copy.cell_count(), 1);
        let copy_rel = copy.rel_id().to_string();
        assert_ne!(copy_rel, wb.sheet(handle).unwrap().rel_id());
    }

    #[test]
    fn test_shared_strings() {
        let mut wb = Workbook::new();
        assert_eq!(wb.add_shared_string("a", false), 0);
        assert_eq!(wb.add_shared_string("a", false), 0);
        assert_eq!(wb.add_shared_string("a", true), 1);
        assert_eq!(wb.shared_strings().len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut wb = Workbook::new();
        wb.create_style("Header").unwrap();
        wb.clear();
        assert_eq!(wb.sheet_count(), 0);
        assert!(!wb.has_style("Header"));
        assert!(wb.has_style("Normal"));
        assert!(wb
            .relationships()
            .find_by_type(&RelationshipType::Worksheet)
            .is_none());
    }

    #[test]
    fn test_named_ranges() {
        let mut wb = Workbook::new();
        wb.create_named_range("Total", "Sheet1!$A$1").unwrap();
        assert!(wb.create_named_range("TOTAL", "x").is_err());
        assert_eq!(wb.named_range("total").unwrap().refers_to, "Sheet1!$A$1");
        wb.remove_named_range("Total").unwrap();
        assert!(!wb.has_named_range("Total"));
    }

    #[test]
    fn test_thumbnail_and_theme() {
        let mut wb = Workbook::new();
        wb.set_thumbnail(vec![1, 2, 3], "jpeg", content_type::JPEG);
        wb.set_thumbnail(vec![4], "jpeg", content_type::JPEG);
        assert_eq!(wb.thumbnail(), Some(&[4u8][..]));
        assert_eq!(
            wb.root_relationships()
                .iter()
                .filter(|r| r.rel_type == RelationshipType::Thumbnail)
                .count(),
            1
        );

        assert!(!wb.has_loaded_theme());
        wb.set_theme(b"<a:theme/>".to_vec());
        assert!(wb.has_loaded_theme());
    }
}
