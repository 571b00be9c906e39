//! XLSX writer

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use ahash::AHashMap;
use log::debug;

use crate::error::XlsxResult;
use crate::escape::encode_excel_escapes;
use crate::package::{
    self, CONTENT_TYPES_NS, CONTENT_TYPES_PART, MAIN_NS, OFFICE_REL_NS, RELATIONSHIPS_NS,
    ROOT_RELS_PART,
};
use crate::styles::write_stylesheet;
use crate::xml::XmlElement;
use xlsheet_core::workbook::WORKBOOK_PART;
use xlsheet_core::{
    content_type, CellAddress, CellValue, Error, Manifest, NameScope, RelationshipType,
    Relationships, Workbook, Worksheet,
};

/// Package-level write settings
#[derive(Debug, Clone, Copy)]
pub struct XlsxWriteOptions {
    /// Compression used for every entry
    pub compression: zip::CompressionMethod,
}

impl Default for XlsxWriteOptions {
    fn default() -> Self {
        Self {
            compression: zip::CompressionMethod::Deflated,
        }
    }
}

impl XlsxWriteOptions {
    /// Store entries without compression
    pub fn stored() -> Self {
        Self {
            compression: zip::CompressionMethod::Stored,
        }
    }
}

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    ///
    /// The package is staged in a temporary file next to `path` and renamed over
    /// it once complete, so a failed save leaves any existing file untouched.
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        let dir = path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        Self::write(workbook, staged.as_file_mut())?;
        staged.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        Self::write_with_options(workbook, writer, XlsxWriteOptions::default())
    }

    /// Write a workbook into a new in-memory package
    pub fn to_vec(workbook: &Workbook) -> XlsxResult<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        Self::write(workbook, &mut buf)?;
        Ok(buf.into_inner())
    }

    /// Write a workbook to a writer with explicit package settings
    ///
    /// The workbook is validated before anything is written: every format must
    /// resolve in the stylesheet and every cell format index must exist.
    pub fn write_with_options<W: Write + Seek>(
        workbook: &Workbook,
        writer: W,
        options: XlsxWriteOptions,
    ) -> XlsxResult<()> {
        Self::validate(workbook)?;
        let plan = PackagePlan::build(workbook);

        let mut out = PackageWriter {
            zip: zip::ZipWriter::new(writer),
            options: zip::write::SimpleFileOptions::default()
                .compression_method(options.compression),
        };

        out.write_xml(CONTENT_TYPES_PART, &Self::content_types(&plan.manifest))?;
        out.write_xml(ROOT_RELS_PART, &Self::relationships(&plan.root_relationships))?;
        out.write_xml(&plan.workbook_part, &Self::workbook_part(workbook))?;
        out.write_xml(
            &package::rels_part_for(&plan.workbook_part),
            &Self::relationships(&plan.relationships),
        )?;
        out.write_xml(&plan.styles_part, &write_stylesheet(workbook.stylesheet()))?;

        if let Some(part) = &plan.shared_strings_part {
            out.write_xml(part, &Self::shared_strings(&plan.shared_strings))?;
        }

        for sheet in workbook.worksheets() {
            let part = plan.part_for(sheet)?;
            out.write_xml(&part, &Self::worksheet(sheet, &plan.string_index))?;
        }

        if let (Some(theme), Some(part)) = (workbook.loaded_theme(), &plan.theme_part) {
            out.write_bytes(part, theme)?;
        }
        if let Some(thumbnail) = workbook.thumbnail() {
            if let Some(rel) = workbook
                .root_relationships()
                .find_by_type(&RelationshipType::Thumbnail)
            {
                out.write_bytes(&package::resolve("", &rel.target), thumbnail)?;
            }
        }

        out.zip.finish()?;
        debug!("wrote workbook with {} sheets", workbook.sheet_count());
        Ok(())
    }

    fn validate(workbook: &Workbook) -> XlsxResult<()> {
        let stylesheet = workbook.stylesheet();
        for style in stylesheet.styles() {
            stylesheet.check_base(style)?;
        }
        for format in stylesheet.formats() {
            stylesheet.check_base(format)?;
        }

        let format_count = stylesheet.formats().len();
        for sheet in workbook.worksheets() {
            for (_, _, cell) in sheet.iter_cells() {
                if let Some(index) = cell.format.filter(|&i| i >= format_count) {
                    return Err(Error::IndexOutOfRange {
                        table: "format",
                        index,
                        len: format_count,
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    fn content_types(manifest: &Manifest) -> XmlElement {
        let mut root = XmlElement::new("Types").with_attribute("xmlns", CONTENT_TYPES_NS);
        for (extension, ct) in manifest.defaults() {
            root.push_child(
                XmlElement::new("Default")
                    .with_attribute("Extension", extension)
                    .with_attribute("ContentType", ct),
            );
        }
        for (part, ct) in manifest.overrides() {
            root.push_child(
                XmlElement::new("Override")
                    .with_attribute("PartName", part)
                    .with_attribute("ContentType", ct),
            );
        }
        root
    }

    fn relationships(rels: &Relationships) -> XmlElement {
        let mut root = XmlElement::new("Relationships").with_attribute("xmlns", RELATIONSHIPS_NS);
        for rel in rels.iter() {
            let mut node = XmlElement::new("Relationship")
                .with_attribute("Id", rel.id.as_str())
                .with_attribute("Type", rel.rel_type.uri())
                .with_attribute("Target", rel.target.as_str());
            if rel.external {
                node.set_attribute("TargetMode", "External");
            }
            root.push_child(node);
        }
        root
    }

    fn workbook_part(workbook: &Workbook) -> XmlElement {
        let settings = workbook.settings();
        let mut root = XmlElement::new("workbook")
            .with_attribute("xmlns", MAIN_NS)
            .with_attribute("xmlns:r", OFFICE_REL_NS);

        let mut pr = XmlElement::new("workbookPr");
        if settings.date_1904 {
            pr = pr.with_bool_attribute("date1904", true);
        }
        if let Some(code_name) = &settings.code_name {
            pr.set_attribute("codeName", code_name.as_str());
        }
        root.push_child(pr);

        root.push_child(
            XmlElement::new("bookViews").with_child(
                XmlElement::new("workbookView")
                    .with_attribute("activeTab", settings.active_sheet.to_string()),
            ),
        );

        let mut sheets = XmlElement::new("sheets");
        for sheet in workbook.worksheets() {
            sheets.push_child(
                XmlElement::new("sheet")
                    .with_attribute("name", sheet.title())
                    .with_attribute("sheetId", sheet.sheet_id().to_string())
                    .with_attribute("r:id", sheet.rel_id()),
            );
        }
        root.push_child(sheets);

        if !workbook.named_ranges().is_empty() {
            let mut names = XmlElement::new("definedNames");
            for range in workbook.named_ranges().iter() {
                let mut node = XmlElement::new("definedName")
                    .with_attribute("name", range.name.as_str())
                    .with_text(range.refers_to.as_str());
                if let NameScope::Sheet(index) = range.scope {
                    node.set_attribute("localSheetId", index.to_string());
                }
                if range.hidden {
                    node.set_attribute("hidden", "1");
                }
                if let Some(comment) = &range.comment {
                    node.set_attribute("comment", comment.as_str());
                }
                names.push_child(node);
            }
            root.push_child(names);
        }
        root
    }

    fn shared_strings(strings: &[String]) -> XmlElement {
        let mut root = XmlElement::new("sst")
            .with_attribute("xmlns", MAIN_NS)
            .with_attribute("count", strings.len().to_string())
            .with_attribute("uniqueCount", strings.len().to_string());
        for text in strings {
            let text = encode_excel_escapes(text);
            let mut t = XmlElement::new("t").with_text(text.as_str());
            if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
                t.set_attribute("xml:space", "preserve");
            }
            root.push_child(XmlElement::new("si").with_child(t));
        }
        root
    }

    fn worksheet(sheet: &Worksheet, string_index: &AHashMap<String, usize>) -> XmlElement {
        let mut sheet_data = XmlElement::new("sheetData");
        let mut current: Option<(u32, XmlElement)> = None;

        for (row, col, cell) in sheet.iter_cells() {
            if current.as_ref().map(|(r, _)| *r) != Some(row) {
                if let Some((_, done)) = current.take() {
                    sheet_data.push_child(done);
                }
                current = Some((
                    row,
                    XmlElement::new("row").with_attribute("r", (row + 1).to_string()),
                ));
            }

            let mut c = XmlElement::new("c")
                .with_attribute("r", CellAddress::new(row, col).to_string());
            if let Some(format) = cell.format {
                c.set_attribute("s", format.to_string());
            }
            Self::write_cell_value(&mut c, &cell.value, string_index);

            if let Some((_, row_node)) = current.as_mut() {
                row_node.push_child(c);
            }
        }
        if let Some((_, done)) = current {
            sheet_data.push_child(done);
        }

        XmlElement::new("worksheet")
            .with_attribute("xmlns", MAIN_NS)
            .with_attribute("xmlns:r", OFFICE_REL_NS)
            .with_child(sheet_data)
    }

    fn write_cell_value(
        c: &mut XmlElement,
        value: &CellValue,
        string_index: &AHashMap<String, usize>,
    ) {
        match value {
            CellValue::Empty => {}
            CellValue::Number(n) => c.push_child(XmlElement::new("v").with_text(n.to_string())),
            CellValue::Boolean(b) => {
                c.set_attribute("t", "b");
                c.push_child(XmlElement::new("v").with_text(if *b { "1" } else { "0" }));
            }
            CellValue::String(s) => {
                // Every string was collected into the table before writing
                if let Some(index) = string_index.get(s) {
                    c.set_attribute("t", "s");
                    c.push_child(XmlElement::new("v").with_text(index.to_string()));
                }
            }
            CellValue::Formula { text, cached_value } => {
                c.push_child(XmlElement::new("f").with_text(text.as_str()));
                match cached_value.as_deref() {
                    Some(CellValue::Number(n)) => {
                        c.push_child(XmlElement::new("v").with_text(n.to_string()))
                    }
                    Some(CellValue::Boolean(b)) => {
                        c.set_attribute("t", "b");
                        c.push_child(XmlElement::new("v").with_text(if *b { "1" } else { "0" }));
                    }
                    Some(CellValue::String(s)) => {
                        c.set_attribute("t", "str");
                        c.push_child(XmlElement::new("v").with_text(encode_excel_escapes(s)));
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Part names and package-level tables derived from a workbook for one write
///
/// The workbook itself is never modified; missing relationships and overrides
/// for the styles and shared-strings parts are added to copies here.
struct PackagePlan {
    manifest: Manifest,
    root_relationships: Relationships,
    relationships: Relationships,
    workbook_part: String,
    styles_part: String,
    shared_strings_part: Option<String>,
    theme_part: Option<String>,
    shared_strings: Vec<String>,
    string_index: AHashMap<String, usize>,
}

impl PackagePlan {
    fn build(workbook: &Workbook) -> Self {
        let mut manifest = workbook.manifest().clone();
        let mut root_relationships = workbook.root_relationships().clone();
        let mut relationships = workbook.relationships().clone();

        let workbook_part = match root_relationships.find_by_type(&RelationshipType::OfficeDocument)
        {
            Some(rel) => package::resolve("", &rel.target),
            None => {
                root_relationships.add_next(RelationshipType::OfficeDocument, WORKBOOK_PART);
                WORKBOOK_PART.to_string()
            }
        };
        if !manifest.has_override(&workbook_part) {
            manifest.add_override(&workbook_part, content_type::WORKBOOK);
        }
        let base_dir = package::directory(&workbook_part).to_string();

        let styles_part = Self::ensure_part(
            &mut relationships,
            &mut manifest,
            &base_dir,
            RelationshipType::Styles,
            "styles.xml",
            content_type::STYLES,
        );

        // Loaded strings keep their positions; strings only present in cells follow
        let mut shared_strings = workbook.shared_strings().to_vec();
        let mut string_index: AHashMap<String, usize> = AHashMap::new();
        for (i, s) in shared_strings.iter().enumerate() {
            string_index.entry(s.clone()).or_insert(i);
        }
        for sheet in workbook.worksheets() {
            for (_, _, cell) in sheet.iter_cells() {
                let text = match &cell.value {
                    CellValue::String(s) => s,
                    _ => continue,
                };
                if !string_index.contains_key(text) {
                    string_index.insert(text.clone(), shared_strings.len());
                    shared_strings.push(text.clone());
                }
            }
        }

        let has_sst_rel = relationships
            .find_by_type(&RelationshipType::SharedStrings)
            .is_some();
        let shared_strings_part = (has_sst_rel || !shared_strings.is_empty()).then(|| {
            Self::ensure_part(
                &mut relationships,
                &mut manifest,
                &base_dir,
                RelationshipType::SharedStrings,
                "sharedStrings.xml",
                content_type::SHARED_STRINGS,
            )
        });

        let theme_part = relationships
            .find_by_type(&RelationshipType::Theme)
            .map(|rel| package::resolve(&base_dir, &rel.target));

        for sheet in workbook.worksheets() {
            if let Ok(rel) = relationships.get(sheet.rel_id()) {
                let part = package::resolve(&base_dir, &rel.target);
                if !manifest.has_override(&part) {
                    manifest.add_override(&part, content_type::WORKSHEET);
                }
            }
        }

        Self {
            manifest,
            root_relationships,
            relationships,
            workbook_part,
            styles_part,
            shared_strings_part,
            theme_part,
            shared_strings,
            string_index,
        }
    }

    fn ensure_part(
        relationships: &mut Relationships,
        manifest: &mut Manifest,
        base_dir: &str,
        rel_type: RelationshipType,
        default_target: &str,
        ct: &str,
    ) -> String {
        let target = match relationships.find_by_type(&rel_type) {
            Some(rel) => rel.target.clone(),
            None => {
                relationships.add_next(rel_type, default_target);
                default_target.to_string()
            }
        };
        let part = package::resolve(base_dir, &target);
        if !manifest.has_override(&part) {
            manifest.add_override(&part, ct);
        }
        part
    }

    fn part_for(&self, sheet: &Worksheet) -> XlsxResult<String> {
        let rel = self.relationships.get(sheet.rel_id())?;
        Ok(package::resolve(
            package::directory(&self.workbook_part),
            &rel.target,
        ))
    }
}

struct PackageWriter<W: Write + Seek> {
    zip: zip::ZipWriter<W>,
    options: zip::write::SimpleFileOptions,
}

impl<W: Write + Seek> PackageWriter<W> {
    fn write_bytes(&mut self, name: &str, bytes: &[u8]) -> XlsxResult<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(bytes)?;
        debug!("wrote part {} ({} bytes)", name, bytes.len());
        Ok(())
    }

    fn write_xml(&mut self, name: &str, root: &XmlElement) -> XlsxResult<()> {
        self.write_bytes(name, &root.to_xml_bytes())
    }
}
