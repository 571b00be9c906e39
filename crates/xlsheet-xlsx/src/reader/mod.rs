//! XLSX reader

use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

use log::{debug, warn};

use crate::error::{XlsxError, XlsxResult};
use crate::escape::decode_excel_escapes;
use crate::package::{self, CONTENT_TYPES_PART, ROOT_RELS_PART};
use crate::styles::read_stylesheet;
use crate::xml::{parse_bool, XmlElement};
use xlsheet_core::{
    CellAddress, CellValue, Error, Manifest, NameScope, NamedRange, Relationship,
    RelationshipType, Relationships, Workbook, Worksheet,
};

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    /// Read a workbook from an in-memory package
    pub fn read_bytes(bytes: &[u8]) -> XlsxResult<Workbook> {
        Self::read(Cursor::new(bytes))
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;
        Self::read_archive(&mut archive)
    }

    /// Read a workbook from an open zip archive
    ///
    /// A failed read leaves no partial workbook behind; the error is returned and
    /// nothing else is kept.
    pub fn read_archive<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Workbook> {
        let mut workbook = Workbook::empty();

        let content_types = Self::read_xml(archive, CONTENT_TYPES_PART)?
            .ok_or_else(|| XlsxError::MissingPart(CONTENT_TYPES_PART.into()))?;
        *workbook.manifest_mut() = Self::read_manifest(&content_types);

        let root_rels = match Self::read_xml(archive, ROOT_RELS_PART)? {
            Some(root) => Self::read_relationships(&root)?,
            None => return Err(XlsxError::MissingPart(ROOT_RELS_PART.into())),
        };
        for rel in root_rels.iter() {
            workbook.add_root_relationship(rel.clone())?;
        }

        let workbook_part = root_rels
            .find_by_type(&RelationshipType::OfficeDocument)
            .map(|rel| package::resolve("", &rel.target))
            .ok_or_else(|| XlsxError::MissingPart("office document relationship".into()))?;
        let base_dir = package::directory(&workbook_part).to_string();

        let rels_part = package::rels_part_for(&workbook_part);
        if let Some(root) = Self::read_xml(archive, &rels_part)? {
            for rel in Self::read_relationships(&root)?.iter() {
                workbook.add_relationship(rel.clone())?;
            }
        }

        let part_of = |workbook: &Workbook, rel_type: RelationshipType| {
            workbook
                .relationships()
                .find_by_type(&rel_type)
                .map(|rel| package::resolve(&base_dir, &rel.target))
        };

        if let Some(part) = part_of(&workbook, RelationshipType::Styles) {
            let root = Self::read_xml(archive, &part)?
                .ok_or_else(|| XlsxError::MissingPart(part.clone()))?;
            workbook.replace_stylesheet(read_stylesheet(&root)?);
        }

        if let Some(part) = part_of(&workbook, RelationshipType::SharedStrings) {
            if let Some(root) = Self::read_xml(archive, &part)? {
                for text in Self::read_shared_strings(&root) {
                    // Keep positions: cells refer to entries by index
                    workbook.add_shared_string(text, true);
                }
            }
        }

        if let Some(part) = part_of(&workbook, RelationshipType::Theme) {
            if let Some(bytes) = Self::read_bytes_part(archive, &part)? {
                debug!("read theme part {} ({} bytes)", part, bytes.len());
                workbook.set_theme(bytes);
            }
        }

        Self::read_thumbnail(archive, &mut workbook)?;

        let root = Self::read_xml(archive, &workbook_part)?
            .ok_or_else(|| XlsxError::MissingPart(workbook_part.clone()))?;
        Self::read_workbook_part(archive, &root, &base_dir, &mut workbook)?;

        debug!(
            "read workbook: {} sheets, {} shared strings",
            workbook.sheet_count(),
            workbook.shared_strings().len()
        );
        Ok(workbook)
    }

    /// Read one entry, `None` if the archive has no such entry
    fn read_bytes_part<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        name: &str,
    ) -> XlsxResult<Option<Vec<u8>>> {
        let mut file = match archive.by_name(name) {
            Ok(f) => f,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn read_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        name: &str,
    ) -> XlsxResult<Option<XmlElement>> {
        match Self::read_bytes_part(archive, name)? {
            Some(bytes) => {
                debug!("read part {}", name);
                XmlElement::parse(&bytes).map(Some)
            }
            None => Ok(None),
        }
    }

    fn read_manifest(root: &XmlElement) -> Manifest {
        let mut manifest = Manifest::new();
        for node in root.children() {
            match node.local_name() {
                "Default" => {
                    if let (Some(ext), Some(ct)) =
                        (node.attribute("Extension"), node.attribute("ContentType"))
                    {
                        manifest.add_default(ext, ct);
                    }
                }
                "Override" => {
                    if let (Some(part), Some(ct)) =
                        (node.attribute("PartName"), node.attribute("ContentType"))
                    {
                        manifest.add_override(part, ct);
                    }
                }
                _ => {}
            }
        }
        manifest
    }

    fn read_relationships(root: &XmlElement) -> XlsxResult<Relationships> {
        let mut rels = Relationships::new();
        for node in root.children_named("Relationship") {
            let mut rel = Relationship::new(
                node.required_attribute("Id")?,
                RelationshipType::from_uri(node.required_attribute("Type")?),
                node.required_attribute("Target")?,
            );
            rel.external = node
                .attribute("TargetMode")
                .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));
            rels.add(rel)?;
        }
        Ok(rels)
    }

    /// Plain `<t>` or the concatenated runs of a rich `<r><t>` item
    fn string_item_text(item: &XmlElement) -> String {
        let text = match item.child("t") {
            Some(t) => t.text().to_string(),
            None => item
                .children_named("r")
                .filter_map(|run| run.child("t"))
                .map(|t| t.text())
                .collect(),
        };
        decode_excel_escapes(&text)
    }

    fn read_shared_strings(root: &XmlElement) -> Vec<String> {
        root.children_named("si")
            .map(Self::string_item_text)
            .collect()
    }

    fn read_thumbnail<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        workbook: &mut Workbook,
    ) -> XlsxResult<()> {
        let Some(rel) = workbook
            .root_relationships()
            .find_by_type(&RelationshipType::Thumbnail)
        else {
            return Ok(());
        };
        let part = package::resolve("", &rel.target);
        let Some(bytes) = Self::read_bytes_part(archive, &part)? else {
            return Ok(());
        };

        let extension = part.rsplit_once('.').map_or("jpeg", |(_, e)| e).to_string();
        let content_type = workbook
            .manifest()
            .content_type(&part)
            .unwrap_or(xlsheet_core::content_type::JPEG)
            .to_string();
        workbook.set_thumbnail(bytes, &extension, &content_type);
        Ok(())
    }

    fn read_workbook_part<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        root: &XmlElement,
        base_dir: &str,
        workbook: &mut Workbook,
    ) -> XlsxResult<()> {
        if let Some(pr) = root.child("workbookPr") {
            let settings = workbook.settings_mut();
            settings.date_1904 = pr.bool_attribute("date1904")?.unwrap_or(false);
            settings.code_name = pr.attribute("codeName").map(str::to_string);
        }

        let format_count = workbook.stylesheet().formats().len();
        let shared_strings = workbook.shared_strings().to_vec();
        let sheets = root.required_child("sheets")?;
        for node in sheets.children_named("sheet") {
            let title = node.required_attribute("name")?;
            let rel_id = node
                .attribute_local("id")
                .ok_or_else(|| XlsxError::malformed(format!("sheet {:?} has no r:id", title)))?;

            let part = package::resolve(base_dir, &workbook.relationship(rel_id)?.target);
            let sheet_root = Self::read_xml(archive, &part)?
                .ok_or_else(|| XlsxError::MissingPart(part.clone()))?;

            let sheet = workbook.create_sheet_with_rel(title, rel_id)?;
            Self::read_worksheet(&sheet_root, sheet, &shared_strings, format_count)?;
        }

        if let Some(view) = root.child("bookViews").and_then(|v| v.child("workbookView")) {
            let active: usize = view.parse_attribute("activeTab")?.unwrap_or(0);
            workbook.settings_mut().active_sheet = active.min(workbook.sheet_count().saturating_sub(1));
        }

        if let Some(names) = root.child("definedNames") {
            for node in names.children_named("definedName") {
                let scope = match node.parse_attribute::<usize>("localSheetId")? {
                    Some(index) => NameScope::Sheet(index),
                    None => NameScope::Workbook,
                };
                let mut range = NamedRange::new(node.required_attribute("name")?, node.text(), scope);
                range.hidden = node.bool_attribute("hidden")?.unwrap_or(false);
                range.comment = node.attribute("comment").map(str::to_string);
                workbook.add_named_range(range)?;
            }
        }
        Ok(())
    }

    /// Read `sheetData` into a worksheet
    ///
    /// Cells without an `r` attribute continue from the previous cell in the row.
    fn read_worksheet(
        root: &XmlElement,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
        format_count: usize,
    ) -> XlsxResult<()> {
        let Some(sheet_data) = root.child("sheetData") else {
            return Ok(());
        };

        let mut next_row = 0u32;
        for row in sheet_data.children_named("row") {
            let row_index = match row.parse_attribute::<u32>("r")? {
                Some(r) if r > 0 => r - 1,
                Some(_) => return Err(XlsxError::malformed("row number 0")),
                None => next_row,
            };
            next_row = row_index + 1;

            let mut next_col = 0u16;
            for c in row.children_named("c") {
                let addr = match c.attribute("r") {
                    Some(r) => CellAddress::parse(r)?,
                    None => CellAddress::new(row_index, next_col),
                };
                next_col = addr.col.saturating_add(1);

                if let Some(value) = Self::read_cell_value(c, shared_strings)? {
                    worksheet.set_value_at(addr.row, addr.col, value);
                }
                if let Some(s) = c.parse_attribute::<usize>("s")? {
                    if s >= format_count {
                        return Err(Error::IndexOutOfRange {
                            table: "format",
                            index: s,
                            len: format_count,
                        }
                        .into());
                    }
                    worksheet.set_format_at(addr.row, addr.col, s);
                }
            }
        }

        debug!(
            "read worksheet {:?}: {} cells",
            worksheet.title(),
            worksheet.cell_count()
        );
        Ok(())
    }

    fn read_cell_value(c: &XmlElement, shared_strings: &[String]) -> XlsxResult<Option<CellValue>> {
        let cell_type = c.attribute("t").unwrap_or("n");
        let raw = c.child("v").map(|v| v.text());

        let value = match (cell_type, raw) {
            ("inlineStr", _) => c
                .child("is")
                .map(|is| CellValue::String(Self::string_item_text(is))),
            (_, None) => None,
            ("s", Some(v)) => {
                let index: usize = v
                    .trim()
                    .parse()
                    .map_err(|_| XlsxError::malformed(format!("invalid shared string index {:?}", v)))?;
                let text = shared_strings.get(index).ok_or(Error::IndexOutOfRange {
                    table: "shared string",
                    index,
                    len: shared_strings.len(),
                })?;
                Some(CellValue::String(text.clone()))
            }
            ("b", Some(v)) => Some(CellValue::Boolean(parse_bool(v)?)),
            ("str", Some(v)) => Some(CellValue::String(decode_excel_escapes(v))),
            // Error values are kept as their literal text
            ("e", Some(v)) => Some(CellValue::String(v.to_string())),
            ("n", Some(v)) => Some(CellValue::Number(v.trim().parse().map_err(|_| {
                XlsxError::malformed(format!("invalid number {:?}", v))
            })?)),
            (other, Some(_)) => {
                warn!("skipping cell value of unknown type {:?}", other);
                None
            }
        };

        match c.child("f") {
            Some(f) => Ok(Some(CellValue::Formula {
                text: f.text().trim_start_matches('=').to_string(),
                cached_value: value.map(Box::new),
            })),
            None => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_rich_text_item() {
        let si = XmlElement::parse(br#"<si><r><t>Hello </t></r><r><rPr/><t>World</t></r></si>"#)
            .unwrap();
        assert_eq!(XlsxReader::string_item_text(&si), "Hello World");
    }

    fn write_minimal(zip: &mut zip::ZipWriter<Cursor<&mut Vec<u8>>>, sheet_xml: &str) {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#).unwrap();

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#).unwrap();

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><workbookPr date1904="1"/><sheets><sheet name="Data" sheetId="1" r:id="rId1"/></sheets><definedNames><definedName name="Total" hidden="1">Data!$A$1</definedName></definedNames></workbook>"#).unwrap();

        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#).unwrap();

        zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
        zip.write_all(sheet_xml.as_bytes()).unwrap();
    }

    fn package(sheet_xml: &str) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            write_minimal(&mut zip, sheet_xml);
            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_read_minimal_package() {
        let bytes = package(
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
                 <row r="1"><c r="A1"><v>1.5</v></c><c t="b"><v>1</v></c><c t="inlineStr"><is><t>hi</t></is></c></row>
                 <row r="3"><c r="B3"><f>A1*2</f><v>3</v></c></row>
               </sheetData></worksheet>"#,
        );
        let workbook = XlsxReader::read_bytes(&bytes).unwrap();

        assert_eq!(workbook.sheet_titles(), vec!["Data".to_string()]);
        assert!(workbook.settings().date_1904);
        assert!(workbook.named_range("Total").unwrap().hidden);

        let sheet = workbook.get_sheet_by_name("Data").unwrap();
        assert_eq!(sheet.value("A1").unwrap(), CellValue::Number(1.5));
        assert_eq!(sheet.value("B1").unwrap(), CellValue::Boolean(true));
        assert_eq!(sheet.value("C1").unwrap(), CellValue::string("hi"));
        assert_eq!(
            sheet.value("B3").unwrap(),
            CellValue::Formula {
                text: "A1*2".into(),
                cached_value: Some(Box::new(CellValue::Number(3.0))),
            }
        );
    }

    #[test]
    fn test_cell_format_out_of_range() {
        let bytes = package(
            r#"<worksheet><sheetData><row r="1"><c r="A1" s="7"><v>1</v></c></row></sheetData></worksheet>"#,
        );
        let err = XlsxReader::read_bytes(&bytes).unwrap_err();
        assert_eq!(err.kind(), xlsheet_core::ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn test_missing_content_types() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file("xl/workbook.xml", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"<workbook/>").unwrap();
            zip.finish().unwrap();
        }
        let err = XlsxReader::read_bytes(&buf).unwrap_err();
        assert!(matches!(err, XlsxError::MissingPart(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let err = XlsxReader::read_bytes(b"definitely not a zip").unwrap_err();
        assert_eq!(err.kind(), xlsheet_core::ErrorKind::IoFailure);
    }
}
