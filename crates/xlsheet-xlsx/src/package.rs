//! Part naming inside the package

/// Content-types part
pub(crate) const CONTENT_TYPES_PART: &str = "[Content_Types].xml";
/// Relationships of the package root
pub(crate) const ROOT_RELS_PART: &str = "_rels/.rels";

pub(crate) const CONTENT_TYPES_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/content-types";
pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub(crate) const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub(crate) const OFFICE_REL_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Directory of a part, without trailing slash (`"xl/workbook.xml"` -> `"xl"`)
pub(crate) fn directory(part: &str) -> &str {
    part.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Relationships part that belongs to `part` (`"xl/workbook.xml"` -> `"xl/_rels/workbook.xml.rels"`)
pub(crate) fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

pub(crate) use xlsheet_core::relationship::resolve_target as resolve;
