//! Content-type manifest (`[Content_Types].xml`)

/// Content types used by the parts this library reads and writes
pub mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const WORKBOOK: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
    pub const WORKSHEET: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
    pub const SHARED_STRINGS: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const JPEG: &str = "image/jpeg";
}

/// Maps part names to content types, by extension default or per-part override
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Manifest {
    /// `(extension, content type)`; extensions are matched case-insensitively
    defaults: Vec<(String, String)>,
    /// `(absolute part name, content type)`
    overrides: Vec<(String, String)>,
}

impl Manifest {
    /// An empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// The defaults every package carries (`rels` and `xml`)
    pub fn with_defaults() -> Self {
        let mut manifest = Self::new();
        manifest.add_default("rels", content_type::RELATIONSHIPS);
        manifest.add_default("xml", content_type::XML);
        manifest
    }

    /// Register or replace an extension default
    pub fn add_default<E: Into<String>, C: Into<String>>(&mut self, extension: E, content_type: C) {
        let extension = extension.into();
        let content_type = content_type.into();
        match self
            .defaults
            .iter_mut()
            .find(|(e, _)| e.eq_ignore_ascii_case(&extension))
        {
            Some(slot) => slot.1 = content_type,
            None => self.defaults.push((extension, content_type)),
        }
    }

    /// Register or replace a part override; part names are normalised to start with `/`
    pub fn add_override<P: AsRef<str>, C: Into<String>>(&mut self, part: P, content_type: C) {
        let part = normalize(part.as_ref());
        let content_type = content_type.into();
        match self.overrides.iter_mut().find(|(p, _)| *p == part) {
            Some(slot) => slot.1 = content_type,
            None => self.overrides.push((part, content_type)),
        }
    }

    /// Drop the override of a part, if any
    pub fn remove_override(&mut self, part: &str) {
        let part = normalize(part);
        self.overrides.retain(|(p, _)| *p != part);
    }

    /// Check whether a part has an override
    pub fn has_override(&self, part: &str) -> bool {
        let part = normalize(part);
        self.overrides.iter().any(|(p, _)| *p == part)
    }

    /// Check whether an extension has a default
    pub fn has_default(&self, extension: &str) -> bool {
        self.defaults
            .iter()
            .any(|(e, _)| e.eq_ignore_ascii_case(extension))
    }

    /// Resolve a part's content type: override first, then extension default
    pub fn content_type(&self, part: &str) -> Option<&str> {
        let part = normalize(part);
        if let Some((_, ct)) = self.overrides.iter().find(|(p, _)| *p == part) {
            return Some(ct);
        }
        let ext = part.rsplit_once('.').map(|(_, e)| e)?;
        self.defaults
            .iter()
            .find(|(e, _)| e.eq_ignore_ascii_case(ext))
            .map(|(_, ct)| ct.as_str())
    }

    /// Extension defaults in insertion order
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(e, c)| (e.as_str(), c.as_str()))
    }

    /// Part overrides in insertion order
    pub fn overrides(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides.iter().map(|(p, c)| (p.as_str(), c.as_str()))
    }
}

fn normalize(part: &str) -> String {
    if part.starts_with('/') {
        part.to_string()
    } else {
        format!("/{}", part)
    }
}
