//! Package relationships
//!
//! A relationship links a source part (the package root or the workbook part)
//! to a target part by id. Ids are unique within one [`Relationships`] list.

use crate::error::{Error, Result};

const OFFICE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// The kind of part a relationship points to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelationshipType {
    OfficeDocument,
    Worksheet,
    Styles,
    SharedStrings,
    Theme,
    Thumbnail,
    CoreProperties,
    ExtendedProperties,
    /// Any type URI this library does not interpret, kept verbatim
    Other(String),
}

impl RelationshipType {
    /// The type URI written to the relationships part
    pub fn uri(&self) -> String {
        match self {
            RelationshipType::OfficeDocument => format!("{}/officeDocument", OFFICE_REL),
            RelationshipType::Worksheet => format!("{}/worksheet", OFFICE_REL),
            RelationshipType::Styles => format!("{}/styles", OFFICE_REL),
            RelationshipType::SharedStrings => format!("{}/sharedStrings", OFFICE_REL),
            RelationshipType::Theme => format!("{}/theme", OFFICE_REL),
            RelationshipType::ExtendedProperties => format!("{}/extended-properties", OFFICE_REL),
            RelationshipType::Thumbnail => format!("{}/metadata/thumbnail", PACKAGE_REL),
            RelationshipType::CoreProperties => format!("{}/metadata/core-properties", PACKAGE_REL),
            RelationshipType::Other(uri) => uri.clone(),
        }
    }

    /// Classify a type URI
    pub fn from_uri(uri: &str) -> Self {
        let known = [
            RelationshipType::OfficeDocument,
            RelationshipType::Worksheet,
            RelationshipType::Styles,
            RelationshipType::SharedStrings,
            RelationshipType::Theme,
            RelationshipType::Thumbnail,
            RelationshipType::CoreProperties,
            RelationshipType::ExtendedProperties,
        ];
        known
            .into_iter()
            .find(|t| t.uri() == uri)
            .unwrap_or_else(|| RelationshipType::Other(uri.to_string()))
    }
}

/// One relationship entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    pub id: String,
    pub rel_type: RelationshipType,
    /// Target path, relative to the source part's directory
    pub target: String,
    /// Target lies outside the package
    pub external: bool,
}

/// Resolve a relationship target against the directory of its source part
///
/// Absolute targets (`/xl/styles.xml`) are package-rooted; `..` segments step up.
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let (mut segments, rest): (Vec<&str>, &str) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (
            base_dir.split('/').filter(|s| !s.is_empty()).collect(),
            target,
        ),
    };
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

impl Relationship {
    /// Create an internal relationship
    pub fn new<I: Into<String>, T: Into<String>>(id: I, rel_type: RelationshipType, target: T) -> Self {
        Self {
            id: id.into(),
            rel_type,
            target: target.into(),
            external: false,
        }
    }

    /// Package part this relationship points to, or `None` for an external target
    pub fn part_name(&self, base_dir: &str) -> Option<String> {
        (!self.external).then(|| resolve_target(base_dir, &self.target))
    }
}

/// An ordered list of relationships with unique ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a relationship, failing with [`Error::NameCollision`] on a duplicate id
    pub fn add(&mut self, relationship: Relationship) -> Result<()> {
        if self.contains(&relationship.id) {
            return Err(Error::NameCollision(relationship.id));
        }
        self.entries.push(relationship);
        Ok(())
    }

    /// Append a relationship under a freshly issued id, returning the id
    pub fn add_next<T: Into<String>>(&mut self, rel_type: RelationshipType, target: T) -> String {
        let id = self.next_id();
        self.entries
            .push(Relationship::new(id.clone(), rel_type, target));
        id
    }

    /// An id not used by any entry: `rId` followed by one more than the largest
    /// numeric suffix in use
    pub fn next_id(&self) -> String {
        let max = self
            .entries
            .iter()
            .filter_map(|r| r.id.strip_prefix("rId"))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .unwrap_or(0);
        format!("rId{}", max + 1)
    }

    /// Check whether an id is in use
    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }

    /// Get a relationship by id
    pub fn get(&self, id: &str) -> Result<&Relationship> {
        self.entries
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::NotFound(format!("relationship {}", id)))
    }

    /// First relationship of the given type
    pub fn find_by_type(&self, rel_type: &RelationshipType) -> Option<&Relationship> {
        self.entries.iter().find(|r| &r.rel_type == rel_type)
    }

    /// Remove a relationship by id
    pub fn remove(&mut self, id: &str) -> Option<Relationship> {
        let idx = self.entries.iter().position(|r| r.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Remove every relationship of the given type
    pub fn remove_type(&mut self, rel_type: &RelationshipType) {
        self.entries.retain(|r| &r.rel_type != rel_type);
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_type_uri_round_trip() {
        for t in [
            RelationshipType::Worksheet,
            RelationshipType::Thumbnail,
            RelationshipType::Other("urn:x".into()),
        ] {
            assert_eq!(RelationshipType::from_uri(&t.uri()), t);
        }
    }

    #[test]
    fn test_next_id_skips_gaps() {
        let mut rels = Relationships::new();
        assert_eq!(rels.next_id(), "rId1");
        rels.add(Relationship::new("rId4", RelationshipType::Styles, "styles.xml"))
            .unwrap();
        rels.add(Relationship::new("custom", RelationshipType::Theme, "theme/theme1.xml"))
            .unwrap();
        assert_eq!(rels.next_id(), "rId5");
        assert_eq!(
            rels.add_next(RelationshipType::Worksheet, "worksheets/sheet1.xml"),
            "rId5"
        );
    }

    #[test]
    fn test_duplicate_id() {
        let mut rels = Relationships::new();
        rels.add(Relationship::new("rId1", RelationshipType::Styles, "a"))
            .unwrap();
        let err = rels
            .add(Relationship::new("rId1", RelationshipType::Theme, "b"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NameCollision);
        assert_eq!(rels.get("rId1").unwrap().target, "a");
        assert_eq!(rels.get("rId9").unwrap_err().kind(), ErrorKind::NotFound);
    }
}
