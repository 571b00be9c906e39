//! A small owned element tree over quick-xml
//!
//! Package parts are parsed into [`XmlElement`] trees and built back the same
//! way. Element lookups compare local names, so a part written with a namespace
//! prefix (`<x:font>`) reads like an unprefixed one.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};

/// One element: name, ordered attributes, child elements and concatenated text
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    /// Create an element with no attributes or content
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a document and return its root element
    pub fn parse(bytes: &[u8]) -> XlsxResult<Self> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(false);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => stack.push(Self::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| XlsxError::malformed("unbalanced end tag"))?;
                    Self::attach(&mut stack, &mut root, element)?;
                }
                Event::Text(e) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(top) = stack.last_mut() {
                        top.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(XlsxError::malformed("unclosed element at end of document"));
        }
        root.ok_or_else(|| XlsxError::malformed("document has no root element"))
    }

    fn from_start(e: &BytesStart<'_>) -> XlsxResult<Self> {
        let mut element = Self::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
        for attr in e.attributes() {
            let attr = attr.map_err(|err| XlsxError::malformed(err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.push((key, value));
        }
        Ok(element)
    }

    fn attach(
        stack: &mut [XmlElement],
        root: &mut Option<XmlElement>,
        element: XmlElement,
    ) -> XlsxResult<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => return Err(XlsxError::malformed("more than one root element")),
        }
        Ok(())
    }

    // === Navigation ===

    /// The element name as written, including any prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element name without its namespace prefix
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// First child with the given local name
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// First child with the given local name, or [`XlsxError::MalformedMarkup`]
    pub fn required_child(&self, name: &str) -> XlsxResult<&XmlElement> {
        self.child(name).ok_or_else(|| {
            XlsxError::malformed(format!("<{}> has no <{}> child", self.name, name))
        })
    }

    /// Every child with the given local name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// All children in document order
    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Attribute value by name
    ///
    /// A prefixed name (`r:id`) must match exactly; an unprefixed name matches
    /// only unprefixed attributes.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value by local name, whatever its prefix
    pub fn attribute_local(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| local(k) == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value by name, or [`XlsxError::MalformedMarkup`]
    pub fn required_attribute(&self, name: &str) -> XlsxResult<&str> {
        self.attribute(name).ok_or_else(|| {
            XlsxError::malformed(format!("<{}> is missing attribute {:?}", self.name, name))
        })
    }

    /// Parse a numeric attribute; absent gives `None`, unparsable is an error
    pub fn parse_attribute<T: std::str::FromStr>(&self, name: &str) -> XlsxResult<Option<T>> {
        match self.attribute(name) {
            None => Ok(None),
            Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
                XlsxError::malformed(format!(
                    "<{}> attribute {:?} has invalid value {:?}",
                    self.name, name, raw
                ))
            }),
        }
    }

    /// Read a boolean attribute; absent gives `None`
    pub fn bool_attribute(&self, name: &str) -> XlsxResult<Option<bool>> {
        self.attribute(name).map(parse_bool).transpose()
    }

    /// Concatenated text content
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    // === Building ===

    /// Set an attribute, returning the modified element
    pub fn with_attribute<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set a boolean attribute written as `"1"`/`"0"`, returning the modified element
    pub fn with_bool_attribute<K: Into<String>>(self, key: K, value: bool) -> Self {
        self.with_attribute(key, write_bool(value))
    }

    /// Set or replace an attribute
    pub fn set_attribute<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Set the text content, returning the modified element
    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    /// Append a child, returning the modified element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child
    pub fn push_child(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    /// Serialise as a standalone document with an XML declaration
    pub fn to_xml_bytes(&self) -> Vec<u8> {
        let mut out =
            String::from(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        out.push('\n');
        self.write_into(&mut out);
        out.into_bytes()
    }

    fn write_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attributes {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            out.push_str(&escape_xml(v));
            out.push('"');
        }
        if self.children.is_empty() && self.text.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&escape_xml(&self.text));
        for child in &self.children {
            child.write_into(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, l)| l)
}

/// Escape the five XML special characters
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}

/// Read a markup boolean: `"1"`/`"true"` and `"0"`/`"false"`
pub fn parse_bool(raw: &str) -> XlsxResult<bool> {
    match raw.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => Err(xlsheet_core::Error::unknown_enum("boolean", other).into()),
    }
}

/// Write a markup boolean
pub fn write_bool(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tree() {
        let xml = br#"<?xml version="1.0"?>
<x:styleSheet xmlns:x="urn:x"><x:fonts count="1"><x:font><x:b/><x:sz val="11"/></x:font></x:fonts></x:styleSheet>"#;
        let root = XmlElement::parse(xml).unwrap();
        assert_eq!(root.local_name(), "styleSheet");
        let font = root.child("fonts").unwrap().child("font").unwrap();
        assert!(font.child("b").is_some());
        assert_eq!(font.child("sz").unwrap().attribute("val"), Some("11"));
        assert_eq!(root.attribute_local("x"), Some("urn:x"));
    }

    #[test]
    fn test_text_and_entities() {
        let root = XmlElement::parse(br#"<t a="&lt;&amp;">  a &amp; b </t>"#).unwrap();
        assert_eq!(root.text(), "  a & b ");
        assert_eq!(root.attribute("a"), Some("<&"));
    }

    #[test]
    fn test_write_then_parse() {
        let tree = XmlElement::new("root")
            .with_attribute("q", "\"x\"")
            .with_child(XmlElement::new("empty"))
            .with_child(XmlElement::new("t").with_text("1 < 2"));
        let bytes = tree.to_xml_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("<empty/>"));
        assert_eq!(XmlElement::parse(&bytes).unwrap(), tree);
    }

    #[test]
    fn test_malformed_documents() {
        assert!(XmlElement::parse(b"").is_err());
        assert!(XmlElement::parse(b"<a><b></a>").is_err());
        assert!(XmlElement::parse(b"<a/><b/>").is_err());
    }

    #[test]
    fn test_bools() {
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("true").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert_eq!(
            parse_bool("yes").unwrap_err().kind(),
            xlsheet_core::ErrorKind::UnknownEnumValue
        );
        assert_eq!(write_bool(true), "1");
    }
}
