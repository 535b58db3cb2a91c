//! CMCI XML codec
//!
//! Requests are rendered as headless XML. Responses are parsed into a
//! `serde_json::Value` tree with these rules:
//!
//! - tag names are lower-cased (configurable)
//! - attributes are merged onto the element's object
//! - an element seen once under a parent is an object, a repeated element
//!   becomes an array in document order
//! - an element holding only text becomes that string; text next to
//!   attributes or children is kept under `_`
//! - an empty element without attributes becomes `""`
//!
//! The parse is a plain synchronous pull over `quick_xml::Reader`.

use crate::envelope::Payload;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use thiserror::Error;

/// Key holding attributes when building XML from a value tree
pub const ATTR_KEY: &str = "$";

/// Key holding character data next to attributes or children
pub const TEXT_KEY: &str = "_";

/// Root name used when a value tree has no single root key
const DEFAULT_ROOT: &str = "root";

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("Malformed XML: {0}")]
    Malformed(#[from] quick_xml::Error),

    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Unclosed element <{0}> at end of document")]
    Unclosed(String),

    #[error("Closing tag </{0}> has no matching opening tag")]
    UnexpectedEnd(String),

    #[error("Document has no root element")]
    NoRoot,

    #[error("Document has more than one root element")]
    MultipleRoots,

    #[error("Text outside the root element: {0}")]
    StrayText(String),
}

/// Element under construction while parsing
struct PartialNode {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl PartialNode {
    fn open(name: String, fields: Map<String, Value>) -> Self {
        Self {
            name,
            fields,
            text: String::new(),
        }
    }

    fn add_child(&mut self, name: String, value: Value) {
        insert_or_append(&mut self.fields, name, value);
    }

    fn close(self) -> (String, Value) {
        let PartialNode {
            name,
            mut fields,
            text,
        } = self;

        let whitespace_only = text.trim().is_empty();
        let value = if fields.is_empty() {
            // Text-only (or empty) elements collapse to their text
            Value::String(text)
        } else {
            if !whitespace_only {
                fields.insert(TEXT_KEY.to_string(), Value::String(text));
            }
            Value::Object(fields)
        };
        (name, value)
    }
}

fn insert_or_append(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        None => {
            fields.insert(name, value);
        }
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// XML codec used by the REST client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlCodec {
    /// Lower-case tag names on parse
    pub normalize_tags: bool,
}

impl Default for XmlCodec {
    fn default() -> Self {
        Self { normalize_tags: true }
    }
}

impl XmlCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document into `{ <root>: <value> }`
    pub fn parse(&self, xml: &str) -> Result<Value, XmlError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<PartialNode> = Vec::new();
        let mut root: Option<(String, Value)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(XmlError::MultipleRoots);
                    }
                    let (name, fields) = self.open_element(&start)?;
                    stack.push(PartialNode::open(name, fields));
                }
                Event::Empty(start) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(XmlError::MultipleRoots);
                    }
                    let (name, fields) = self.open_element(&start)?;
                    let closed = PartialNode::open(name, fields).close();
                    attach(&mut stack, &mut root, closed);
                }
                Event::End(end) => {
                    let node = stack.pop().ok_or_else(|| {
                        XmlError::UnexpectedEnd(String::from_utf8_lossy(end.name().as_ref()).into_owned())
                    })?;
                    let closed = node.close();
                    attach(&mut stack, &mut root, closed);
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    match stack.last_mut() {
                        Some(node) => node.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => return Err(XmlError::StrayText(text.trim().to_string())),
                    }
                }
                Event::CData(data) => {
                    let text = std::str::from_utf8(&data)?;
                    match stack.last_mut() {
                        Some(node) => node.text.push_str(text),
                        None => return Err(XmlError::StrayText(text.to_string())),
                    }
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes carry no data
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlError::Unclosed(open.name));
        }

        let (name, value) = root.ok_or(XmlError::NoRoot)?;
        let mut document = Map::new();
        document.insert(name, value);
        Ok(Value::Object(document))
    }

    /// Render a payload as headless XML; raw strings pass through untouched
    pub fn to_xml(&self, payload: &Payload) -> String {
        match payload {
            Payload::Raw(xml) => xml.clone(),
            Payload::Envelope(envelope) => envelope.to_element().render(),
            Payload::Tree(tree) => XmlElement::from_value(tree).render(),
        }
    }

    fn open_element(&self, start: &BytesStart<'_>) -> Result<(String, Map<String, Value>), XmlError> {
        let raw_name = std::str::from_utf8(start.name().as_ref())?.to_string();
        let name = if self.normalize_tags {
            raw_name.to_lowercase()
        } else {
            raw_name
        };

        let mut fields = Map::new();
        for attribute in start.attributes() {
            let attribute = attribute?;
            let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
            let value = attribute.unescape_value()?.into_owned();
            insert_or_append(&mut fields, key, Value::String(value));
        }
        Ok((name, fields))
    }
}

fn attach(stack: &mut [PartialNode], root: &mut Option<(String, Value)>, closed: (String, Value)) {
    match stack.last_mut() {
        Some(parent) => parent.add_child(closed.0, closed.1),
        None => *root = Some(closed),
    }
}

/// Element tree rendered into request bodies
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    pub text: Option<String>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Build from a value tree using `$` for attributes and `_` for text
    pub fn from_value(tree: &Value) -> Self {
        match tree {
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                // A top-level array still needs a single document element
                Some((name, value)) if !value.is_array() => Self::element_from_value(name, value),
                _ => Self::element_from_value(DEFAULT_ROOT, tree),
            },
            _ => Self::element_from_value(DEFAULT_ROOT, tree),
        }
    }

    fn element_from_value(name: &str, value: &Value) -> Self {
        let mut element = XmlElement::new(name);
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    match (key.as_str(), child) {
                        (ATTR_KEY, Value::Object(attributes)) => {
                            for (attr, attr_value) in attributes {
                                element.attributes.push((attr.clone(), scalar_text(attr_value)));
                            }
                        }
                        (TEXT_KEY, text) => element.text = Some(scalar_text(text)),
                        (_, Value::Array(items)) => {
                            for item in items {
                                element.children.push(Self::element_from_value(key, item));
                            }
                        }
                        _ => element.children.push(Self::element_from_value(key, child)),
                    }
                }
            }
            Value::Array(items) => {
                for item in items {
                    element.children.push(Self::element_from_value(name, item));
                }
            }
            Value::Null => {}
            scalar => element.text = Some(scalar_text(scalar)),
        }
        element
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }

        let text = self.text.as_deref().filter(|t| !t.is_empty());
        if self.children.is_empty() && text.is_none() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        if let Some(text) = text {
            out.push_str(&escape(text));
        }
        for child in &self.children {
            child.render_into(out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
