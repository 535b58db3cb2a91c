//! Typed CMCI request bodies
//!
//! A mutating CMCI request carries exactly one of three shapes inside
//! `<request>`: an `action` with optional parameters, a `create` with a
//! CSD parameter and attributes, or an `update` with attributes.

use crate::xml::XmlElement;
use serde_json::Value;

/// `<parameter name=".." value=".."/>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    fn to_element(&self) -> XmlElement {
        let element = XmlElement::new("parameter").attribute("name", &self.name);
        match &self.value {
            Some(value) => element.attribute("value", value),
            None => element,
        }
    }
}

/// Ordered attribute list rendered on `<attributes/>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an earlier value for the same key
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
        self
    }

    /// Set an attribute only when a value is present
    pub fn set_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn to_element(&self) -> XmlElement {
        self.0
            .iter()
            .fold(XmlElement::new("attributes"), |element, (k, v)| element.attribute(k, v))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestEnvelope {
    /// `<action name="..">` with optional `<parameter>` children
    Action {
        name: String,
        parameters: Vec<Parameter>,
    },
    /// `<create>` of a CSD definition
    Create {
        parameter: Parameter,
        attributes: Attributes,
    },
    /// `<update>` of attributes on installed resources
    Update { attributes: Attributes },
}

impl RequestEnvelope {
    pub fn action(name: impl Into<String>) -> Self {
        RequestEnvelope::Action {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    pub fn action_with(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        RequestEnvelope::Action {
            name: name.into(),
            parameters,
        }
    }

    /// Create a definition in the CSD
    pub fn create_in_csd(attributes: Attributes) -> Self {
        RequestEnvelope::Create {
            parameter: Parameter::new("CSD"),
            attributes,
        }
    }

    pub fn update(attributes: Attributes) -> Self {
        RequestEnvelope::Update { attributes }
    }

    pub(crate) fn to_element(&self) -> XmlElement {
        let body = match self {
            RequestEnvelope::Action { name, parameters } => parameters
                .iter()
                .fold(XmlElement::new("action").attribute("name", name), |action, p| {
                    action.child(p.to_element())
                }),
            RequestEnvelope::Create {
                parameter,
                attributes,
            } => XmlElement::new("create")
                .child(parameter.to_element())
                .child(attributes.to_element()),
            RequestEnvelope::Update { attributes } => {
                XmlElement::new("update").child(attributes.to_element())
            }
        };
        XmlElement::new("request").child(body)
    }
}

/// Body handed to PUT/POST
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Caller-supplied XML, sent verbatim
    Raw(String),
    Envelope(RequestEnvelope),
    /// Free-form tree using `$` for attributes and `_` for text
    Tree(Value),
}

impl From<RequestEnvelope> for Payload {
    fn from(envelope: RequestEnvelope) -> Self {
        Payload::Envelope(envelope)
    }
}

impl From<String> for Payload {
    fn from(xml: String) -> Self {
        Payload::Raw(xml)
    }
}

impl From<&str> for Payload {
    fn from(xml: &str) -> Self {
        Payload::Raw(xml.to_string())
    }
}

impl From<Value> for Payload {
    fn from(tree: Value) -> Self {
        Payload::Tree(tree)
    }
}
