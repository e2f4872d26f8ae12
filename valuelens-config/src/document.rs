//! Minimal structured-document model used for persisted renderer settings.
//!
//! An [`Element`] is a named node with string attributes and ordered
//! children. It is just rich enough to describe the versioned renderer
//! document; serde maps it to YAML on disk.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named node with string attributes and ordered child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Element name (e.g. `renderers`, `node`).
    pub name: String,

    /// Attribute map. Sorted so serialized output is stable.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Child elements in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set (or replace) an attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Look up an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Iterate over the children with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Parse a YAML-encoded element tree.
    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(contents)
    }

    /// Encode this element tree as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml_ng::Error> {
        serde_yaml_ng::to_string(self)
    }
}
