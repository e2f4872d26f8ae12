//! Versioned encoding of the user renderer list.
//!
//! Document layout:
//!
//! ```yaml
//! name: renderers
//! attributes: { VERSION: "3" }
//! children:
//!   - name: node
//!     attributes: { enabled: "true" }
//!     children:
//!       - name: renderer
//!         attributes: { kind: matcher, name: Point, pattern-kind: exact, ... }
//! ```
//!
//! A document whose version differs from [`CURRENT_VERSION`] decodes to an
//! empty list. Records that fail to decode are skipped.

use std::collections::HashMap;

use crate::config::Element;

use super::node::RendererNode;
use super::registry::RendererRegistry;
use super::renderers::matcher::{MATCHER_KIND, MatcherRenderer};
use super::renderers::template::TemplateError;
use super::traits::ValueRenderer;

/// Format version written by [`PersistenceCodec::save`].
pub const CURRENT_VERSION: i64 = 3;
pub const ROOT_ELEMENT: &str = "renderers";
pub const NODE_ELEMENT: &str = "node";
pub const RENDERER_ELEMENT: &str = "renderer";
pub const VERSION_ATTRIBUTE: &str = "VERSION";
pub const ENABLED_ATTRIBUTE: &str = "enabled";
pub const KIND_ATTRIBUTE: &str = "kind";

/// Errors raised while encoding or decoding a single record.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("expected <{expected}> element, found <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },

    #[error("<node> has no <renderer> child")]
    MissingRenderer,

    #[error("no decoder registered for renderer kind '{0}'")]
    UnknownKind(String),

    #[error("invalid type pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid label template: {0}")]
    Template(#[from] TemplateError),

    #[error("renderer '{0}' cannot be persisted")]
    NotPersistable(String),
}

/// Builds a renderer from its `renderer` record.
pub type RecordDecoder = fn(&Element) -> Result<Box<dyn ValueRenderer>, CodecError>;

/// Result of decoding a document without applying it.
#[derive(Debug, Default)]
pub struct DecodedNodes {
    /// Version read from the document, `-1` when missing or not an integer.
    pub version: i64,
    pub version_matched: bool,
    pub nodes: Vec<RendererNode>,
    pub skipped: usize,
}

/// Summary of a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub version: i64,
    pub version_matched: bool,
    pub loaded: usize,
    pub skipped: usize,
}

/// Stateless translator between a [`RendererRegistry`] user list and an
/// [`Element`] document.
#[derive(Debug, Clone)]
pub struct PersistenceCodec {
    decoders: HashMap<String, RecordDecoder>,
}

impl Default for PersistenceCodec {
    fn default() -> Self {
        Self::empty().with_decoder(MATCHER_KIND, decode_matcher)
    }
}

fn decode_matcher(element: &Element) -> Result<Box<dyn ValueRenderer>, CodecError> {
    Ok(Box::new(MatcherRenderer::read_record(element)?))
}

impl PersistenceCodec {
    /// Codec that knows no renderer kinds.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Register the decoder for records whose `kind` attribute is `kind`.
    pub fn with_decoder(mut self, kind: impl Into<String>, decoder: RecordDecoder) -> Self {
        self.decoders.insert(kind.into(), decoder);
        self
    }

    /// Encode the registry's user list, in order.
    pub fn save(&self, registry: &RendererRegistry) -> Result<Element, CodecError> {
        let mut root =
            Element::new(ROOT_ELEMENT).with_attribute(VERSION_ATTRIBUTE, CURRENT_VERSION.to_string());
        for node in registry.auto_nodes().iter() {
            root.add_child(self.encode_node(node)?);
        }
        Ok(root)
    }

    pub fn encode_node(&self, node: &RendererNode) -> Result<Element, CodecError> {
        Ok(Element::new(NODE_ELEMENT)
            .with_attribute(ENABLED_ATTRIBUTE, node.is_enabled().to_string())
            .with_child(node.renderer().write_record()?))
    }

    /// Decode `document` into a node list without touching any registry.
    pub fn decode(&self, document: &Element) -> DecodedNodes {
        let version = document
            .attribute(VERSION_ATTRIBUTE)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(-1);

        if version != CURRENT_VERSION {
            return DecodedNodes {
                version,
                version_matched: false,
                ..Default::default()
            };
        }

        let mut decoded = DecodedNodes {
            version,
            version_matched: true,
            ..Default::default()
        };
        for (ordinal, record) in document.children_named(NODE_ELEMENT).enumerate() {
            match self.decode_node(record) {
                Ok(node) => decoded.nodes.push(node),
                Err(e) => {
                    crate::debug_log!("RENDERERS", "skipping renderer record {}: {}", ordinal, e);
                    decoded.skipped += 1;
                }
            }
        }
        decoded
    }

    pub fn decode_node(&self, record: &Element) -> Result<RendererNode, CodecError> {
        if record.name != NODE_ELEMENT {
            return Err(CodecError::UnexpectedElement {
                expected: NODE_ELEMENT,
                found: record.name.clone(),
            });
        }
        let enabled = match record.attribute(ENABLED_ATTRIBUTE) {
            None => true,
            Some(raw) => raw.trim().parse::<bool>().map_err(|_| CodecError::InvalidAttribute {
                attribute: ENABLED_ATTRIBUTE,
                value: raw.to_string(),
            })?,
        };
        let renderer = record
            .child(RENDERER_ELEMENT)
            .ok_or(CodecError::MissingRenderer)?;
        let kind = renderer
            .attribute(KIND_ATTRIBUTE)
            .ok_or(CodecError::MissingAttribute {
                element: RENDERER_ELEMENT,
                attribute: KIND_ATTRIBUTE,
            })?;
        let decoder = self
            .decoders
            .get(kind)
            .ok_or_else(|| CodecError::UnknownKind(kind.to_string()))?;

        Ok(RendererNode::from_boxed(decoder(renderer)?).with_enabled(enabled))
    }

    /// Replace the registry's user list with the decoded document.
    ///
    /// On a version mismatch the list is cleared. Listeners are notified
    /// exactly once either way.
    pub fn load(&self, document: &Element, registry: &RendererRegistry) -> LoadReport {
        let decoded = self.decode(document);
        let report = LoadReport {
            version: decoded.version,
            version_matched: decoded.version_matched,
            loaded: decoded.nodes.len(),
            skipped: decoded.skipped,
        };
        registry.set_auto_nodes(decoded.nodes);
        report
    }
}
