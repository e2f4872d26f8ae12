//! Renderer implementations.
//!
//! - [`primitive`], [`array`], [`class`]: the three built-in fallback
//!   renderers, grouped in [`DefaultRenderers`].
//! - [`matcher`]: user-defined renderers matching a type pattern and
//!   rendering a [`template::LabelTemplate`].

pub mod array;
pub mod class;
pub mod matcher;
pub mod primitive;
pub mod template;

use std::sync::Arc;

use crate::config::{ViewerConfig, theme_keys};

use super::text_renderer::ValueTextRenderer;
use super::traits::ValueRenderer;
use super::types::{ValueDescriptor, ValuePayload};

pub use array::ArrayRenderer;
pub use class::ClassRenderer;
pub use matcher::{MatcherRenderer, PatternKind, TypePattern};
pub use primitive::PrimitiveRenderer;
pub use template::{LabelTemplate, TemplateError, TemplatePart};

/// Presentation knobs shared by the built-in renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub string_max_length: Option<usize>,
    pub array_preview_limit: usize,
    pub field_preview_limit: usize,
    pub show_hex_for_integers: bool,
    pub show_object_ids: bool,
}

impl From<&ViewerConfig> for RenderOptions {
    fn from(config: &ViewerConfig) -> Self {
        Self {
            string_max_length: config.string_max_length,
            array_preview_limit: config.array_preview_limit,
            field_preview_limit: config.field_preview_limit,
            show_hex_for_integers: config.show_hex_for_integers,
            show_object_ids: config.show_object_ids,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from(&ViewerConfig::default())
    }
}

/// The three fallback renderers.
///
/// Created once by the host and shared (never cloned) by every registry, so
/// identity comparison against these instances is what makes a renderer a
/// default.
#[derive(Debug)]
pub struct DefaultRenderers {
    array: Arc<ArrayRenderer>,
    class: Arc<ClassRenderer>,
    primitive: Arc<PrimitiveRenderer>,
}

impl DefaultRenderers {
    pub fn new(options: RenderOptions) -> Arc<Self> {
        Arc::new(Self {
            array: Arc::new(ArrayRenderer::new(options.clone())),
            class: Arc::new(ClassRenderer::new(options.clone())),
            primitive: Arc::new(PrimitiveRenderer::new(options)),
        })
    }

    pub fn from_config(config: &ViewerConfig) -> Arc<Self> {
        Self::new(RenderOptions::from(config))
    }

    pub fn array(&self) -> Arc<dyn ValueRenderer> {
        self.array.clone()
    }

    pub fn class(&self) -> Arc<dyn ValueRenderer> {
        self.class.clone()
    }

    pub fn primitive(&self) -> Arc<dyn ValueRenderer> {
        self.primitive.clone()
    }

    /// True only for the three instances held by this set.
    pub fn is_default(&self, renderer: &dyn ValueRenderer) -> bool {
        let ptr = renderer as *const dyn ValueRenderer;
        std::ptr::addr_eq(ptr, Arc::as_ptr(&self.array))
            || std::ptr::addr_eq(ptr, Arc::as_ptr(&self.class))
            || std::ptr::addr_eq(ptr, Arc::as_ptr(&self.primitive))
    }
}

/// Compact rendering used for array elements, field values and template
/// placeholders. Never recurses into nested arrays or objects.
pub(crate) fn render_inline(
    value: &ValueDescriptor,
    out: &mut ValueTextRenderer<'_>,
    options: &RenderOptions,
) {
    match &value.payload {
        ValuePayload::Null => out.render_raw_value("null", theme_keys::KEYWORD),
        ValuePayload::Bool(b) => {
            out.render_raw_value(if *b { "true" } else { "false" }, theme_keys::KEYWORD)
        }
        ValuePayload::Int(i) => out.render_raw_value(&i.to_string(), theme_keys::NUMBER),
        ValuePayload::Float(f) => out.render_raw_value(&format!("{f:?}"), theme_keys::NUMBER),
        ValuePayload::Char(c) => {
            out.render_raw_value(&format!("'{}'", c.escape_default()), theme_keys::STRING)
        }
        ValuePayload::Str(s) => out.render_string_value(s, None, options.string_max_length),
        ValuePayload::Array(items) => out.render_comment(&array_label(value, items.len())),
        ValuePayload::Object { id, .. } => {
            out.render_comment(&object_label(value, *id, options.show_object_ids))
        }
    }
}

/// `int[3]` for an `int[]` of length three; `int[2][]` for nested arrays.
pub(crate) fn array_label(value: &ValueDescriptor, len: usize) -> String {
    let display = value.display_type_name();
    match display.find("[]") {
        Some(pos) => format!("{}[{}]{}", &display[..pos], len, &display[pos + 2..]),
        None => format!("{display}[{len}]"),
    }
}

/// `{Point@12}`, or `{Point}` when ids are hidden.
pub(crate) fn object_label(value: &ValueDescriptor, id: u64, show_id: bool) -> String {
    if show_id {
        format!("{{{}@{}}}", value.short_type_name(), id)
    } else {
        format!("{{{}}}", value.short_type_name())
    }
}
