//! Fallback renderer for array types.

use std::any::Any;

use crate::config::Element;
use crate::rendering::codec::CodecError;
use crate::rendering::text_renderer::ValueTextRenderer;
use crate::rendering::traits::{BUILTIN_PROVIDER, ValueRenderer};
use crate::rendering::types::{TypeShape, ValueDescriptor, ValuePayload};

use super::{RenderOptions, array_label, render_inline};

/// Renders `int[3] {1, 2, 3}`, previewing at most `array_preview_limit`
/// elements.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayRenderer {
    options: RenderOptions,
}

impl ArrayRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ValueRenderer for ArrayRenderer {
    fn name(&self) -> &str {
        "Array"
    }

    fn provider_id(&self) -> &str {
        BUILTIN_PROVIDER
    }

    fn matches(&self, type_name: &str) -> bool {
        TypeShape::of(type_name) == TypeShape::Array
    }

    fn render(&self, value: &ValueDescriptor, out: &mut ValueTextRenderer<'_>) {
        let ValuePayload::Array(items) = &value.payload else {
            render_inline(value, out, &self.options);
            return;
        };

        out.render_comment(&format!("{} ", array_label(value, items.len())));
        out.render_special_symbol("{");
        let shown = items.len().min(self.options.array_preview_limit);
        for (i, item) in items[..shown].iter().enumerate() {
            if i > 0 {
                out.render_special_symbol(", ");
            }
            render_inline(item, out, &self.options);
        }
        if shown < items.len() {
            out.render_special_symbol(if shown == 0 { "..." } else { ", ..." });
        }
        out.render_special_symbol("}");
    }

    fn clone_renderer(&self) -> Box<dyn ValueRenderer> {
        Box::new(self.clone())
    }

    fn eq_renderer(&self, other: &dyn ValueRenderer) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o == self)
    }

    fn write_record(&self) -> Result<Element, CodecError> {
        Err(CodecError::NotPersistable(self.name().to_string()))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
