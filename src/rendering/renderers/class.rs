//! Generic fallback renderer. Accepts every type.

use std::any::Any;

use crate::config::{Element, theme_keys};
use crate::rendering::codec::CodecError;
use crate::rendering::text_renderer::ValueTextRenderer;
use crate::rendering::traits::{BUILTIN_PROVIDER, ValueRenderer};
use crate::rendering::types::{ValueDescriptor, ValuePayload};

use super::{RenderOptions, object_label, render_inline};

/// Renders strings as quoted values and objects as
/// `{Point@12} (x = 1, y = 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassRenderer {
    options: RenderOptions,
}

impl ClassRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ValueRenderer for ClassRenderer {
    fn name(&self) -> &str {
        "Class"
    }

    fn provider_id(&self) -> &str {
        BUILTIN_PROVIDER
    }

    fn matches(&self, _type_name: &str) -> bool {
        true
    }

    fn render(&self, value: &ValueDescriptor, out: &mut ValueTextRenderer<'_>) {
        let ValuePayload::Object { id, fields } = &value.payload else {
            render_inline(value, out, &self.options);
            return;
        };

        out.render_comment(&object_label(value, *id, self.options.show_object_ids));
        if fields.is_empty() {
            return;
        }

        let shown = fields.len().min(self.options.field_preview_limit);
        out.render_special_symbol(" (");
        for (i, field) in fields[..shown].iter().enumerate() {
            if i > 0 {
                out.render_special_symbol(", ");
            }
            out.render_raw_value(&field.name, theme_keys::IDENTIFIER);
            out.render_special_symbol(" = ");
            render_inline(&field.value, out, &self.options);
        }
        if shown < fields.len() {
            out.render_special_symbol(if shown == 0 { "..." } else { ", ..." });
        }
        out.render_special_symbol(")");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueTheme;
    use crate::rendering::testing::render_value;
    use crate::rendering::types::{Field, StyleKind};

    fn point() -> ValueDescriptor {
        ValueDescriptor::object(
            "com.example.Point",
            12,
            vec![
                Field::new("x", ValueDescriptor::int(1)),
                Field::new("label", ValueDescriptor::string("origin")),
            ],
        )
    }

    #[test]
    fn test_accepts_any_type() {
        let r = ClassRenderer::new(RenderOptions::default());
        for t in ["", "int", "int[]", "java.lang.Object", "[I", "???"] {
            assert!(r.matches(t), "{t}");
        }
    }

    #[test]
    fn test_object_with_fields() {
        let r = ClassRenderer::new(RenderOptions::default());
        let buf = render_value(&r, &point());
        assert_eq!(buf.plain_text(), "{Point@12} (x = 1, label = \"origin\")");
        assert_eq!(buf.segments()[0].kind(), StyleKind::Comment);

        let name = &buf.segments()[2];
        assert_eq!(name.text, "x");
        assert_eq!(name.kind(), StyleKind::Themed);
        assert_eq!(
            name.style.attributes,
            ValueTheme::default_dark().attributes_for(theme_keys::IDENTIFIER)
        );
    }

    #[test]
    fn test_field_limit_and_hidden_ids() {
        let r = ClassRenderer::new(RenderOptions {
            field_preview_limit: 1,
            show_object_ids: false,
            ..Default::default()
        });
        assert_eq!(render_value(&r, &point()).plain_text(), "{Point} (x = 1, ...)");
    }

    #[test]
    fn test_zero_field_limit_has_no_dangling_separator() {
        let r = ClassRenderer::new(RenderOptions {
            field_preview_limit: 0,
            ..Default::default()
        });
        assert_eq!(render_value(&r, &point()).plain_text(), "{Point@12} (...)");
    }

    #[test]
    fn test_string_uses_configured_ceiling() {
        let r = ClassRenderer::new(RenderOptions {
            string_max_length: Some(3),
            ..Default::default()
        });
        assert_eq!(
            render_value(&r, &ValueDescriptor::string("abcdef")).plain_text(),
            "\"abc...\""
        );
    }

    #[test]
    fn test_object_without_fields() {
        let r = ClassRenderer::new(RenderOptions::default());
        let v = ValueDescriptor::object("java.lang.Object", 3, vec![]);
        assert_eq!(render_value(&r, &v).plain_text(), "{Object@3}");
    }
}
