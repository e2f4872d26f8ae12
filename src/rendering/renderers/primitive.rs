//! Fallback renderer for scalar types.

use std::any::Any;

use crate::config::{Element, theme_keys};
use crate::rendering::codec::CodecError;
use crate::rendering::text_renderer::ValueTextRenderer;
use crate::rendering::traits::{BUILTIN_PROVIDER, ValueRenderer};
use crate::rendering::types::{TypeShape, ValueDescriptor, ValuePayload};

use super::{RenderOptions, render_inline};

/// Renders booleans, numbers and chars.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveRenderer {
    options: RenderOptions,
}

impl PrimitiveRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl ValueRenderer for PrimitiveRenderer {
    fn name(&self) -> &str {
        "Primitive"
    }

    fn provider_id(&self) -> &str {
        BUILTIN_PROVIDER
    }

    fn matches(&self, type_name: &str) -> bool {
        TypeShape::of(type_name) == TypeShape::Primitive
    }

    fn render(&self, value: &ValueDescriptor, out: &mut ValueTextRenderer<'_>) {
        match &value.payload {
            ValuePayload::Char(c) => {
                out.render_raw_value(&format!("'{}'", c.escape_default()), theme_keys::STRING);
                out.render_comment(&format!(" {}", u32::from(*c)));
            }
            ValuePayload::Int(i) => {
                out.render_raw_value(&i.to_string(), theme_keys::NUMBER);
                if self.options.show_hex_for_integers {
                    out.render_comment(&format!(" (0x{i:x})"));
                }
            }
            _ => render_inline(value, out, &self.options),
        }
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
    use crate::rendering::testing::render_value;
    use crate::rendering::types::StyleKind;

    #[test]
    fn test_matches_scalars_only() {
        let r = PrimitiveRenderer::new(RenderOptions::default());
        assert!(r.matches("int"));
        assert!(r.matches("Z"));
        assert!(!r.matches("int[]"));
        assert!(!r.matches("java.lang.Integer"));
    }

    #[test]
    fn test_char_shows_code_point() {
        let r = PrimitiveRenderer::new(RenderOptions::default());
        let buf = render_value(&r, &ValueDescriptor::char('A'));
        assert_eq!(
            buf.kinds(),
            vec![("'A'", StyleKind::Themed), (" 65", StyleKind::Comment)]
        );
    }

    #[test]
    fn test_hex_comment_toggle() {
        let plain = PrimitiveRenderer::new(RenderOptions::default());
        assert_eq!(
            render_value(&plain, &ValueDescriptor::int(255)).plain_text(),
            "255"
        );

        let hex = PrimitiveRenderer::new(RenderOptions {
            show_hex_for_integers: true,
            ..Default::default()
        });
        assert_eq!(
            render_value(&hex, &ValueDescriptor::int(255)).plain_text(),
            "255 (0xff)"
        );
        assert!(!hex.eq_renderer(&plain));
    }

    #[test]
    fn test_boolean_uses_keyword() {
        let r = PrimitiveRenderer::new(RenderOptions::default());
        let buf = render_value(&r, &ValueDescriptor::boolean(false));
        assert_eq!(buf.kinds(), vec![("false", StyleKind::Themed)]);
    }

    #[test]
    fn test_not_persistable() {
        let r = PrimitiveRenderer::new(RenderOptions::default());
        assert!(matches!(
            r.write_record(),
            Err(CodecError::NotPersistable(_))
        ));
    }
}
