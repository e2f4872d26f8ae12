//! The rendering protocol renderers use to emit styled text.
//!
//! [`ValueTextRenderer`] wraps a sink and a theme resolver for the duration
//! of one render call and exposes the operations renderers are allowed to
//! use. Theme keys are resolved when a segment is emitted, so a theme change
//! between two renders is picked up without touching any renderer.

use crate::config::{ActiveTheme, TextAttributes, ValueTheme, theme_keys};

use super::sink::StyledTextSink;
use super::types::{SegmentStyle, StyleKind};

/// Appended after content cut by a length ceiling.
pub const TRUNCATION_MARKER: &str = "...";

/// Resolves theme keys to text attributes.
pub trait ThemeResolver {
    fn resolve(&self, key: &str) -> TextAttributes;
}

impl ThemeResolver for ValueTheme {
    fn resolve(&self, key: &str) -> TextAttributes {
        self.attributes_for(key)
    }
}

impl ThemeResolver for ActiveTheme {
    fn resolve(&self, key: &str) -> TextAttributes {
        self.attributes_for(key)
    }
}

/// Styled-text emitter handed to [`super::ValueRenderer::render`].
pub struct ValueTextRenderer<'a> {
    sink: &'a mut dyn StyledTextSink,
    theme: &'a dyn ThemeResolver,
}

impl<'a> ValueTextRenderer<'a> {
    pub fn new(sink: &'a mut dyn StyledTextSink, theme: &'a dyn ThemeResolver) -> Self {
        Self { sink, theme }
    }

    /// Emit `text` as one regular segment.
    pub fn render_value(&mut self, text: &str) {
        self.emit(text, SegmentStyle::REGULAR);
    }

    /// Emit `text` with the given style, or regular when `style` is `None`.
    pub fn render_value_with(&mut self, text: &str, style: Option<SegmentStyle>) {
        self.emit(text, style.unwrap_or(SegmentStyle::REGULAR));
    }

    /// Emit `text` with the attributes the active theme assigns to `key`.
    pub fn render_raw_value(&mut self, text: &str, key: &str) {
        let attributes = self.theme.resolve(key);
        self.emit(text, SegmentStyle::new(StyleKind::Themed, attributes));
    }

    /// Emit a quoted string.
    ///
    /// Content longer than `max_length` characters is cut and followed by
    /// [`TRUNCATION_MARKER`]. Control characters and every character in
    /// `extra_special_chars` become separate special-symbol segments.
    pub fn render_string_value(
        &mut self,
        text: &str,
        extra_special_chars: Option<&str>,
        max_length: Option<usize>,
    ) {
        let string_style =
            SegmentStyle::new(StyleKind::String, self.theme.resolve(theme_keys::STRING));
        self.emit("\"", string_style);
        self.render_escaped(
            text,
            string_style,
            max_length,
            extra_special_chars.unwrap_or_default(),
        );
        self.emit("\"", string_style);
    }

    /// Emit `text` in gray comment style.
    pub fn render_comment(&mut self, text: &str) {
        self.emit(text, SegmentStyle::COMMENT);
    }

    /// Emit a separator, marker or similar symbol.
    pub fn render_special_symbol(&mut self, text: &str) {
        self.emit(text, SegmentStyle::SPECIAL_SYMBOL);
    }

    /// The resolver used by this render call.
    pub fn theme(&self) -> &dyn ThemeResolver {
        self.theme
    }

    fn render_escaped(
        &mut self,
        text: &str,
        style: SegmentStyle,
        max_length: Option<usize>,
        extra_special_chars: &str,
    ) {
        let (content, truncated) = match max_length.and_then(|max| text.char_indices().nth(max)) {
            Some((cut, _)) => (&text[..cut], true),
            None => (text, false),
        };

        let special = SegmentStyle::new(
            StyleKind::SpecialSymbol,
            self.theme.resolve(theme_keys::VALID_STRING_ESCAPE),
        );

        let mut run_start = 0;
        for (idx, ch) in content.char_indices() {
            let escaped = match ch {
                '\n' => Some("\\n"),
                '\r' => Some("\\r"),
                '\t' => Some("\\t"),
                '\u{8}' => Some("\\b"),
                '\u{c}' => Some("\\f"),
                _ if extra_special_chars.contains(ch) => Some(&content[idx..idx + ch.len_utf8()]),
                _ => None,
            };
            if let Some(escaped) = escaped {
                self.emit(&content[run_start..idx], style);
                self.emit(escaped, special);
                run_start = idx + ch.len_utf8();
            }
        }
        self.emit(&content[run_start..], style);

        if truncated {
            self.emit(TRUNCATION_MARKER, SegmentStyle::REGULAR);
        }
    }

    fn emit(&mut self, text: &str, style: SegmentStyle) {
        if text.is_empty() {
            return;
        }
        crate::debug_trace!("RENDER", "segment {:?} kind={:?}", text, style.kind);
        self.sink.append(text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Color;
    use crate::rendering::sink::SegmentBuffer;
    use crate::rendering::testing::render_with;

    #[test]
    fn test_render_value_single_regular_segment() {
        let buf = render_with(|out| out.render_value("hello world"));
        assert_eq!(buf.segments().len(), 1);
        assert_eq!(buf.segments()[0].style, SegmentStyle::REGULAR);
    }

    #[test]
    fn test_render_value_with_falls_back_to_regular() {
        let buf = render_with(|out| {
            out.render_value_with("a", None);
            out.render_value_with("b", Some(SegmentStyle::COMMENT));
        });
        assert_eq!(
            buf.kinds(),
            vec![("a", StyleKind::Regular), ("b", StyleKind::Comment)]
        );
    }

    #[test]
    fn test_raw_value_resolves_theme_key() {
        let theme = ValueTheme::dracula();
        let mut buf = SegmentBuffer::new();
        ValueTextRenderer::new(&mut buf, &theme).render_raw_value("42", theme_keys::NUMBER);
        let seg = &buf.segments()[0];
        assert_eq!(seg.style.kind, StyleKind::Themed);
        assert_eq!(seg.style.attributes.fg, Some(Color::new(189, 147, 249)));
    }

    #[test]
    fn test_string_truncation() {
        let buf = render_with(|out| out.render_string_value("abcdefgh", Some(""), Some(4)));
        assert_eq!(
            buf.kinds(),
            vec![
                ("\"", StyleKind::String),
                ("abcd", StyleKind::String),
                (TRUNCATION_MARKER, StyleKind::Regular),
                ("\"", StyleKind::String),
            ]
        );
    }

    #[test]
    fn test_string_at_limit_not_truncated() {
        let buf = render_with(|out| out.render_string_value("abcd", None, Some(4)));
        assert_eq!(buf.plain_text(), "\"abcd\"");
    }

    #[test]
    fn test_extra_special_chars_isolated() {
        let buf = render_with(|out| out.render_string_value("a\\nb", Some("\\"), Some(10)));
        assert_eq!(
            buf.kinds(),
            vec![
                ("\"", StyleKind::String),
                ("a", StyleKind::String),
                ("\\", StyleKind::SpecialSymbol),
                ("nb", StyleKind::String),
                ("\"", StyleKind::String),
            ]
        );
    }

    #[test]
    fn test_control_chars_escaped() {
        let buf = render_with(|out| out.render_string_value("a\nb\t", None, None));
        assert_eq!(
            buf.kinds(),
            vec![
                ("\"", StyleKind::String),
                ("a", StyleKind::String),
                ("\\n", StyleKind::SpecialSymbol),
                ("b", StyleKind::String),
                ("\\t", StyleKind::SpecialSymbol),
                ("\"", StyleKind::String),
            ]
        );
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let buf = render_with(|out| out.render_string_value("ééééé", None, Some(2)));
        assert_eq!(buf.plain_text(), "\"éé...\"");
    }

    #[test]
    fn test_empty_string_has_only_quotes() {
        let buf = render_with(|out| out.render_string_value("", None, Some(0)));
        assert_eq!(buf.segments().len(), 2);
    }

    #[test]
    fn test_comment_and_special_symbol_styles() {
        let buf = render_with(|out| {
            out.render_comment("{Point@1}");
            out.render_special_symbol(", ");
        });
        assert_eq!(buf.segments()[0].style, SegmentStyle::COMMENT);
        assert_eq!(buf.segments()[1].style, SegmentStyle::SPECIAL_SYMBOL);
    }

    #[test]
    fn test_theme_resolved_at_render_time() {
        let active = ActiveTheme::default();
        let mut first = SegmentBuffer::new();
        ValueTextRenderer::new(&mut first, &active).render_raw_value("1", theme_keys::NUMBER);
        active.set(ValueTheme::solarized_light());
        let mut second = SegmentBuffer::new();
        ValueTextRenderer::new(&mut second, &active).render_raw_value("1", theme_keys::NUMBER);
        assert_ne!(
            first.segments()[0].style.attributes,
            second.segments()[0].style.attributes
        );
    }
}
