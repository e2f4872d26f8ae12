/// Color themes for rendered debugger values
use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

/// Well-known theme keys looked up by the renderers.
pub mod keys {
    pub const STRING: &str = "STRING";
    pub const NUMBER: &str = "NUMBER";
    pub const KEYWORD: &str = "KEYWORD";
    pub const VALID_STRING_ESCAPE: &str = "VALID_STRING_ESCAPE";
    pub const IDENTIFIER: &str = "IDENTIFIER";
}

/// A color in RGB format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_array(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Gray used for comments regardless of the active theme.
pub const GRAY: Color = Color::new(128, 128, 128);

/// Resolved presentation of a text run.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl TextAttributes {
    /// Plain text in the sink's default colors.
    pub const REGULAR: TextAttributes = TextAttributes {
        fg: None,
        bg: None,
        bold: false,
        italic: false,
    };

    /// Gray text used for comments and type hints.
    pub const GRAY: TextAttributes = TextAttributes {
        fg: Some(GRAY),
        bg: None,
        bold: false,
        italic: false,
    };

    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            bold: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// Value color theme: a mapping from theme keys to text attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueTheme {
    pub name: String,
    pub foreground: Color,
    pub background: Color,
    #[serde(default)]
    pub attributes: BTreeMap<String, TextAttributes>,
}

impl ValueTheme {
    fn build(
        name: &str,
        foreground: Color,
        background: Color,
        entries: &[(&str, TextAttributes)],
    ) -> Self {
        Self {
            name: name.to_string(),
            foreground,
            background,
            attributes: entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    /// Attributes registered for `key`, or the theme foreground when the key
    /// is unknown.
    pub fn attributes_for(&self, key: &str) -> TextAttributes {
        self.attributes
            .get(key)
            .copied()
            .unwrap_or(TextAttributes::fg(self.foreground))
    }

    /// Default dark theme
    pub fn default_dark() -> Self {
        Self::build(
            "Default Dark",
            Color::new(205, 214, 244),
            Color::new(30, 30, 46),
            &[
                (keys::STRING, TextAttributes::fg(Color::new(166, 227, 161))),
                (keys::NUMBER, TextAttributes::fg(Color::new(250, 179, 135))),
                (
                    keys::KEYWORD,
                    TextAttributes::fg(Color::new(203, 166, 247)).bold(),
                ),
                (
                    keys::VALID_STRING_ESCAPE,
                    TextAttributes::fg(Color::new(245, 194, 231)).bold(),
                ),
                (keys::IDENTIFIER, TextAttributes::fg(Color::new(137, 180, 250))),
            ],
        )
    }

    /// Dracula theme
    pub fn dracula() -> Self {
        Self::build(
            "Dracula",
            Color::new(248, 248, 242),
            Color::new(40, 42, 54),
            &[
                (keys::STRING, TextAttributes::fg(Color::new(241, 250, 140))),
                (keys::NUMBER, TextAttributes::fg(Color::new(189, 147, 249))),
                (
                    keys::KEYWORD,
                    TextAttributes::fg(Color::new(255, 121, 198)).bold(),
                ),
                (
                    keys::VALID_STRING_ESCAPE,
                    TextAttributes::fg(Color::new(255, 184, 108)).bold(),
                ),
                (keys::IDENTIFIER, TextAttributes::fg(Color::new(139, 233, 253))),
            ],
        )
    }

    /// Solarized Light theme
    pub fn solarized_light() -> Self {
        Self::build(
            "Solarized Light",
            Color::new(101, 123, 131),
            Color::new(253, 246, 227),
            &[
                (keys::STRING, TextAttributes::fg(Color::new(42, 161, 152))),
                (keys::NUMBER, TextAttributes::fg(Color::new(211, 54, 130))),
                (
                    keys::KEYWORD,
                    TextAttributes::fg(Color::new(133, 153, 0)).bold(),
                ),
                (
                    keys::VALID_STRING_ESCAPE,
                    TextAttributes::fg(Color::new(203, 75, 22)),
                ),
                (keys::IDENTIFIER, TextAttributes::fg(Color::new(38, 139, 210))),
            ],
        )
    }

    /// Look up a built-in theme by name (case and separator insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase().replace(['_', ' '], "-");

        match normalized.as_str() {
            "default-dark" | "default" => Some(Self::default_dark()),
            "dracula" => Some(Self::dracula()),
            "solarized-light" => Some(Self::solarized_light()),
            _ => None,
        }
    }

    pub fn available_themes() -> Vec<&'static str> {
        vec!["Default Dark", "Dracula", "Solarized Light"]
    }
}

impl Default for ValueTheme {
    fn default() -> Self {
        Self::default_dark()
    }
}

/// The currently active theme, swappable while renderers are in use.
///
/// Readers always see a complete theme; `set` publishes a new one atomically.
#[derive(Debug)]
pub struct ActiveTheme {
    current: ArcSwap<ValueTheme>,
}

impl ActiveTheme {
    pub fn new(theme: ValueTheme) -> Self {
        Self {
            current: ArcSwap::from_pointee(theme),
        }
    }

    /// Replace the active theme.
    pub fn set(&self, theme: ValueTheme) {
        log::info!("Active value theme changed to {}", theme.name);
        self.current.store(Arc::new(theme));
    }

    /// Snapshot of the active theme.
    pub fn current(&self) -> Arc<ValueTheme> {
        self.current.load_full()
    }

    /// Resolve a theme key against the theme active right now.
    pub fn attributes_for(&self, key: &str) -> TextAttributes {
        self.current.load().attributes_for(key)
    }
}

impl Default for ActiveTheme {
    fn default() -> Self {
        Self::new(ValueTheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_normalizes() {
        assert_eq!(ValueTheme::by_name("dracula").unwrap().name, "Dracula");
        assert_eq!(
            ValueTheme::by_name("Solarized_Light").unwrap().name,
            "Solarized Light"
        );
        assert_eq!(ValueTheme::by_name("default").unwrap().name, "Default Dark");
        assert!(ValueTheme::by_name("nope").is_none());
    }

    #[test]
    fn test_every_available_theme_resolves() {
        for name in ValueTheme::available_themes() {
            let theme = ValueTheme::by_name(name).expect(name);
            for key in [
                keys::STRING,
                keys::NUMBER,
                keys::KEYWORD,
                keys::VALID_STRING_ESCAPE,
                keys::IDENTIFIER,
            ] {
                assert!(theme.attributes.contains_key(key), "{name} lacks {key}");
            }
        }
    }

    #[test]
    fn test_color_components() {
        assert_eq!(Color::new(1, 2, 3).as_array(), [1, 2, 3]);
        assert_eq!(GRAY.as_array(), [128; 3]);
    }

    #[test]
    fn test_unknown_key_falls_back_to_foreground() {
        let theme = ValueTheme::dracula();
        assert_eq!(
            theme.attributes_for("NO_SUCH_KEY"),
            TextAttributes::fg(theme.foreground)
        );
    }

    #[test]
    fn test_active_theme_swap() {
        let active = ActiveTheme::default();
        let before = active.attributes_for(keys::STRING);
        active.set(ValueTheme::solarized_light());
        let after = active.attributes_for(keys::STRING);
        assert_ne!(before, after);
        assert_eq!(active.current().name, "Solarized Light");
    }
}
