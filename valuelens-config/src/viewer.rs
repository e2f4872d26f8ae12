//! Viewer settings that shape how the built-in renderers present values.
//!
//! Maps to `config.yaml` in the valuelens config directory.

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::themes::ValueTheme;

/// Top-level viewer configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewerConfig {
    /// Name of the built-in value theme (see [`ValueTheme::available_themes`]).
    #[serde(default = "crate::defaults::theme")]
    pub theme: String,

    /// Ceiling applied to string contents; `None` disables truncation.
    #[serde(default = "crate::defaults::string_max_length")]
    pub string_max_length: Option<usize>,

    /// Maximum number of array elements shown inline.
    #[serde(default = "crate::defaults::array_preview_limit")]
    pub array_preview_limit: usize,

    /// Maximum number of object fields shown inline.
    #[serde(default = "crate::defaults::field_preview_limit")]
    pub field_preview_limit: usize,

    /// Append a hexadecimal comment after integer values.
    #[serde(default = "crate::defaults::bool_false")]
    pub show_hex_for_integers: bool,

    /// Show `@id` after object type names.
    #[serde(default = "crate::defaults::bool_true")]
    pub show_object_ids: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            theme: crate::defaults::theme(),
            string_max_length: crate::defaults::string_max_length(),
            array_preview_limit: crate::defaults::array_preview_limit(),
            field_preview_limit: crate::defaults::field_preview_limit(),
            show_hex_for_integers: false,
            show_object_ids: true,
        }
    }
}

impl ViewerConfig {
    /// Check field values that serde cannot constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array_preview_limit == 0 {
            return Err(ConfigError::Validation(
                "array_preview_limit must be greater than zero".to_string(),
            ));
        }
        if self.field_preview_limit == 0 {
            return Err(ConfigError::Validation(
                "field_preview_limit must be greater than zero".to_string(),
            ));
        }
        if ValueTheme::by_name(&self.theme).is_none() {
            return Err(ConfigError::Validation(format!(
                "unknown theme '{}' (available: {})",
                self.theme,
                ValueTheme::available_themes().join(", ")
            )));
        }
        Ok(())
    }

    /// The configured theme, falling back to the default one when the name
    /// is not recognized.
    pub fn resolve_theme(&self) -> ValueTheme {
        ValueTheme::by_name(&self.theme).unwrap_or_else(|| {
            log::warn!("Unknown theme '{}', using default", self.theme);
            ValueTheme::default()
        })
    }
}
