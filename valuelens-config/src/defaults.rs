//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! [`crate::ViewerConfig`] fields.

pub fn bool_false() -> bool {
    false
}

pub fn bool_true() -> bool {
    true
}

pub fn theme() -> String {
    "Default Dark".to_string()
}

pub fn string_max_length() -> Option<usize> {
    Some(100)
}

pub fn array_preview_limit() -> usize {
    10
}

pub fn field_preview_limit() -> usize {
    5
}
