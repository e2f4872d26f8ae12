//! Configuration system for the valuelens debugger value renderer.
//!
//! This crate provides:
//!
//! - The structured document model used to persist user renderers
//! - Settings file paths and atomic load/save helpers
//! - Viewer settings with serde defaults
//! - Value color themes and the swappable active theme

pub mod defaults;
pub mod document;
pub mod error;
pub mod persistence;
pub mod themes;
pub mod viewer;

pub use document::Element;
pub use error::ConfigError;
pub use persistence::{
    RENDERERS_FILE_NAME, config_dir, config_path, read_document, renderers_path, write_document,
};
pub use themes::{ActiveTheme, Color, TextAttributes, ValueTheme, keys as theme_keys};
pub use viewer::ViewerConfig;
