//! Settings-file persistence and path resolution.
//!
//! Covers:
//! - XDG-style path helpers (`config_dir`, `config_path`, `renderers_path`)
//! - `ViewerConfig` load / save (YAML with atomic write)
//! - Renderer document read / write (the versioned [`Element`] tree)

use std::fs;
use std::path::{Path, PathBuf};

use crate::ConfigError;
use crate::document::Element;
use crate::viewer::ViewerConfig;

/// File name of the persisted renderer list.
pub const RENDERERS_FILE_NAME: &str = "debugger.renderers.yaml";

/// Get the configuration directory path (using XDG convention)
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("valuelens")
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join("valuelens")
        } else {
            PathBuf::from(".")
        }
    }
}

/// Path of the viewer configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

/// Path of the persisted renderer document.
pub fn renderers_path() -> PathBuf {
    config_dir().join(RENDERERS_FILE_NAME)
}

/// Write `contents` next to `path` and rename it into place so a crash never
/// leaves a half-written file behind.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let temp_path = path.with_extension("yaml.tmp");
    fs::write(&temp_path, contents)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

impl ViewerConfig {
    /// Load the viewer configuration from the default location, creating a
    /// default file when none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            log::info!("Viewer config not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(&path) {
                log::error!("Failed to save default viewer config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    /// Load the viewer configuration from an explicit path.
    ///
    /// A missing file yields the defaults; an invalid one is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("Viewer config {:?} missing, using defaults", path);
            return Ok(Self::default());
        }
        log::info!("Loading viewer config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        let config: ViewerConfig = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path())
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml_ng::to_string(self)?;
        write_atomic(path, &yaml)
    }
}

/// Read a renderer document. Returns `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<Element>, ConfigError> {
    if !path.exists() {
        log::debug!("Renderer document {:?} not found", path);
        return Ok(None);
    }
    let contents = fs::read_to_string(path)?;
    let element = Element::from_yaml(&contents)?;
    log::debug!(
        "Read renderer document {:?} ({} children)",
        path,
        element.children.len()
    );
    Ok(Some(element))
}

/// Write a renderer document atomically.
pub fn write_document(path: &Path, document: &Element) -> Result<(), ConfigError> {
    let yaml = document.to_yaml()?;
    write_atomic(path, &yaml)?;
    log::debug!(
        "Saved renderer document to {:?} ({} children)",
        path,
        document.children.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_share_directory() {
        assert_eq!(renderers_path().parent(), Some(config_dir().as_path()));
        assert!(renderers_path().ends_with(RENDERERS_FILE_NAME));
        assert!(config_path().ends_with("config.yaml"));
    }

    #[test]
    fn test_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(RENDERERS_FILE_NAME);
        write_document(&path, &Element::new("renderers")).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("yaml.tmp").exists());
    }
}
