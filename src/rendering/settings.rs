//! File-backed storage of the renderer list.

use std::path::Path;

use crate::config::{ConfigError, read_document, write_document};

use super::codec::{CodecError, LoadReport, PersistenceCodec};
use super::registry::RendererRegistry;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Load `path` into `registry`.
///
/// A missing file leaves the registry untouched and returns `None`.
pub fn load_registry(
    path: &Path,
    codec: &PersistenceCodec,
    registry: &RendererRegistry,
) -> Result<Option<LoadReport>, SettingsError> {
    let Some(document) = read_document(path)? else {
        crate::debug_info!("RENDERERS", "no renderer file at {}", path.display());
        return Ok(None);
    };
    let report = codec.load(&document, registry);
    crate::debug_info!(
        "RENDERERS",
        "loaded {} renderer(s) from {} (skipped {})",
        report.loaded,
        path.display(),
        report.skipped
    );
    Ok(Some(report))
}

/// Write the user list of `registry` to `path` atomically.
pub fn save_registry(
    path: &Path,
    codec: &PersistenceCodec,
    registry: &RendererRegistry,
) -> Result<(), SettingsError> {
    let document = codec.save(registry)?;
    write_document(path, &document)?;
    crate::debug_info!(
        "RENDERERS",
        "saved {} renderer(s) to {}",
        document.children.len(),
        path.display()
    );
    Ok(())
}
