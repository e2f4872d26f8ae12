//! Debugger value rendering.
//!
//! Picks a [`ValueRenderer`] for each runtime value and turns the value into
//! styled text segments.
//!
//! # Module Structure
//!
//! ## Selection Layer
//! - [`registry`]: `RendererRegistry`, priority-ordered selection over the
//!   user renderers with the three fallbacks behind them.
//! - [`node`]: `RendererNode`, enable flag plus renderer, one per list entry.
//! - [`notifier`]: `ChangeNotifier`, listeners told when the list is
//!   replaced.
//!
//! ## Rendering Layer
//! - [`renderers`]: built-in fallbacks and user-defined matcher renderers.
//! - [`text_renderer`]: `ValueTextRenderer`, the emit protocol renderers use.
//! - [`sink`]: `StyledTextSink` plus in-memory and ANSI sinks.
//!
//! ## Persistence Layer
//! - [`codec`]: `PersistenceCodec`, versioned document encoding.
//! - [`settings`]: reading and writing the renderer file.
//!
//! ## Shared Types
//! - [`traits`]: `ValueRenderer` and `RenderersListener`.
//! - [`types`]: `ValueDescriptor`, `TypeShape`, segment styles.

pub mod codec;
pub mod node;
pub mod notifier;
pub mod registry;
pub mod renderers;
pub mod settings;
pub mod sink;
pub mod text_renderer;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{CURRENT_VERSION, CodecError, DecodedNodes, LoadReport, PersistenceCodec};
pub use node::RendererNode;
pub use notifier::ChangeNotifier;
pub use registry::RendererRegistry;
pub use renderers::{
    ArrayRenderer, ClassRenderer, DefaultRenderers, LabelTemplate, MatcherRenderer, PatternKind,
    PrimitiveRenderer, RenderOptions, TypePattern,
};
pub use settings::{SettingsError, load_registry, save_registry};
pub use sink::{AnsiSink, SegmentBuffer, StyledTextSink};
pub use text_renderer::{TRUNCATION_MARKER, ThemeResolver, ValueTextRenderer};
pub use traits::{BUILTIN_PROVIDER, RenderersListener, USER_PROVIDER, ValueRenderer};
pub use types::{
    Field, SegmentStyle, StyleKind, StyledSegment, TypeShape, ValueDescriptor, ValuePayload,
};

/// Select a renderer for `value` and render it into `sink`.
pub fn render(
    registry: &RendererRegistry,
    value: &ValueDescriptor,
    sink: &mut dyn StyledTextSink,
    theme: &dyn ThemeResolver,
) {
    let renderer = registry.select_renderer(value);
    let mut out = ValueTextRenderer::new(sink, theme);
    renderer.render(value, &mut out);
}
