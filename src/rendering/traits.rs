//! Core traits for value rendering.

use std::any::Any;
use std::fmt;

use crate::config::Element;

use super::codec::CodecError;
use super::text_renderer::ValueTextRenderer;
use super::types::ValueDescriptor;

/// Provider id of the built-in fallback renderers.
pub const BUILTIN_PROVIDER: &str = "builtin";
/// Provider id of renderers created by the user.
pub const USER_PROVIDER: &str = "user";

/// Matches runtime types and renders values of them.
///
/// Renderers are value-like: `clone_renderer` returns an independent deep
/// copy and `eq_renderer` compares content. Implementations must be
/// `Send + Sync` because selection may run on a worker thread.
pub trait ValueRenderer: Send + Sync + fmt::Debug {
    /// Unique, human-readable name.
    fn name(&self) -> &str;

    /// Identifies where this renderer came from (see [`BUILTIN_PROVIDER`]).
    fn provider_id(&self) -> &str;

    /// Whether this renderer accepts values of `type_name`.
    fn matches(&self, type_name: &str) -> bool;

    /// Render `value` through `out`. The text renderer must not be retained.
    fn render(&self, value: &ValueDescriptor, out: &mut ValueTextRenderer<'_>);

    /// Independent deep copy.
    fn clone_renderer(&self) -> Box<dyn ValueRenderer>;

    /// Content equality with another renderer of any type.
    fn eq_renderer(&self, other: &dyn ValueRenderer) -> bool;

    /// Encode this renderer as a `renderer` record element.
    fn write_record(&self) -> Result<Element, CodecError>;

    fn as_any(&self) -> &dyn Any;
}

/// Observer of registry mutations.
pub trait RenderersListener: Send + Sync {
    /// Called after the renderer list changed. Re-query the registry for the
    /// new state.
    fn on_renderers_changed(&self);
}

impl<F> RenderersListener for F
where
    F: Fn() + Send + Sync,
{
    fn on_renderers_changed(&self) {
        self()
    }
}
