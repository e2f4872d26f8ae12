//! Shared test helpers for rendering tests.
//!
//! ```ignore
//! use crate::rendering::testing::{counting_listener, matcher, render_value};
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::ValueTheme;

use super::renderers::MatcherRenderer;
use super::sink::SegmentBuffer;
use super::text_renderer::ValueTextRenderer;
use super::traits::{RenderersListener, ValueRenderer};
use super::types::ValueDescriptor;

/// Run `f` against a fresh buffer using the default dark theme.
pub fn render_with(f: impl FnOnce(&mut ValueTextRenderer<'_>)) -> SegmentBuffer {
    let theme = ValueTheme::default_dark();
    let mut buf = SegmentBuffer::new();
    {
        let mut out = ValueTextRenderer::new(&mut buf, &theme);
        f(&mut out);
    }
    buf
}

/// Render `value` with `renderer` into a fresh buffer.
pub fn render_value(renderer: &dyn ValueRenderer, value: &ValueDescriptor) -> SegmentBuffer {
    render_with(|out| renderer.render(value, out))
}

/// Exact-type matcher rendering `{value}`.
#[allow(dead_code)]
pub fn matcher(name: &str, type_name: &str) -> Arc<dyn ValueRenderer> {
    match MatcherRenderer::exact(name, type_name, "{value}") {
        Ok(r) => Arc::new(r),
        Err(e) => panic!("test template failed to parse: {e}"),
    }
}

/// Listener that counts notifications.
#[allow(dead_code)]
pub fn counting_listener() -> (Arc<dyn RenderersListener>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let listener: Arc<dyn RenderersListener> = Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (listener, calls)
}
