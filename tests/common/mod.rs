//! Shared integration test helpers for valuelens.
//!
//! ```ignore
//! mod common;
//! use common::{matcher, CountingListener};
//! ```
//!
//! Rust integration tests use `mod common;` to bring in helpers from
//! `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute suppresses
//! warnings when only a subset of helpers is used per file.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use valuelens::config::ValueTheme;
use valuelens::rendering::{
    MatcherRenderer, RenderersListener, SegmentBuffer, ValueDescriptor, ValueRenderer,
    ValueTextRenderer,
};

/// Exact-type matcher rendering `{value}`.
pub fn matcher(name: &str, type_name: &str) -> Arc<dyn ValueRenderer> {
    Arc::new(MatcherRenderer::exact(name, type_name, "{value}").expect("valid template"))
}

/// Listener counting `on_renderers_changed` calls.
#[derive(Default)]
pub struct CountingListener {
    calls: AtomicUsize,
}

impl CountingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RenderersListener for CountingListener {
    fn on_renderers_changed(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Render `value` with `renderer` using the default dark theme.
pub fn render(renderer: &dyn ValueRenderer, value: &ValueDescriptor) -> SegmentBuffer {
    let theme = ValueTheme::default_dark();
    let mut buf = SegmentBuffer::new();
    renderer.render(value, &mut ValueTextRenderer::new(&mut buf, &theme));
    buf
}
