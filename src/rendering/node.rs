//! Ordered, persisted wrapper around one user-defined renderer.

use std::sync::Arc;

use super::traits::ValueRenderer;

/// One entry of the user renderer list. Its ordinal is its list position.
#[derive(Debug, Clone)]
pub struct RendererNode {
    renderer: Arc<dyn ValueRenderer>,
    enabled: bool,
}

impl RendererNode {
    /// New enabled node.
    pub fn new(renderer: Arc<dyn ValueRenderer>) -> Self {
        Self {
            renderer,
            enabled: true,
        }
    }

    pub fn from_boxed(renderer: Box<dyn ValueRenderer>) -> Self {
        Self::new(Arc::from(renderer))
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn renderer(&self) -> &Arc<dyn ValueRenderer> {
        &self.renderer
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Swap the renderer in place, keeping the enable flag.
    pub fn set_renderer(&mut self, renderer: Arc<dyn ValueRenderer>) {
        self.renderer = renderer;
    }

    /// Copy that shares nothing with `self`.
    ///
    /// `Clone` only bumps the renderer's reference count; this clones the
    /// renderer itself.
    pub fn deep_clone(&self) -> Self {
        Self {
            renderer: Arc::from(self.renderer.clone_renderer()),
            enabled: self.enabled,
        }
    }

    /// Same renderer instance, or a renderer with equal content.
    pub fn holds(&self, renderer: &dyn ValueRenderer) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.renderer), renderer as *const dyn ValueRenderer)
            || self.renderer.eq_renderer(renderer)
    }
}

impl PartialEq for RendererNode {
    fn eq(&self, other: &Self) -> bool {
        self.enabled == other.enabled && self.renderer.eq_renderer(other.renderer.as_ref())
    }
}
