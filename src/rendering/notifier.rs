//! Ordered listener list for registry changes.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::traits::RenderersListener;

/// Holds [`RenderersListener`]s and notifies them synchronously.
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: Mutex<Vec<Arc<dyn RenderersListener>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`. Adding the same instance twice is a no-op.
    pub fn add_listener(&self, listener: Arc<dyn RenderersListener>) {
        let mut listeners = self.listeners.lock();
        if !listeners.iter().any(|l| Arc::ptr_eq(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Unregister `listener`. Unknown listeners are ignored.
    pub fn remove_listener(&self, listener: &Arc<dyn RenderersListener>) {
        self.listeners.lock().retain(|l| !Arc::ptr_eq(l, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Call every listener in registration order on the current thread.
    ///
    /// The lock is released before any listener runs, so listeners may
    /// register or remove listeners themselves.
    pub fn fire(&self) {
        let snapshot: Vec<Arc<dyn RenderersListener>> = self.listeners.lock().clone();
        crate::debug_trace!("RENDERERS", "notifying {} listener(s)", snapshot.len());
        for listener in snapshot {
            listener.on_renderers_changed();
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
