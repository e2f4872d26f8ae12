//! Renderer registry and selection.
//!
//! `RendererRegistry` holds the ordered list of user renderers plus the three
//! shared fallback renderers and picks one of them for each value.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::Element;

use super::codec::{CodecError, LoadReport, PersistenceCodec};
use super::node::RendererNode;
use super::notifier::ChangeNotifier;
use super::renderers::{DefaultRenderers, RenderOptions};
use super::traits::{RenderersListener, ValueRenderer};
use super::types::ValueDescriptor;

/// Ordered user renderers with fixed fallbacks.
///
/// The user list is published as an immutable snapshot, so selection on
/// other threads never sees a half-applied mutation. Mutations themselves
/// must be serialized by the caller.
pub struct RendererRegistry {
    /// User renderer nodes, highest priority first.
    nodes: ArcSwap<Vec<RendererNode>>,
    /// Array, class and primitive fallbacks. Shared by clones.
    defaults: Arc<DefaultRenderers>,
    notifier: ChangeNotifier,
}

impl RendererRegistry {
    /// Empty registry falling back to `defaults`.
    pub fn new(defaults: Arc<DefaultRenderers>) -> Self {
        Self {
            nodes: ArcSwap::from_pointee(Vec::new()),
            defaults,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Pick the renderer for `value`. Never fails.
    pub fn select_renderer(&self, value: &ValueDescriptor) -> Arc<dyn ValueRenderer> {
        self.select_for_type(&value.type_name)
    }

    /// Pick the renderer for values of `type_name`.
    ///
    /// 1. The first enabled user node whose renderer matches, in list order.
    /// 2. The array renderer for array types.
    /// 3. The primitive renderer for scalar types.
    /// 4. The class renderer, which matches everything.
    pub fn select_for_type(&self, type_name: &str) -> Arc<dyn ValueRenderer> {
        let nodes = self.nodes.load();
        if let Some(node) = nodes
            .iter()
            .find(|n| n.is_enabled() && n.renderer().matches(type_name))
        {
            crate::debug_trace!(
                "RENDERERS",
                "select: {} -> user renderer '{}'",
                type_name,
                node.renderer().name()
            );
            return Arc::clone(node.renderer());
        }

        let fallback = [
            self.defaults.array(),
            self.defaults.primitive(),
            self.defaults.class(),
        ]
        .into_iter()
        .find(|r| r.matches(type_name))
        .unwrap_or_else(|| self.defaults.class());
        crate::debug_trace!(
            "RENDERERS",
            "select: {} -> fallback '{}'",
            type_name,
            fallback.name()
        );
        fallback
    }

    /// Append `renderer` as a new enabled node. Listeners are not notified.
    pub fn add_renderer(&self, renderer: Arc<dyn ValueRenderer>) {
        crate::debug_log!("RENDERERS", "add renderer '{}'", renderer.name());
        let node = RendererNode::new(renderer);
        self.nodes.rcu(|nodes| {
            let mut next = Vec::clone(nodes);
            next.push(node.clone());
            next
        });
    }

    /// Remove the first node holding `renderer` (same instance or equal
    /// content). Returns whether a node was removed. Listeners are not
    /// notified.
    pub fn remove_renderer(&self, renderer: &dyn ValueRenderer) -> bool {
        let current = self.nodes.load_full();
        let Some(index) = current.iter().position(|n| n.holds(renderer)) else {
            return false;
        };
        let mut next = Vec::clone(&current);
        next.remove(index);
        self.nodes.store(Arc::new(next));
        crate::debug_log!(
            "RENDERERS",
            "removed renderer '{}' at {}",
            renderer.name(),
            index
        );
        true
    }

    /// User renderers in order, then array, class and primitive.
    pub fn all_renderers(&self) -> Vec<Arc<dyn ValueRenderer>> {
        let nodes = self.nodes.load();
        let mut all: Vec<Arc<dyn ValueRenderer>> =
            nodes.iter().map(|n| Arc::clone(n.renderer())).collect();
        all.push(self.defaults.array());
        all.push(self.defaults.class());
        all.push(self.defaults.primitive());
        all
    }

    /// Snapshot of the user node list.
    pub fn auto_nodes(&self) -> Arc<Vec<RendererNode>> {
        self.nodes.load_full()
    }

    /// Replace the whole user list and notify listeners once.
    pub fn set_auto_nodes(&self, nodes: Vec<RendererNode>) {
        crate::debug_log!("RENDERERS", "replacing renderer list ({} nodes)", nodes.len());
        self.nodes.store(Arc::new(nodes));
        self.notifier.fire();
    }

    /// User renderers tagged with `provider`, in list order.
    pub fn renderers_by_provider(&self, provider: &str) -> Vec<Arc<dyn ValueRenderer>> {
        self.nodes
            .load()
            .iter()
            .filter(|n| n.renderer().provider_id() == provider)
            .map(|n| Arc::clone(n.renderer()))
            .collect()
    }

    /// Visit each user node in order over one snapshot.
    pub fn iterate_nodes(&self, mut visitor: impl FnMut(usize, &RendererNode)) {
        for (ordinal, node) in self.nodes.load().iter().enumerate() {
            visitor(ordinal, node);
        }
    }

    /// True only for this registry's three fallback instances.
    pub fn is_default(&self, renderer: &dyn ValueRenderer) -> bool {
        self.defaults.is_default(renderer)
    }

    pub fn array_renderer(&self) -> Arc<dyn ValueRenderer> {
        self.defaults.array()
    }

    pub fn class_renderer(&self) -> Arc<dyn ValueRenderer> {
        self.defaults.class()
    }

    pub fn primitive_renderer(&self) -> Arc<dyn ValueRenderer> {
        self.defaults.primitive()
    }

    pub fn defaults(&self) -> &Arc<DefaultRenderers> {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.nodes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.load().is_empty()
    }

    pub fn add_listener(&self, listener: Arc<dyn RenderersListener>) {
        self.notifier.add_listener(listener);
    }

    pub fn remove_listener(&self, listener: &Arc<dyn RenderersListener>) {
        self.notifier.remove_listener(listener);
    }

    /// Notify listeners without changing the list, e.g. after editing a
    /// renderer in place.
    pub fn fire_renderers_changed(&self) {
        self.notifier.fire();
    }

    /// Encode the user list with the default codec.
    pub fn save(&self) -> Result<Element, CodecError> {
        PersistenceCodec::default().save(self)
    }

    /// Replace the user list from `document` with the default codec.
    pub fn load(&self, document: &Element) -> LoadReport {
        PersistenceCodec::default().load(document, self)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new(DefaultRenderers::new(RenderOptions::default()))
    }
}

/// Deep copy of the user list. The copy starts without listeners; the
/// fallbacks stay shared, including any that sit in the user list.
impl Clone for RendererRegistry {
    fn clone(&self) -> Self {
        let nodes: Vec<RendererNode> = self
            .nodes
            .load()
            .iter()
            .map(|node| {
                if self.defaults.is_default(node.renderer().as_ref()) {
                    node.clone()
                } else {
                    node.deep_clone()
                }
            })
            .collect();
        Self {
            nodes: ArcSwap::from_pointee(nodes),
            defaults: Arc::clone(&self.defaults),
            notifier: ChangeNotifier::new(),
        }
    }
}

impl PartialEq for RendererRegistry {
    fn eq(&self, other: &Self) -> bool {
        *self.nodes.load_full() == *other.nodes.load_full()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("nodes", &*self.nodes.load_full())
            .field("notifier", &self.notifier)
            .finish()
    }
}
