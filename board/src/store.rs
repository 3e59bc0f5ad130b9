//! Ordered, id-unique element sequence.
//!
//! DESIGN
//! ======
//! `ElementStore` is the one shared-state container in the system. The relay
//! holds the authoritative instance per room; every client holds a mirror
//! and reconciles it by applying the same add/update/delete/clear operations
//! it receives on the wire. Insertion order is stacking order: the last
//! element added is topmost.
//!
//! All mutations are silent no-ops when their precondition fails (duplicate
//! add, unknown-id update or delete); the `bool` return reports whether
//! state actually changed so the relay can decide what to forward.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::element::{Element, ElementId};

/// Ordered sequence of elements, unique by id.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Full copy of the current state, in stacking order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Element> {
        self.elements.clone()
    }

    /// Replace the entire contents with a snapshot.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Append an element. No-op (returns `false`) if the id already exists.
    pub fn add(&mut self, element: Element) -> bool {
        if self.contains(&element.id) {
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Replace the element with a matching id, keeping its stacking position.
    /// No-op (returns `false`) if no such id exists.
    pub fn update(&mut self, element: Element) -> bool {
        let Some(slot) = self.elements.iter_mut().find(|e| e.id == element.id) else {
            return false;
        };
        *slot = element;
        true
    }

    /// Remove the element with a matching id. No-op (returns `false`) if absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.elements.len() != before
    }

    /// Empty the sequence unconditionally.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Whether an element with this id exists.
    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.iter().any(|e| &e.id == id)
    }

    /// Iterate bottom-most first (stacking order).
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Iterate topmost first, the order pointer hits are resolved in.
    pub fn iter_topmost_first(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().rev()
    }

    /// Number of elements currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
