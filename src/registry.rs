//! Target Registry - last-measured bounds of registered host elements.
//!
//! Maps a target identifier to the rectangle its element occupied after its
//! most recent layout pass. The whole map lives in a signal, so deriveds and
//! effects that read it re-run automatically after every write - mutating an
//! entry deterministically triggers placement recomputation before the next
//! paint.
//!
//! Absent lookups are expected transiently (element not yet laid out, or
//! never registered) and are "no geometry available", never a fault.
//!
//! # Example
//!
//! ```
//! use lumen_tui::registry::TargetRegistry;
//! use lumen_tui::geometry::Rect;
//!
//! let targets = TargetRegistry::new();
//! targets.register("save_button", Rect::new(50.0, 50.0, 150.0, 150.0));
//!
//! assert_eq!(
//!     targets.lookup("save_button"),
//!     Some(Rect::new(50.0, 50.0, 150.0, 150.0)),
//! );
//! assert_eq!(targets.lookup("missing"), None);
//! ```

use std::collections::HashMap;

use spark_signals::{Signal, signal};

use crate::geometry::Rect;

/// Shared, clonable registry of target bounds.
///
/// Writes are last-write-wins per identifier. Reads take a consistent
/// snapshot (the signal value is cloned), so a reader never observes a
/// half-applied update.
#[derive(Clone)]
pub struct TargetRegistry {
    bounds: Signal<HashMap<String, Rect>>,
}

impl TargetRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bounds: signal(HashMap::new()),
        }
    }

    /// Idempotent upsert of a target's bounds.
    ///
    /// Re-registering an identifier with its current rectangle is a no-op
    /// and does not notify subscribers; a new rectangle overwrites the
    /// previous value for that identifier only.
    pub fn register(&self, id: impl Into<String>, rect: Rect) {
        let id = id.into();
        let mut map = self.bounds.get();
        if map.get(&id) == Some(&rect) {
            return;
        }
        map.insert(id, rect);
        self.bounds.set(map);
    }

    /// Look up the last-measured bounds for an identifier.
    ///
    /// Reading from inside a derived or effect creates a reactive
    /// dependency on the registry.
    pub fn lookup(&self, id: &str) -> Option<Rect> {
        self.bounds.get().get(id).copied()
    }

    /// A consistent snapshot of every registered entry.
    pub fn snapshot(&self) -> HashMap<String, Rect> {
        self.bounds.get()
    }

    /// Remove an identifier, returning whether it was present.
    ///
    /// The original design never purges entries, so rectangles of unmounted
    /// elements linger until overwritten. Hosts that unmount targets should
    /// call this to keep later steps from highlighting ghost geometry.
    pub fn unregister(&self, id: &str) -> bool {
        let mut map = self.bounds.get();
        let removed = map.remove(id).is_some();
        if removed {
            self.bounds.set(map);
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        let map = self.bounds.get();
        if !map.is_empty() {
            self.bounds.set(HashMap::new());
        }
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.bounds.get().len()
    }

    /// Check if no targets are registered.
    pub fn is_empty(&self) -> bool {
        self.bounds.get().is_empty()
    }
}

impl Default for TargetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    use spark_signals::derived;

    #[test]
    fn test_register_and_lookup() {
        let targets = TargetRegistry::new();
        assert!(targets.is_empty());

        targets.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(targets.len(), 1);
        assert_eq!(targets.lookup("a"), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(targets.lookup("b"), None);
    }

    #[test]
    fn test_register_idempotent_then_overwrites() {
        let targets = TargetRegistry::new();
        let first = Rect::new(0.0, 0.0, 10.0, 10.0);
        let moved = Rect::new(5.0, 5.0, 15.0, 15.0);

        targets.register("a", first);
        targets.register("a", first);
        assert_eq!(targets.lookup("a"), Some(first));
        assert_eq!(targets.len(), 1);

        targets.register("b", Rect::new(90.0, 0.0, 99.0, 9.0));
        targets.register("a", moved);

        // Only "a" changed
        assert_eq!(targets.lookup("a"), Some(moved));
        assert_eq!(targets.lookup("b"), Some(Rect::new(90.0, 0.0, 99.0, 9.0)));
    }

    #[test]
    fn test_unregister() {
        let targets = TargetRegistry::new();
        targets.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(targets.unregister("a"));
        assert!(!targets.unregister("a"));
        assert_eq!(targets.lookup("a"), None);
    }

    #[test]
    fn test_clear() {
        let targets = TargetRegistry::new();
        targets.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        targets.register("b", Rect::new(20.0, 0.0, 30.0, 10.0));

        targets.clear();
        assert!(targets.is_empty());
    }

    #[test]
    fn test_snapshot_is_consistent_copy() {
        let targets = TargetRegistry::new();
        targets.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));

        let snap = targets.snapshot();
        targets.register("b", Rect::new(20.0, 0.0, 30.0, 10.0));

        // The earlier snapshot does not see the later write
        assert_eq!(snap.len(), 1);
        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn test_derived_recomputes_on_new_rect_only() {
        let targets = TargetRegistry::new();
        targets.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));

        let runs = Rc::new(Cell::new(0u32));
        let runs_inner = runs.clone();
        let targets_inner = targets.clone();
        let bounds = derived(move || {
            runs_inner.set(runs_inner.get() + 1);
            targets_inner.lookup("a")
        });

        assert_eq!(bounds.get(), Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let _ = bounds.get();
        assert_eq!(runs.get(), 1);

        // Equal re-register: no recomputation
        targets.register("a", Rect::new(0.0, 0.0, 10.0, 10.0));
        let _ = bounds.get();
        assert_eq!(runs.get(), 1);

        // New rect: recomputation
        targets.register("a", Rect::new(1.0, 1.0, 11.0, 11.0));
        assert_eq!(bounds.get(), Some(Rect::new(1.0, 1.0, 11.0, 11.0)));
        assert_eq!(runs.get(), 2);
    }
}
