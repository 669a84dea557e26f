//! Walkthrough State Machine - visibility, step sequencing, target tracking.
//!
//! Holds the reactive state that drives the whole component: a visibility
//! flag, the current step index, and the shared [`TargetRegistry`]. All
//! fields are signals, so deriveds and effects that read them re-run
//! automatically after every transition.
//!
//! States are `Hidden` and `ShowingStep(i)` for `i` in `[0, step_count)`.
//! Transitions:
//!
//! - `show`: Hidden -> ShowingStep(0)
//! - `next`: ShowingStep(i) -> ShowingStep(i + 1), or Hidden from the last
//!   step (reaching the end dismisses)
//! - `previous`: ShowingStep(i) -> ShowingStep(i - 1), no-op at index 0
//! - `dismiss` / `skip`: any state -> Hidden, index reset to 0
//!
//! The machine is re-enterable: `show` after a dismiss restarts at step 0.
//! Navigation while hidden is a defensive no-op, never a fault.
//!
//! # Example
//!
//! ```
//! use lumen_tui::state::create_walkthrough_state;
//!
//! let state = create_walkthrough_state(false);
//! state.show();
//! assert!(state.is_visible());
//!
//! state.next(3);
//! assert_eq!(state.current_step_index(), 1);
//!
//! state.skip();
//! assert!(!state.is_visible());
//! assert_eq!(state.current_step_index(), 0);
//! ```

use spark_signals::{Signal, signal};

use crate::geometry::Rect;
use crate::registry::TargetRegistry;

/// Reactive walkthrough state, created once per host screen.
///
/// Clonable handle: clones share the same underlying signals.
#[derive(Clone)]
pub struct WalkthroughState {
    visible: Signal<bool>,
    step_index: Signal<usize>,
    targets: TargetRegistry,
}

impl WalkthroughState {
    /// Create a new state, optionally already showing step 0.
    pub fn new(initially_visible: bool) -> Self {
        Self {
            visible: signal(initially_visible),
            step_index: signal(0),
            targets: TargetRegistry::new(),
        }
    }

    /// Whether the walkthrough is currently shown.
    ///
    /// Reading from inside a derived or effect creates a reactive
    /// dependency.
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Index of the step currently shown (0 while hidden).
    pub fn current_step_index(&self) -> usize {
        self.step_index.get()
    }

    /// The shared target registry.
    pub fn targets(&self) -> &TargetRegistry {
        &self.targets
    }

    /// Start (or restart) the walkthrough at step 0.
    pub fn show(&self) {
        self.step_index.set(0);
        self.visible.set(true);
    }

    /// Advance to the next step; from the last step this dismisses.
    ///
    /// `step_count` is the length of the host's step sequence. No-op while
    /// hidden.
    pub fn next(&self, step_count: usize) {
        if !self.visible.get() {
            return;
        }
        let index = self.step_index.get();
        if index + 1 < step_count {
            self.step_index.set(index + 1);
        } else {
            self.dismiss();
        }
    }

    /// Go back one step; no-op on the first step or while hidden.
    pub fn previous(&self) {
        if !self.visible.get() {
            return;
        }
        let index = self.step_index.get();
        if index > 0 {
            self.step_index.set(index - 1);
        }
    }

    /// Hide the walkthrough and reset to step 0.
    pub fn dismiss(&self) {
        self.visible.set(false);
        self.step_index.set(0);
    }

    /// Abandon the remaining sequence. Identical to [`dismiss`].
    ///
    /// [`dismiss`]: WalkthroughState::dismiss
    pub fn skip(&self) {
        self.dismiss();
    }
}

/// Create a walkthrough state.
///
/// The conventional entry point; see [`WalkthroughState::new`].
pub fn create_walkthrough_state(initially_visible: bool) -> WalkthroughState {
    WalkthroughState::new(initially_visible)
}

/// Build the measurement hook for one target.
///
/// Returns the `on_measured` callback a host installs in its layout pass:
/// every time the element's root-relative bounds are (re)computed, the host
/// calls the hook with the new rectangle. Bounds are only recorded while the
/// walkthrough is visible - they are irrelevant when hidden, and the next
/// layout pass after `show` refreshes them.
///
/// If the host unmounts the element, it should also call
/// [`TargetRegistry::unregister`] so the stale rectangle cannot be
/// highlighted by a later step.
///
/// # Example
///
/// ```
/// use lumen_tui::state::{create_walkthrough_state, track_target};
/// use lumen_tui::geometry::Rect;
///
/// let state = create_walkthrough_state(true);
/// let on_measured = track_target(&state, "save_button");
///
/// // Invoked by the host whenever the element is laid out
/// on_measured(Rect::new(50.0, 50.0, 150.0, 150.0));
///
/// assert!(state.targets().lookup("save_button").is_some());
/// ```
pub fn track_target(state: &WalkthroughState, id: impl Into<String>) -> impl Fn(Rect) + 'static {
    let state = state.clone();
    let id = id.into();
    move |rect| {
        if state.is_visible() {
            state.targets().register(id.clone(), rect);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
