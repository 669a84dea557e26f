//! Placement Derived - reactive placement computation.
//!
//! Creates a Derived that recomputes placement whenever:
//! - Visibility or the current step index changes
//! - Any target registers new bounds
//! - The viewport changes
//!
//! This is the recomputation guarantee the component relies on: every
//! mutation of the walkthrough state or the registry dirties the derived,
//! so the next read before paint sees fresh geometry.

use spark_signals::{Derived, Signal, derived};

use crate::geometry::Rect;
use crate::placement::{CutoutSpec, Placement, compute_placement};
use crate::state::WalkthroughState;
use crate::step::Step;
use crate::types::Density;

/// Create the placement derived.
///
/// Returns a Derived producing the [`Placement`] for the active step, and
/// an inert full overlay ([`Placement::empty`]) while the walkthrough is
/// hidden or the step sequence is empty. The steps are captured by value:
/// the sequence is host-owned, immutable script data.
pub fn create_placement_derived(
    state: &WalkthroughState,
    steps: Vec<Step>,
    viewport: Signal<Rect>,
    spec: CutoutSpec,
    density: Density,
) -> Derived<Placement> {
    let state = state.clone();

    derived(move || {
        // Read viewport and state (creates reactive dependencies)
        let viewport = viewport.get();

        if !state.is_visible() {
            return Placement::empty(viewport);
        }

        let Some(step) = steps.get(state.current_step_index()) else {
            return Placement::empty(viewport);
        };

        // Snapshot read registers the registry as a dependency
        let bounds = state.targets().snapshot();

        compute_placement(step, &bounds, viewport, &spec, density)
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::CardSide;
    use crate::state::create_walkthrough_state;
    use spark_signals::signal;

    fn steps() -> Vec<Step> {
        vec![
            Step::new("a", "First", "step one"),
            Step::new("b", "Second", "step two"),
            Step::spanning(["a", "b"], "Third", "both"),
        ]
    }

    fn viewport_signal() -> Signal<Rect> {
        signal(Rect::new(0.0, 0.0, 400.0, 800.0))
    }

    #[test]
    fn test_hidden_state_yields_empty_placement() {
        let state = create_walkthrough_state(false);
        let placement = create_placement_derived(
            &state,
            steps(),
            viewport_signal(),
            CutoutSpec::default(),
            Density::DEFAULT,
        );

        let p = placement.get();
        assert_eq!(p.overlay.cutout_count(), 0);
        assert_eq!(p.card, None);
    }

    #[test]
    fn test_empty_step_sequence_yields_empty_placement() {
        let state = create_walkthrough_state(true);
        let placement = create_placement_derived(
            &state,
            Vec::new(),
            viewport_signal(),
            CutoutSpec::default(),
            Density::DEFAULT,
        );

        assert_eq!(placement.get().card, None);
    }

    #[test]
    fn test_placement_reacts_to_registration() {
        let state = create_walkthrough_state(true);
        let placement = create_placement_derived(
            &state,
            steps(),
            viewport_signal(),
            CutoutSpec::default(),
            Density::DEFAULT,
        );

        // Target not measured yet: graceful degradation
        assert_eq!(placement.get().overlay.cutout_count(), 0);

        state
            .targets()
            .register("a", Rect::new(50.0, 50.0, 150.0, 150.0));

        let p = placement.get();
        assert_eq!(p.overlay.cutout_count(), 1);
        assert_eq!(p.combined, Some(Rect::new(50.0, 50.0, 150.0, 150.0)));
        assert_eq!(p.card, Some(CardSide::Bottom));
    }

    #[test]
    fn test_placement_reacts_to_step_navigation() {
        let state = create_walkthrough_state(true);
        state
            .targets()
            .register("a", Rect::new(50.0, 50.0, 150.0, 150.0));
        state
            .targets()
            .register("b", Rect::new(200.0, 700.0, 300.0, 760.0));

        let placement = create_placement_derived(
            &state,
            steps(),
            viewport_signal(),
            CutoutSpec::default(),
            Density::DEFAULT,
        );

        assert_eq!(placement.get().card, Some(CardSide::Bottom));

        state.next(3);
        // Step 1 highlights "b" near the bottom: card flips to the top
        assert_eq!(placement.get().card, Some(CardSide::Top));

        state.next(3);
        // Step 2 highlights both
        assert_eq!(placement.get().overlay.cutout_count(), 2);
    }

    #[test]
    fn test_placement_reacts_to_dismiss() {
        let state = create_walkthrough_state(true);
        state
            .targets()
            .register("a", Rect::new(50.0, 50.0, 150.0, 150.0));

        let placement = create_placement_derived(
            &state,
            steps(),
            viewport_signal(),
            CutoutSpec::default(),
            Density::DEFAULT,
        );
        assert_eq!(placement.get().overlay.cutout_count(), 1);

        state.dismiss();
        assert_eq!(placement.get().overlay.cutout_count(), 0);
        assert_eq!(placement.get().card, None);
    }

    #[test]
    fn test_placement_reacts_to_viewport_resize() {
        let state = create_walkthrough_state(true);
        // Mid-screen target on an 800-tall viewport: bottom
        state
            .targets()
            .register("a", Rect::new(0.0, 300.0, 100.0, 390.0));

        let viewport = viewport_signal();
        let placement = create_placement_derived(
            &state,
            steps(),
            viewport.clone(),
            CutoutSpec::default(),
            Density::DEFAULT,
        );
        assert_eq!(placement.get().card, Some(CardSide::Bottom));

        // Shrink the viewport so the target ends up in the lower half
        viewport.set(Rect::new(0.0, 0.0, 400.0, 420.0));
        assert_eq!(placement.get().card, Some(CardSide::Top));
    }
}
