//! Placement Engine - cut-out overlay geometry and card anchoring.
//!
//! Pure, synchronous computation: given the active step, a registry
//! snapshot, the viewport, and the cut-out spec, produce the overlay shape
//! and the side of the viewport the instruction card goes on. Recomputed on
//! every relevant state or layout change; no caching here (that is the
//! pipeline's job).
//!
//! Resolution is forgiving by design: identifiers with no registered
//! rectangle are dropped, and a step where nothing resolves renders a plain
//! overlay with no cut-out and no card rather than failing.

use std::collections::HashMap;

use crate::geometry::{OverlayShape, Rect, RoundedRect};
use crate::step::Step;
use crate::types::Density;

// =============================================================================
// CutoutSpec
// =============================================================================

/// Breathing room around a highlighted target, in dp.
pub const DEFAULT_MARGIN: f32 = 8.0;

/// Corner radius of a cut-out, in dp.
pub const DEFAULT_CORNER_RADIUS: f32 = 12.0;

/// Margin and corner radius applied to every cut-out.
///
/// Values are density-independent; [`compute_placement`] scales them through
/// the host's [`Density`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutoutSpec {
    pub margin: f32,
    pub corner_radius: f32,
}

impl Default for CutoutSpec {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            corner_radius: DEFAULT_CORNER_RADIUS,
        }
    }
}

// =============================================================================
// CardSide
// =============================================================================

/// Which edge of the viewport the instruction card is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSide {
    Top,
    Bottom,
}

// =============================================================================
// Placement
// =============================================================================

/// Result of one placement computation.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The dimming overlay with one cut-out per resolved target.
    pub overlay: OverlayShape,
    /// Union of the resolved target rectangles; drives the card side only,
    /// never the cut-out shape. `None` when nothing resolved.
    pub combined: Option<Rect>,
    /// Side the card goes on; `None` when nothing resolved (no card).
    pub card: Option<CardSide>,
}

impl Placement {
    /// A placement with a full overlay and no card, used while hidden or
    /// when a step has no resolvable targets.
    pub fn empty(viewport: Rect) -> Self {
        Self {
            overlay: OverlayShape::full(viewport),
            combined: None,
            card: None,
        }
    }
}

// =============================================================================
// compute_placement
// =============================================================================

/// Compute overlay geometry and card anchoring for one step.
///
/// 1. Resolve each of the step's identifiers against `bounds`; unresolved
///    or still-degenerate (zero-size) entries are dropped.
/// 2. Each resolved rectangle becomes an independent rounded cut-out,
///    inflated by the margin.
/// 3. The union of resolved rectangles decides the card side: whichever of
///    the space above the union and the space below it is larger gets the
///    card, ties going to the bottom. The heuristic deliberately ignores
///    the card's own height.
pub fn compute_placement(
    step: &Step,
    bounds: &HashMap<String, Rect>,
    viewport: Rect,
    spec: &CutoutSpec,
    density: Density,
) -> Placement {
    let resolved: Vec<Rect> = step
        .ids
        .iter()
        .filter_map(|id| bounds.get(id))
        .copied()
        .filter(|rect| !rect.is_empty())
        .collect();

    if resolved.is_empty() {
        return Placement::empty(viewport);
    }

    let margin = density.px(spec.margin);
    let radius = density.px(spec.corner_radius);

    let cutouts: Vec<RoundedRect> = resolved
        .iter()
        .map(|rect| RoundedRect::new(rect.inflate(margin), radius))
        .collect();

    let combined = Rect::union_all(resolved.iter().copied());

    let card = combined.map(|union| {
        let space_above = union.top - viewport.top;
        let space_below = viewport.bottom - union.bottom;
        if space_below < space_above {
            CardSide::Top
        } else {
            CardSide::Bottom
        }
    });

    Placement {
        overlay: OverlayShape::new(viewport, cutouts),
        combined,
        card,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 800.0)
    }

    fn bounds_of(entries: &[(&str, Rect)]) -> HashMap<String, Rect> {
        entries
            .iter()
            .map(|(id, rect)| (id.to_string(), *rect))
            .collect()
    }

    #[test]
    fn test_unresolved_step_degrades_to_plain_overlay() {
        let step = Step::new("ghost", "t", "b");
        let placement =
            compute_placement(&step, &HashMap::new(), viewport(), &CutoutSpec::default(), Density::DEFAULT);

        assert_eq!(placement.overlay.cutout_count(), 0);
        assert_eq!(placement.combined, None);
        assert_eq!(placement.card, None);
        // The overlay still dims everything
        assert!(placement.overlay.covers(200.0, 400.0));
    }

    #[test]
    fn test_empty_id_list_treated_like_unresolved() {
        let step = Step::spanning(Vec::<String>::new(), "t", "b");
        let bounds = bounds_of(&[("a", Rect::new(0.0, 0.0, 10.0, 10.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);

        assert_eq!(placement.overlay.cutout_count(), 0);
        assert_eq!(placement.card, None);
    }

    #[test]
    fn test_degenerate_rect_is_not_a_cutout() {
        let step = Step::new("a", "t", "b");
        let bounds = bounds_of(&[("a", Rect::ZERO)]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);

        assert_eq!(placement.overlay.cutout_count(), 0);
        assert_eq!(placement.card, None);
    }

    #[test]
    fn test_single_target_cutout_is_inflated() {
        let step = Step::new("a", "t", "b");
        let bounds = bounds_of(&[("a", Rect::new(50.0, 50.0, 150.0, 150.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);

        assert_eq!(placement.overlay.cutout_count(), 1);
        let cutout = &placement.overlay.cutouts[0];
        assert_eq!(cutout.rect, Rect::new(42.0, 42.0, 158.0, 158.0));
        assert_eq!(cutout.radius, 12.0);

        // The target itself is exposed, the rest dimmed
        assert!(!placement.overlay.covers(100.0, 100.0));
        assert!(placement.overlay.covers(300.0, 700.0));
    }

    #[test]
    fn test_density_scales_margin_and_radius() {
        let step = Step::new("a", "t", "b");
        let bounds = bounds_of(&[("a", Rect::new(50.0, 50.0, 150.0, 150.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density(0.5));

        let cutout = &placement.overlay.cutouts[0];
        assert_eq!(cutout.rect, Rect::new(46.0, 46.0, 154.0, 154.0));
        assert_eq!(cutout.radius, 6.0);
    }

    #[test]
    fn test_two_targets_get_independent_cutouts_and_union_bounds() {
        let a = Rect::new(50.0, 100.0, 150.0, 160.0);
        let b = Rect::new(250.0, 40.0, 350.0, 90.0);
        let step = Step::spanning(["a", "b"], "t", "body");
        let bounds = bounds_of(&[("a", a), ("b", b)]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);

        // Two independent cut-outs, not one covering the union
        assert_eq!(placement.overlay.cutout_count(), 2);
        let between = placement.overlay.covers(200.0, 100.0);
        assert!(between, "the gap between targets stays dimmed");

        assert_eq!(placement.combined, Some(Rect::new(50.0, 40.0, 350.0, 160.0)));
    }

    #[test]
    fn test_partial_resolution_drops_missing_ids() {
        let step = Step::spanning(["a", "ghost"], "t", "b");
        let bounds = bounds_of(&[("a", Rect::new(50.0, 50.0, 150.0, 150.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);

        assert_eq!(placement.overlay.cutout_count(), 1);
        assert_eq!(placement.combined, Some(Rect::new(50.0, 50.0, 150.0, 150.0)));
        assert!(placement.card.is_some());
    }

    #[test]
    fn test_card_side_heuristic() {
        let step = Step::new("a", "t", "b");

        // Target near the top: more space below, card at the bottom
        let bounds = bounds_of(&[("a", Rect::new(0.0, 100.0, 100.0, 200.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);
        assert_eq!(placement.card, Some(CardSide::Bottom));

        // Target near the bottom: more space above, card at the top
        let bounds = bounds_of(&[("a", Rect::new(0.0, 700.0, 100.0, 750.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);
        assert_eq!(placement.card, Some(CardSide::Top));
    }

    #[test]
    fn test_card_side_tie_goes_to_bottom() {
        let step = Step::new("a", "t", "b");
        let bounds = bounds_of(&[("a", Rect::new(0.0, 300.0, 100.0, 500.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);
        assert_eq!(placement.card, Some(CardSide::Bottom));
    }

    #[test]
    fn test_card_side_uses_union_of_all_targets() {
        // "a" sits high, "b" sits low. The union spans 100..750:
        // space_above = 100, space_below = 50, so the card goes on top
        // even though "a" alone would have put it at the bottom.
        let step = Step::spanning(["a", "b"], "t", "body");
        let bounds = bounds_of(&[
            ("a", Rect::new(0.0, 100.0, 100.0, 180.0)),
            ("b", Rect::new(0.0, 700.0, 100.0, 750.0)),
        ]);
        let placement =
            compute_placement(&step, &bounds, viewport(), &CutoutSpec::default(), Density::DEFAULT);
        assert_eq!(placement.combined, Some(Rect::new(0.0, 100.0, 100.0, 750.0)));
        assert_eq!(placement.card, Some(CardSide::Top));
    }

    #[test]
    fn test_viewport_offset_respected() {
        // A viewport that does not start at y = 0
        let viewport = Rect::new(0.0, 100.0, 400.0, 900.0);
        let step = Step::new("a", "t", "b");
        let bounds = bounds_of(&[("a", Rect::new(0.0, 150.0, 100.0, 250.0))]);
        let placement =
            compute_placement(&step, &bounds, viewport, &CutoutSpec::default(), Density::DEFAULT);

        // space_above = 50, space_below = 650 -> bottom
        assert_eq!(placement.card, Some(CardSide::Bottom));
    }
}
