//! Geometry utilities - rectangles, rounded rectangles, overlay shapes.
//!
//! All coordinates are root-relative logical units (f32). In the terminal
//! shell one cell is one unit; hosts with a finer coordinate space scale
//! through [`crate::types::Density`].
//!
//! The overlay shape follows the even-odd fill rule: the viewport rectangle
//! is the outer contour and every cut-out adds an inner contour, so a point
//! inside an odd number of contours is filled (dimmed) and a point inside an
//! even number is exposed. Overlapping cut-outs therefore re-fill their
//! intersection instead of double-subtracting.

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle: `{left, top, right, bottom}`.
///
/// Invariant: `left <= right` and `top <= bottom`. Degenerate (zero-size)
/// rectangles are valid and represent "not yet measured".
///
/// # Examples
///
/// ```
/// use lumen_tui::geometry::Rect;
///
/// let r = Rect::new(50.0, 50.0, 150.0, 150.0);
/// assert_eq!(r.width(), 100.0);
/// assert_eq!(r.center(), (100.0, 100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// The zero rectangle ("not yet measured").
    pub const ZERO: Self = Self {
        left: 0.0,
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    /// Create a rectangle from edges.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from a root-relative origin and a size.
    pub const fn from_origin_size(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Center point `(x, y)`.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Check if the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Check if a point is inside this rect (half-open: right/bottom edges
    /// are outside).
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Bounding box of two rectangles (min of lefts/tops, max of
    /// rights/bottoms).
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Bounding box of a sequence of rectangles, `None` when the sequence
    /// is empty.
    pub fn union_all<I: IntoIterator<Item = Rect>>(rects: I) -> Option<Rect> {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| match acc {
                Some(u) => Some(u.union(&r)),
                None => Some(r),
            })
    }

    /// Grow the rectangle outward by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }
}

// =============================================================================
// RoundedRect
// =============================================================================

/// A rectangle with uniformly rounded corners.
///
/// The radius is clamped to half the shorter side so the corner arcs never
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
}

impl RoundedRect {
    /// Create a rounded rectangle, clamping the radius to what fits.
    pub fn new(rect: Rect, radius: f32) -> Self {
        let max_radius = (rect.width().min(rect.height()) / 2.0).max(0.0);
        Self {
            rect,
            radius: radius.clamp(0.0, max_radius),
        }
    }

    /// Check if a point is inside the rounded rectangle.
    ///
    /// Inside the straight edges this is plain rect containment; within a
    /// corner square the point must also be within the corner arc.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        if !self.rect.contains(x, y) {
            return false;
        }
        if self.radius <= 0.0 {
            return true;
        }

        let r = self.radius;
        // Arc centers of the four corners
        let cx = if x < self.rect.left + r {
            self.rect.left + r
        } else if x > self.rect.right - r {
            self.rect.right - r
        } else {
            return true;
        };
        let cy = if y < self.rect.top + r {
            self.rect.top + r
        } else if y > self.rect.bottom - r {
            self.rect.bottom - r
        } else {
            return true;
        };

        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= r * r
    }
}

// =============================================================================
// OverlayShape
// =============================================================================

/// The dimming overlay: a full-viewport rectangle minus N rounded cut-outs,
/// combined with the even-odd fill rule.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayShape {
    pub viewport: Rect,
    pub cutouts: Vec<RoundedRect>,
}

impl OverlayShape {
    /// Create an overlay covering `viewport` with the given cut-outs.
    pub fn new(viewport: Rect, cutouts: Vec<RoundedRect>) -> Self {
        Self { viewport, cutouts }
    }

    /// An overlay with no cut-outs.
    pub fn full(viewport: Rect) -> Self {
        Self {
            viewport,
            cutouts: Vec::new(),
        }
    }

    /// Number of cut-out contours.
    pub fn cutout_count(&self) -> usize {
        self.cutouts.len()
    }

    /// Check whether the overlay paints at this point (even-odd rule).
    ///
    /// Outside the viewport nothing is painted. Inside, the point is
    /// painted when it falls within an even number of cut-outs - zero
    /// (plain dimmed area), two (the intersection of overlapping cut-outs,
    /// which even-odd re-fills), and so on.
    pub fn covers(&self, x: f32, y: f32) -> bool {
        if !self.viewport.contains(x, y) {
            return false;
        }
        let inner = self
            .cutouts
            .iter()
            .filter(|c| c.contains(x, y))
            .count();
        // Viewport contour contributes one crossing
        (1 + inner) % 2 == 1
    }
}

// =============================================================================
// Tests
// =============================================================================
