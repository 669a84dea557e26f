//! Core types for lumen-tui.
//!
//! These types define the foundation everything builds on: colors, text
//! attributes, terminal cells, and the density scale that converts
//! density-independent units into surface units.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Alpha 255 = fully opaque, 0 = fully transparent.
/// Special value: r=-1 means "terminal default" (let terminal pick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Transparent color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    // Standard colors
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GRAY: Self = Self::rgb(68, 68, 68);

    /// Create from 0xRRGGBB integer format.
    ///
    /// # Examples
    ///
    /// ```
    /// use lumen_tui::types::Rgba;
    ///
    /// let violet = Rgba::from_rgb_int(0x6200ee);
    /// assert_eq!(violet, Rgba::rgb(98, 0, 238));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Same color with a different alpha.
    ///
    /// The terminal default color has no channels to scrim, so it is
    /// returned unchanged.
    pub const fn with_alpha(self, a: u8) -> Self {
        if self.is_terminal_default() {
            return self;
        }
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: a as i16,
        }
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Check if color is fully transparent.
    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha blend src over dst (Porter-Duff "over" operation).
    ///
    /// Returns the blended color. The terminal default as src is treated
    /// as opaque; as dst it is treated as opaque black.
    #[inline]
    pub fn blend(src: Self, dst: Self) -> Self {
        // Fast path: fully opaque source
        if src.is_opaque() || src.is_terminal_default() {
            return src;
        }

        // Fast path: fully transparent source
        if src.is_transparent() {
            return dst;
        }

        let (dr, dg, db, da) = if dst.is_terminal_default() {
            (0i16, 0i16, 0i16, 255i16)
        } else {
            (dst.r, dst.g, dst.b, dst.a)
        };

        let sa = src.a as i32;
        let inv_sa = 255 - sa;

        // out_a = src_a + dst_a * (1 - src_a)
        let out_a = sa + (da as i32 * inv_sa) / 255;

        if out_a == 0 {
            return Self::TRANSPARENT;
        }

        // out_rgb = (src_rgb * src_a + dst_rgb * dst_a * (1 - src_a)) / out_a
        let out_r = ((src.r as i32 * sa) + (dr as i32 * da as i32 * inv_sa / 255)) / out_a;
        let out_g = ((src.g as i32 * sa) + (dg as i32 * da as i32 * inv_sa / 255)) / out_a;
        let out_b = ((src.b as i32 * sa) + (db as i32 * da as i32 * inv_sa / 255)) / out_a;

        Self {
            r: out_r.clamp(0, 255) as i16,
            g: out_g.clamp(0, 255) as i16,
            b: out_b.clamp(0, 255) as i16,
            a: out_a.clamp(0, 255) as i16,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 4;
        const STRIKETHROUGH = 1 << 5;
    }
}

// =============================================================================
// Cell - The atomic unit of surface rendering
// =============================================================================

/// A single terminal cell.
///
/// This is what the surface holds and the presenter outputs. Nothing more
/// complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The glyph (space when empty).
    pub ch: char,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Attribute flags (bold, italic, etc.).
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// Border Styles
// =============================================================================

/// Border style constants for card frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ─ │ ╭ ╮ ╰ ╯
    #[default]
    Rounded = 2,
}

impl BorderStyle {
    /// Get the border characters for this style.
    ///
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
        }
    }
}

// =============================================================================
// Density
// =============================================================================

/// Scale factor converting density-independent units to surface units.
///
/// Margins and corner radii are specified in dp; the host's density maps
/// them to the units its surface is measured in. In a terminal shell one
/// cell is one unit and the density is typically well below 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density(pub f32);

impl Density {
    /// Identity scale: 1 dp == 1 surface unit.
    pub const DEFAULT: Self = Self(1.0);

    /// Convert a dp value to surface units.
    #[inline]
    pub fn px(&self, dp: f32) -> f32 {
        dp * self.0
    }
}

impl Default for Density {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_from_rgb_int() {
        assert_eq!(Rgba::from_rgb_int(0xff0000), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_rgb_int(0x6200ee), Rgba::rgb(98, 0, 238));
        assert_eq!(Rgba::from_rgb_int(0x000000), Rgba::BLACK);
    }

    #[test]
    fn test_rgba_with_alpha() {
        let scrim = Rgba::BLACK.with_alpha(178);
        assert_eq!(scrim.a, 178);
        assert!(!scrim.is_opaque());
        assert!(!scrim.is_transparent());

        // Terminal default has no channels to scrim
        assert!(Rgba::TERMINAL_DEFAULT.with_alpha(100).is_terminal_default());
    }

    #[test]
    fn test_blend_opaque_and_transparent() {
        let red = Rgba::rgb(255, 0, 0);
        let blue = Rgba::rgb(0, 0, 255);

        assert_eq!(Rgba::blend(red, blue), red);
        assert_eq!(Rgba::blend(Rgba::TRANSPARENT, blue), blue);
    }

    #[test]
    fn test_blend_half_black_dims() {
        let scrim = Rgba::new(0, 0, 0, 128);
        let white = Rgba::WHITE;

        let out = Rgba::blend(scrim, white);
        assert!(out.is_opaque());
        // Roughly half brightness
        assert!(out.r > 110 && out.r < 140, "out.r = {}", out.r);
        assert_eq!(out.r, out.g);
        assert_eq!(out.g, out.b);
    }

    #[test]
    fn test_blend_over_terminal_default() {
        // Terminal default as dst is treated as opaque black
        let scrim = Rgba::new(0, 0, 0, 178);
        let out = Rgba::blend(scrim, Rgba::TERMINAL_DEFAULT);
        assert!(out.is_opaque());
        assert_eq!(out.r, 0);
    }

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert!(cell.fg.is_terminal_default());
        assert!(cell.bg.is_terminal_default());
        assert_eq!(cell.attrs, Attr::NONE);
    }

    #[test]
    fn test_border_style_chars() {
        let (h, v, tl, tr, _, _) = BorderStyle::Rounded.chars();
        assert_eq!(h, '─');
        assert_eq!(v, '│');
        assert_eq!(tl, '╭');
        assert_eq!(tr, '╮');
    }

    #[test]
    fn test_density_px() {
        assert_eq!(Density::DEFAULT.px(8.0), 8.0);
        assert_eq!(Density(0.5).px(12.0), 6.0);
        assert_eq!(Density(2.0).px(8.0), 16.0);
    }
}
