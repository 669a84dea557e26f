//! Style configuration for the walkthrough shell.
//!
//! Pure data: colors for the overlay and card, and text styles for each
//! text role. Hosts construct these with struct update syntax over the
//! defaults; the shell never mutates them.
//!
//! # Example
//!
//! ```
//! use lumen_tui::theme::{WalkthroughColors, WalkthroughTypography};
//! use lumen_tui::types::Rgba;
//!
//! let colors = WalkthroughColors {
//!     overlay: Rgba::BLACK.with_alpha(200),
//!     ..WalkthroughColors::default()
//! };
//! let typography = WalkthroughTypography::default();
//! # let _ = (colors, typography);
//! ```

use crate::types::{Attr, Rgba};

// =============================================================================
// TextStyle
// =============================================================================

/// Terminal text style: attribute flags for one text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub attrs: Attr,
}

impl TextStyle {
    pub const fn new(attrs: Attr) -> Self {
        Self { attrs }
    }
}

// =============================================================================
// Colors
// =============================================================================

/// Color roles of the overlay and card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkthroughColors {
    /// Scrim blended over everything outside the cut-outs.
    pub overlay: Rgba,
    /// Card background.
    pub container: Rgba,
    /// Card title text.
    pub title: Rgba,
    /// Card body text.
    pub body: Rgba,
    /// Action button background.
    pub action_button_container: Rgba,
    /// Action button label.
    pub action_button_content: Rgba,
    /// "2 / 5" progress indicator.
    pub indicator: Rgba,
}

impl Default for WalkthroughColors {
    fn default() -> Self {
        Self {
            overlay: Rgba::BLACK.with_alpha(178),
            container: Rgba::WHITE,
            title: Rgba::BLACK,
            body: Rgba::DARK_GRAY,
            action_button_container: Rgba::from_rgb_int(0x6200ee),
            action_button_content: Rgba::WHITE,
            indicator: Rgba::GRAY,
        }
    }
}

// =============================================================================
// Typography
// =============================================================================

/// Text styles of the card's text roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkthroughTypography {
    pub title: TextStyle,
    pub body: TextStyle,
    pub action_button: TextStyle,
    pub indicator: TextStyle,
}

impl Default for WalkthroughTypography {
    fn default() -> Self {
        Self {
            title: TextStyle::new(Attr::BOLD),
            body: TextStyle::default(),
            action_button: TextStyle::new(Attr::BOLD),
            indicator: TextStyle::new(Attr::DIM),
        }
    }
}
