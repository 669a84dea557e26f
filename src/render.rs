//! Surface renderer - a cell grid and a terminal presenter.
//!
//! [`Surface`] is the frame the host and the shell paint into: a
//! width x height grid of [`Cell`]s with small drawing helpers. [`present`]
//! writes a surface to a terminal through crossterm, full-frame, tracking
//! the last emitted style so unchanged colors and attributes are not
//! re-sent for every cell.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::geometry::Rect;
use crate::types::{Attr, BorderStyle, Cell, Rgba};

// =============================================================================
// Surface
// =============================================================================

/// A paintable grid of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Surface {
    /// Create a surface filled with default (empty) cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The surface bounds as a geometry rect (1 cell == 1 unit).
    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    /// Get the cell at (x, y), or None when out of bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y as usize * self.width as usize + x as usize)
    }

    /// Set the cell at (x, y); out-of-bounds writes are dropped.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.cells[index] = cell;
    }

    /// Fill a rectangular region with one cell, clipped to the surface.
    pub fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, cell: Cell) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        for cy in y..y_end {
            for cx in x..x_end {
                self.set(cx, cy, cell);
            }
        }
    }

    /// Draw a run of text starting at (x, y), clipped at the right edge.
    ///
    /// `bg` of `None` keeps each cell's existing background.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgba, bg: Option<Rgba>, attrs: Attr) {
        if y >= self.height {
            return;
        }
        let mut cx = x;
        for ch in text.chars() {
            if cx >= self.width {
                break;
            }
            let bg = bg.unwrap_or_else(|| self.get(cx, y).map(|c| c.bg).unwrap_or_default());
            self.set(
                cx,
                y,
                Cell {
                    ch,
                    fg,
                    bg,
                    attrs,
                },
            );
            cx += 1;
        }
    }

    /// Draw a bordered box with a filled interior.
    pub fn draw_box(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        style: BorderStyle,
        border_fg: Rgba,
        bg: Rgba,
    ) {
        if width < 2 || height < 2 {
            return;
        }
        self.fill_rect(
            x,
            y,
            width,
            height,
            Cell {
                ch: ' ',
                fg: border_fg,
                bg,
                attrs: Attr::NONE,
            },
        );
        if style == BorderStyle::None {
            return;
        }

        let (h, v, tl, tr, br, bl) = style.chars();
        let right = x + width - 1;
        let bottom = y + height - 1;

        let border = |ch: char| Cell {
            ch,
            fg: border_fg,
            bg,
            attrs: Attr::NONE,
        };

        for cx in (x + 1)..right {
            self.set(cx, y, border(h));
            self.set(cx, bottom, border(h));
        }
        for cy in (y + 1)..bottom {
            self.set(x, cy, border(v));
            self.set(right, cy, border(v));
        }
        self.set(x, y, border(tl));
        self.set(right, y, border(tr));
        self.set(right, bottom, border(br));
        self.set(x, bottom, border(bl));
    }

    /// Alpha-blend a color over the cell at (x, y) - both its foreground
    /// and its background - dimming whatever was painted there.
    pub fn blend(&mut self, x: u16, y: u16, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = y as usize * self.width as usize + x as usize;
        let cell = &mut self.cells[index];
        cell.fg = Rgba::blend(color, cell.fg);
        cell.bg = Rgba::blend(color, cell.bg);
    }
}

// =============================================================================
// Terminal presentation
// =============================================================================

fn to_crossterm(color: Rgba) -> Color {
    if color.is_terminal_default() {
        Color::Reset
    } else {
        Color::Rgb {
            r: color.r.clamp(0, 255) as u8,
            g: color.g.clamp(0, 255) as u8,
            b: color.b.clamp(0, 255) as u8,
        }
    }
}

fn queue_attrs(out: &mut impl Write, attrs: Attr) -> io::Result<()> {
    queue!(out, SetAttribute(Attribute::Reset))?;
    if attrs.contains(Attr::BOLD) {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if attrs.contains(Attr::DIM) {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    if attrs.contains(Attr::ITALIC) {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if attrs.contains(Attr::UNDERLINE) {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if attrs.contains(Attr::INVERSE) {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    if attrs.contains(Attr::STRIKETHROUGH) {
        queue!(out, SetAttribute(Attribute::CrossedOut))?;
    }
    Ok(())
}

/// Write a full surface to the terminal.
///
/// The caller owns terminal setup (raw mode, alternate screen); this only
/// moves the cursor to the origin and emits every cell, skipping redundant
/// color and attribute changes between adjacent cells.
pub fn present(surface: &Surface, out: &mut impl Write) -> io::Result<()> {
    let mut last_fg: Option<Rgba> = None;
    let mut last_bg: Option<Rgba> = None;
    let mut last_attrs: Option<Attr> = None;

    for y in 0..surface.height() {
        queue!(out, MoveTo(0, y))?;
        for x in 0..surface.width() {
            let Some(cell) = surface.get(x, y) else {
                continue;
            };

            if last_attrs != Some(cell.attrs) {
                queue_attrs(out, cell.attrs)?;
                // Attribute reset clears colors too
                last_fg = None;
                last_bg = None;
                last_attrs = Some(cell.attrs);
            }
            if last_fg != Some(cell.fg) {
                queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = Some(cell.fg);
            }
            if last_bg != Some(cell.bg) {
                queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = Some(cell.bg);
            }
            queue!(out, Print(cell.ch))?;
        }
    }

    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}

// =============================================================================
// Tests
// =============================================================================
