//! Presentation Shell - renders host content, overlay, and card; routes input.
//!
//! The shell is the root component a host embeds: it paints the host's own
//! content (injected as a render closure), then - while the walkthrough is
//! visible - the dimming overlay with its cut-outs and the instruction card
//! with previous / next / skip controls. Button rectangles are recorded
//! during painting and consulted when routing mouse events back into the
//! state machine.
//!
//! Rendering is purely reactive: the shell computes placement from the
//! current signals on every [`render`](WalkthroughShell::render), and
//! [`on_change`](WalkthroughShell::on_change) gives hosts an effect that
//! fires after any state or registry mutation so they know to repaint.

use std::cell::RefCell;

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use spark_signals::effect;

use crate::geometry::Rect;
use crate::placement::{CardSide, CutoutSpec, Placement, compute_placement};
use crate::render::Surface;
use crate::state::WalkthroughState;
use crate::step::Step;
use crate::theme::{WalkthroughColors, WalkthroughTypography};
use crate::types::{BorderStyle, Density};

/// Host content painter, invoked before any walkthrough chrome.
pub type ContentFn = Box<dyn Fn(&mut Surface)>;

/// Horizontal gap between the card and the viewport edges, in cells.
const CARD_MARGIN_X: u16 = 2;

/// Vertical gap between the card and the viewport edge it anchors to.
const CARD_MARGIN_Y: u16 = 1;

/// Narrowest surface the card is drawn on.
const MIN_CARD_WIDTH: u16 = 12;

// =============================================================================
// Props
// =============================================================================

/// Configuration of the walkthrough root component.
pub struct WalkthroughProps {
    pub state: WalkthroughState,
    pub steps: Vec<Step>,
    pub colors: WalkthroughColors,
    pub typography: WalkthroughTypography,
    /// true: tapping the dimmed area does nothing; false: it dismisses.
    pub absorb_clicks: bool,
    pub skip_label: String,
    pub finish_label: String,
    pub spec: CutoutSpec,
    pub density: Density,
    /// Host content painter.
    pub content: Option<ContentFn>,
}

impl WalkthroughProps {
    /// Props with framework defaults; override with struct update syntax.
    pub fn new(state: WalkthroughState, steps: Vec<Step>) -> Self {
        Self {
            state,
            steps,
            colors: WalkthroughColors::default(),
            typography: WalkthroughTypography::default(),
            absorb_clicks: true,
            skip_label: "Skip".to_string(),
            finish_label: "Finish".to_string(),
            spec: CutoutSpec::default(),
            density: Density::DEFAULT,
            content: None,
        }
    }
}

// =============================================================================
// Hit regions
// =============================================================================

/// Card controls a mouse click can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CardButton {
    Previous,
    Next,
    Skip,
}

/// A clickable rectangle recorded while painting the card.
#[derive(Debug, Clone, Copy)]
struct ButtonHit {
    x: u16,
    y: u16,
    width: u16,
    button: CardButton,
}

impl ButtonHit {
    fn contains(&self, x: u16, y: u16) -> bool {
        y == self.y && x >= self.x && x < self.x + self.width
    }
}

// =============================================================================
// Shell
// =============================================================================

/// The walkthrough root component.
pub struct WalkthroughShell {
    props: WalkthroughProps,
    hits: RefCell<Vec<ButtonHit>>,
    card_rect: RefCell<Option<Rect>>,
    placement: RefCell<Option<Placement>>,
}

impl WalkthroughShell {
    pub fn new(props: WalkthroughProps) -> Self {
        Self {
            props,
            hits: RefCell::new(Vec::new()),
            card_rect: RefCell::new(None),
            placement: RefCell::new(None),
        }
    }

    /// The walkthrough state this shell drives.
    pub fn state(&self) -> &WalkthroughState {
        &self.props.state
    }

    /// The host's step sequence.
    pub fn steps(&self) -> &[Step] {
        &self.props.steps
    }

    /// Paint one frame: host content, then overlay and card when visible.
    pub fn render(&self, surface: &mut Surface) {
        self.hits.borrow_mut().clear();
        *self.card_rect.borrow_mut() = None;
        *self.placement.borrow_mut() = None;

        if let Some(content) = &self.props.content {
            content(surface);
        }

        let state = &self.props.state;
        let steps = &self.props.steps;
        if !state.is_visible() || steps.is_empty() {
            return;
        }
        let index = state.current_step_index();
        let Some(step) = steps.get(index) else {
            return;
        };

        let placement = compute_placement(
            step,
            &state.targets().snapshot(),
            surface.viewport(),
            &self.props.spec,
            self.props.density,
        );

        // Dim everything the overlay covers; cut-outs stay untouched.
        // Cells are sampled at their centers.
        for y in 0..surface.height() {
            for x in 0..surface.width() {
                if placement.overlay.covers(x as f32 + 0.5, y as f32 + 0.5) {
                    surface.blend(x, y, self.props.colors.overlay);
                }
            }
        }

        if let Some(side) = placement.card {
            self.draw_card(surface, step, index, side);
        }

        *self.placement.borrow_mut() = Some(placement);
    }

    fn draw_card(&self, surface: &mut Surface, step: &Step, index: usize, side: CardSide) {
        let colors = &self.props.colors;
        let typography = &self.props.typography;
        let total = self.props.steps.len();

        if surface.width() < MIN_CARD_WIDTH + 2 * CARD_MARGIN_X {
            return;
        }
        let card_w = surface.width() - 2 * CARD_MARGIN_X;
        let inner_w = card_w - 4;

        let body_lines = wrap_text(&step.body, inner_w as usize);
        // border + title + blank + body + blank + footer + border
        let card_h = body_lines.len() as u16 + 6;
        if card_h + 2 * CARD_MARGIN_Y > surface.height() {
            return;
        }

        let x = CARD_MARGIN_X;
        let y = match side {
            CardSide::Top => CARD_MARGIN_Y,
            CardSide::Bottom => surface.height() - card_h - CARD_MARGIN_Y,
        };

        surface.draw_box(x, y, card_w, card_h, BorderStyle::Rounded, colors.indicator, colors.container);

        // Title row: heading left, skip control right
        surface.draw_text(
            x + 2,
            y + 1,
            &step.title,
            colors.title,
            Some(colors.container),
            typography.title.attrs,
        );
        let skip = &self.props.skip_label;
        let skip_w = skip.chars().count() as u16;
        if skip_w + 4 < card_w {
            let sx = x + card_w - 2 - skip_w;
            surface.draw_text(
                sx,
                y + 1,
                skip,
                colors.action_button_container,
                Some(colors.container),
                typography.action_button.attrs,
            );
            self.hits.borrow_mut().push(ButtonHit {
                x: sx,
                y: y + 1,
                width: skip_w,
                button: CardButton::Skip,
            });
        }

        // Body
        for (i, line) in body_lines.iter().enumerate() {
            surface.draw_text(
                x + 2,
                y + 3 + i as u16,
                line,
                colors.body,
                Some(colors.container),
                typography.body.attrs,
            );
        }

        // Footer row: previous, indicator, next
        let fy = y + card_h - 2;

        if index > 0 {
            let label = " ◀ ";
            surface.draw_text(
                x + 2,
                fy,
                label,
                colors.action_button_content,
                Some(colors.action_button_container),
                typography.action_button.attrs,
            );
            self.hits.borrow_mut().push(ButtonHit {
                x: x + 2,
                y: fy,
                width: 3,
                button: CardButton::Previous,
            });
        }

        let indicator = format!("{} / {}", index + 1, total);
        let ind_w = indicator.chars().count() as u16;
        if ind_w < card_w {
            surface.draw_text(
                x + (card_w - ind_w) / 2,
                fy,
                &indicator,
                colors.indicator,
                Some(colors.container),
                typography.indicator.attrs,
            );
        }

        let next_label = if index + 1 == total {
            format!(" {} ", self.props.finish_label)
        } else {
            " ▶ ".to_string()
        };
        let next_w = next_label.chars().count() as u16;
        if next_w + 4 < card_w {
            let nx = x + card_w - 2 - next_w;
            surface.draw_text(
                nx,
                fy,
                &next_label,
                colors.action_button_content,
                Some(colors.action_button_container),
                typography.action_button.attrs,
            );
            self.hits.borrow_mut().push(ButtonHit {
                x: nx,
                y: fy,
                width: next_w,
                button: CardButton::Next,
            });
        }

        *self.card_rect.borrow_mut() = Some(Rect::from_origin_size(
            x as f32,
            y as f32,
            card_w as f32,
            card_h as f32,
        ));
    }

    /// Route a terminal event into the state machine.
    ///
    /// Returns true when the event was consumed by the walkthrough. Events
    /// inside a cut-out always fall through to the host; while hidden the
    /// shell is inert.
    pub fn handle_event(&self, event: &Event) -> bool {
        let state = &self.props.state;
        if !state.is_visible() || self.props.steps.is_empty() {
            return false;
        }
        let step_count = self.props.steps.len();

        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Right | KeyCode::Char('n') => {
                    state.next(step_count);
                    true
                }
                KeyCode::Left | KeyCode::Char('p') => {
                    state.previous();
                    true
                }
                KeyCode::Esc | KeyCode::Char('q') => {
                    state.dismiss();
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = (mouse.column, mouse.row);

                let hit = self
                    .hits
                    .borrow()
                    .iter()
                    .find(|hit| hit.contains(x, y))
                    .map(|hit| hit.button);
                if let Some(button) = hit {
                    match button {
                        CardButton::Previous => state.previous(),
                        CardButton::Next => state.next(step_count),
                        CardButton::Skip => state.skip(),
                    }
                    return true;
                }

                let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);

                // Clicks on the card body go nowhere but stay ours
                if let Some(card) = *self.card_rect.borrow() {
                    if card.contains(px, py) {
                        return true;
                    }
                }

                // Dimmed region: swallow or dismiss; cut-outs fall through
                let covered = self
                    .placement
                    .borrow()
                    .as_ref()
                    .map(|placement| placement.overlay.covers(px, py))
                    .unwrap_or(false);
                if covered {
                    if !self.props.absorb_clicks {
                        state.dismiss();
                    }
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Subscribe to every state or registry mutation.
    ///
    /// Creates an effect that reads the walkthrough signals and invokes
    /// `callback` - once immediately, then after each change. Returns the
    /// stop function; call it to unsubscribe.
    pub fn on_change(&self, callback: impl Fn() + 'static) -> impl FnOnce() {
        let state = self.props.state.clone();
        effect(move || {
            let _ = state.is_visible();
            let _ = state.current_step_index();
            let _ = state.targets().snapshot();
            callback();
        })
    }
}

// =============================================================================
// Text wrapping
// =============================================================================

/// Greedy word wrap; words longer than the width are hard-split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0usize;
        for word in paragraph.split_whitespace() {
            let mut word_len = word.chars().count();
            if word_len > width {
                // Hard-split an over-long word
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let mut rest: Vec<char> = word.chars().collect();
                while word_len > width {
                    lines.push(rest[..width].iter().collect());
                    rest.drain(..width);
                    word_len -= width;
                }
                line = rest.into_iter().collect();
                line_len = word_len;
                continue;
            }
            let needed = if line_len == 0 { word_len } else { word_len + 1 };
            if line_len + needed > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

// =============================================================================
// Tests
// =============================================================================
