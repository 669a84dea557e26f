//! Showcase - a three-step walkthrough over a small demo screen.
//!
//! This example demonstrates everything working together:
//! - Host content with three registered targets
//! - The dimming overlay with rounded cut-outs
//! - Card navigation by mouse and keyboard
//!
//! Press `s` to start the tutorial, `q` to quit.
//!
//! Run with: cargo run --example showcase

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use lumen_tui::{
    Attr, Cell, Rect, Rgba, Step, Surface, WalkthroughProps, WalkthroughShell,
    create_walkthrough_state, present, track_target,
};

/// Host screen layout: (title, feature box, start button) rectangles.
fn layout(width: u16, height: u16) -> (Rect, Rect, Rect) {
    let w = width as f32;
    let h = height as f32;

    let title_w = 26.0;
    let title = Rect::from_origin_size((w - title_w) / 2.0, 2.0, title_w, 1.0);

    let box_w = 30.0;
    let box_h = 7.0;
    let feature = Rect::from_origin_size((w - box_w) / 2.0, 6.0, box_w, box_h);

    let button_w = 22.0;
    let button = Rect::from_origin_size((w - button_w) / 2.0, h - 4.0, button_w, 3.0);

    (title, feature, button)
}

fn main() -> io::Result<()> {
    let state = create_walkthrough_state(false);

    let steps = vec![
        Step::new(
            "title",
            "Welcome to lumen-tui",
            "This library helps you build guided walkthroughs for your terminal apps.",
        ),
        Step::new(
            "feature_box",
            "Highlight Any Region",
            "Any rectangle your layout produces can be spotlighted, alone or together with others.",
        ),
        Step::new(
            "start_button",
            "User Interaction",
            "Guide users to actionable controls. Finish here, or press s to run the tour again.",
        ),
    ];

    // Measurement hooks, one per target
    let measure_title = track_target(&state, "title");
    let measure_feature = track_target(&state, "feature_box");
    let measure_button = track_target(&state, "start_button");

    let mut props = WalkthroughProps::new(state.clone(), steps);
    props.content = Some(Box::new(move |surface| {
        let (title, feature, button) = layout(surface.width(), surface.height());

        // "Layout pass": report current bounds before painting
        measure_title(title);
        measure_feature(feature);
        measure_button(button);

        surface.draw_text(
            title.left as u16,
            title.top as u16,
            "lumen-tui Library Showcase",
            Rgba::rgb(255, 215, 0),
            None,
            Attr::BOLD,
        );

        surface.fill_rect(
            feature.left as u16,
            feature.top as u16,
            feature.width() as u16,
            feature.height() as u16,
            Cell {
                ch: ' ',
                fg: Rgba::WHITE,
                bg: Rgba::rgb(40, 40, 90),
                attrs: Attr::NONE,
            },
        );
        surface.draw_text(
            feature.left as u16 + 9,
            feature.top as u16 + 3,
            "Feature Area",
            Rgba::WHITE,
            Some(Rgba::rgb(40, 40, 90)),
            Attr::NONE,
        );

        surface.fill_rect(
            button.left as u16,
            button.top as u16,
            button.width() as u16,
            button.height() as u16,
            Cell {
                ch: ' ',
                fg: Rgba::WHITE,
                bg: Rgba::from_rgb_int(0x6200ee),
                attrs: Attr::NONE,
            },
        );
        surface.draw_text(
            button.left as u16 + 4,
            button.top as u16 + 1,
            "Start Tutorial",
            Rgba::WHITE,
            Some(Rgba::from_rgb_int(0x6200ee)),
            Attr::BOLD,
        );
    }));

    let shell = WalkthroughShell::new(props);

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide, EnableMouseCapture)?;

    let result = run(&shell, &mut stdout);

    execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    result
}

fn run(shell: &WalkthroughShell, stdout: &mut impl Write) -> io::Result<()> {
    loop {
        let (width, height) = terminal::size()?;
        let mut surface = Surface::new(width, height);
        shell.render(&mut surface);
        present(&surface, stdout)?;

        let ev = event::read()?;
        if shell.handle_event(&ev) {
            continue;
        }

        // Host's own input handling
        match ev {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('s') => shell.state().show(),
                _ => {}
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (_, _, button) = layout(width, height);
                if button.contains(mouse.column as f32 + 0.5, mouse.row as f32 + 0.5) {
                    shell.state().show();
                }
            }
            _ => {}
        }
    }
}
