//! Interactive mode: the breadcrumb on row 0, a help/status line below it.

use crate::app::App;
use crate::terminal::TerminalSession;
use anyhow::Result;
use core_model::{EditorHost, MouseButton, SurfaceDisplay};
use core_render::paint;
use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::{Write, stdout};
use tracing::{debug, trace};

const BREADCRUMB_ROW: u16 = 0;
const STATUS_ROW: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run(app: &mut App) -> Result<()> {
    let mut session = TerminalSession::enter("crumbline")?;
    app.tick();
    draw(app)?;
    loop {
        let event = event::read()?;
        if handle(app, event) == Flow::Quit {
            break;
        }
        app.tick();
        draw(app)?;
    }
    session.leave()
}

/// Apply one terminal event to the app. Renders stay queued until `tick`.
pub fn handle(app: &mut App, event: Event) -> Flow {
    match event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) => match code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
            KeyCode::Char('t') => {
                let visible = app.controller.toggle(&app.host);
                debug!(target: "runtime", visible, "toggle_key");
            }
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as isize - '1' as isize;
                let hit = app.controller.navigate(&mut app.host, app.window, index);
                debug!(target: "runtime", index, hit, "navigate_key");
            }
            other => trace!(target: "runtime", key = ?other, "key_ignored"),
        },
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column,
            row,
            ..
        }) if row == BREADCRUMB_ROW => {
            let button = match button {
                event::MouseButton::Left => MouseButton::Left,
                event::MouseButton::Middle => MouseButton::Middle,
                event::MouseButton::Right => MouseButton::Right,
            };
            let hit = app
                .controller
                .click(&mut app.host, app.window, column as usize, button);
            debug!(target: "runtime", column, ?button, hit, "click");
        }
        Event::Resize(width, _) => app.resize(width as usize),
        _ => {}
    }
    Flow::Continue
}

fn draw(app: &App) -> Result<()> {
    let mut out = stdout();
    let width = app.width();
    queue!(out, MoveTo(0, BREADCRUMB_ROW), Clear(ClearType::CurrentLine))?;
    match app.host.display(app.window) {
        Some(SurfaceDisplay::Breadcrumb(line)) => paint(&mut out, &line, width, &app.theme)?,
        Some(SurfaceDisplay::Plain(text)) => {
            let (clipped, _) = core_text::clip_to_width(&text, width);
            queue!(out, Print(clipped))?;
        }
        None => {}
    }

    let cursor = app
        .host
        .cursor(app.window)
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    let status = format!(
        "cursor {cursor}  state {:?}  [t] toggle  [1-9] jump  [q] quit",
        app.controller.state(app.window)
    );
    let (status, _) = core_text::clip_to_width(&status, width);
    queue!(out, MoveTo(0, STATUS_ROW), Clear(ClearType::CurrentLine), Print(status))?;
    out.flush()?;
    Ok(())
}
