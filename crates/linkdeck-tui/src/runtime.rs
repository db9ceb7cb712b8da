//! Crossterm event loop that drives an [`App`] on the real terminal.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, Event as TerminalEvent, KeyCode as TerminalKeyCode, KeyEventKind, KeyModifiers,
};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use linkdeck_surface::color::{ColorMode, TermColor};
use linkdeck_surface::input::{InputEvent, Key, KeyEvent, Modifiers, ResizeEvent};
use linkdeck_surface::render::{CellStyle, RenderFrame, WIDE_CONTINUATION};
use tracing::{debug, warn};

use crate::app::{App, Command, ToastKind};
use crate::bootstrap::persist_theme;
use crate::clipboard::copy_via_osc52;
use crate::opener::open_url;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub fn run(mut app: App, prefs_path: &Path) -> Result<(), String> {
    let mut terminal_session =
        TerminalSession::enter().map_err(|err| format!("enter tui terminal mode: {err}"))?;
    let color_mode = ColorMode::from_colorterm(std::env::var("COLORTERM").ok().as_deref());

    let (width, height) = terminal_size().map_err(|err| format!("read terminal size: {err}"))?;
    let _ = app.update(InputEvent::Resize(ResizeEvent { width, height }));

    let mut dirty = true;
    loop {
        if dirty {
            let frame = app.render();
            render_frame(&mut terminal_session.stdout, &frame, color_mode)
                .map_err(|err| format!("render frame: {err}"))?;
            dirty = false;
        }

        if app.quitting() {
            break;
        }

        let has_event =
            event::poll(TICK_INTERVAL).map_err(|err| format!("poll terminal event: {err}"))?;
        if !has_event {
            let had_toast = app.toast().is_some();
            let _ = app.update(InputEvent::Tick);
            dirty |= had_toast && app.toast().is_none();
            continue;
        }

        let event = event::read().map_err(|err| format!("read terminal event: {err}"))?;
        if is_interrupt(&event) {
            break;
        }

        if let Some(input) = map_terminal_event(event) {
            let command = app.update(input);
            dirty = true;
            dirty |= dispatch_command(command, &mut app, &mut terminal_session.stdout, prefs_path);
        }
    }

    Ok(())
}

/// Execute a side effect; failures surface as toasts. Returns true when
/// the app needs a redraw.
pub fn dispatch_command<W: Write>(
    cmd: Command,
    app: &mut App,
    out: &mut W,
    prefs_path: &Path,
) -> bool {
    match cmd {
        Command::None | Command::Quit => false,
        Command::Copy { text, what } => {
            match copy_via_osc52(out, &text) {
                Ok(()) => app.notify(ToastKind::Success, format!("{what} copied")),
                Err(err) => {
                    warn!(error = %err, "copy failed");
                    app.notify(ToastKind::Error, format!("Copy failed: {err}"));
                }
            }
            true
        }
        Command::OpenUrl(url) => {
            match open_url(&url) {
                Ok(()) => app.notify(ToastKind::Info, "Opened edit page"),
                Err(err) => app.notify(ToastKind::Error, format!("Could not open {url}: {err}")),
            }
            true
        }
        Command::PersistTheme(theme) => {
            if let Err(err) = persist_theme(prefs_path, theme) {
                warn!(path = %prefs_path.display(), error = %err, "theme not saved");
                app.notify(ToastKind::Error, format!("Theme not saved: {err}"));
                return true;
            }
            debug!(theme = theme.as_str(), "theme saved");
            false
        }
    }
}

fn terminal_size() -> io::Result<(usize, usize)> {
    let (width, height) = terminal::size()?;
    Ok((usize::from(width), usize::from(height)))
}

pub fn map_terminal_event(event: TerminalEvent) -> Option<InputEvent> {
    match event {
        TerminalEvent::Resize(width, height) => Some(InputEvent::Resize(ResizeEvent {
            width: usize::from(width),
            height: usize::from(height),
        })),
        TerminalEvent::Key(key_event) => {
            if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                return None;
            }

            let key = match key_event.code {
                TerminalKeyCode::Char(ch) => Key::Char(ch),
                TerminalKeyCode::Enter => Key::Enter,
                TerminalKeyCode::Esc => Key::Escape,
                TerminalKeyCode::Tab => Key::Tab,
                TerminalKeyCode::BackTab => Key::BackTab,
                TerminalKeyCode::Backspace => Key::Backspace,
                TerminalKeyCode::Delete => Key::Delete,
                TerminalKeyCode::Up => Key::Up,
                TerminalKeyCode::Down => Key::Down,
                TerminalKeyCode::Left => Key::Left,
                TerminalKeyCode::Right => Key::Right,
                TerminalKeyCode::Home => Key::Home,
                TerminalKeyCode::End => Key::End,
                TerminalKeyCode::PageUp => Key::PageUp,
                TerminalKeyCode::PageDown => Key::PageDown,
                _ => return None,
            };

            let mut modifiers = Modifiers {
                shift: key_event.modifiers.contains(KeyModifiers::SHIFT),
                ctrl: key_event.modifiers.contains(KeyModifiers::CONTROL),
                alt: key_event.modifiers.contains(KeyModifiers::ALT),
            };
            if matches!(key_event.code, TerminalKeyCode::BackTab) {
                modifiers.shift = true;
            }

            Some(InputEvent::Key(KeyEvent { key, modifiers }))
        }
        _ => None,
    }
}

pub fn is_interrupt(event: &TerminalEvent) -> bool {
    let TerminalEvent::Key(key_event) = event else {
        return false;
    };

    if !matches!(key_event.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return false;
    }

    matches!(key_event.code, TerminalKeyCode::Char('c'))
        && key_event.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn render_frame<W: Write>(out: &mut W, frame: &RenderFrame, mode: ColorMode) -> io::Result<()> {
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
    let size = frame.size();

    for y in 0..size.height {
        queue!(out, MoveTo(0, to_u16(y)))?;
        let mut style = None;
        for x in 0..size.width {
            let Some(cell) = frame.cell(x, y) else {
                continue;
            };
            // The wide glyph to the left already covers this column.
            if cell.glyph == WIDE_CONTINUATION {
                continue;
            }
            if style != Some(cell.style) {
                queue_style(out, cell.style, mode)?;
                style = Some(cell.style);
            }
            queue!(out, Print(cell.glyph))?;
        }
    }

    queue!(
        out,
        SetAttribute(Attribute::Reset),
        MoveTo(0, to_u16(size.height))
    )?;
    out.flush()
}

fn term_color_to_crossterm(color: TermColor, mode: ColorMode) -> Color {
    match color.for_mode(mode) {
        TermColor::Ansi256(idx) => Color::AnsiValue(idx),
        TermColor::Rgb(r, g, b) => Color::Rgb { r, g, b },
    }
}

fn queue_style<W: Write>(out: &mut W, style: CellStyle, mode: ColorMode) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(term_color_to_crossterm(style.fg, mode)),
        SetBackgroundColor(term_color_to_crossterm(style.bg, mode)),
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    } else if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    } else {
        queue!(out, SetAttribute(Attribute::NormalIntensity))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    } else {
        queue!(out, SetAttribute(Attribute::NoUnderline))?;
    }
    Ok(())
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

struct TerminalSession {
    stdout: io::Stdout,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            MoveTo(0, 0)
        )?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            SetAttribute(Attribute::Reset),
            LeaveAlternateScreen,
            Show,
            MoveTo(0, 0)
        );
        let _ = terminal::disable_raw_mode();
    }
}
