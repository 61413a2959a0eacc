//! Interactive keyboard mode
//!
//! Runs the sign full-screen in raw mode, one key event at a time. Rejected
//! keys are reported on a status row below the sign.

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use marquee_display::DisplayBackend;
use marquee_protocol::keys::{KEY_BACKSPACE, KEY_ENTER, KEY_ESCAPE};
use marquee_protocol::{Modifiers, RawKey};

use crate::backend::{Layout, TerminalBackend, SIGN_COLUMNS};
use crate::config::{SimConfig, CLEAR_KEY};
use crate::session::Session;

/// What a terminal key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Deliver a key to the focused line
    Key(RawKey),
    FocusNext,
    FocusPrevious,
    /// Clear every line
    ClearAll,
    /// Function key that may carry a preset
    Function(u8),
    Quit,
    Ignore,
}

/// RAII guard for raw mode and the alternate screen
///
/// Logging is silenced while the guard lives; stderr shares the terminal.
struct RawMode {
    original_hook: Option<Box<dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send + 'static>>,
    log_level: log::LevelFilter,
}

impl RawMode {
    fn enter() -> Result<Self> {
        crossterm::terminal::enable_raw_mode().context("enabling raw mode")?;
        crossterm::execute!(
            io::stdout(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::cursor::Hide
        )
        .context("entering alternate screen")?;

        // Restore the terminal before a panic message is printed
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(|info| {
            restore_terminal();
            eprintln!("{}", info);
        }));

        let log_level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);

        Ok(Self {
            original_hook: Some(original_hook),
            log_level,
        })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        restore_terminal();
        if let Some(hook) = self.original_hook.take() {
            std::panic::set_hook(hook);
        }
        log::set_max_level(self.log_level);
    }
}

fn restore_terminal() {
    let _ = crossterm::execute!(
        io::stdout(),
        crossterm::cursor::Show,
        crossterm::terminal::LeaveAlternateScreen
    );
    let _ = crossterm::terminal::disable_raw_mode();
}

/// Run the sign until the user quits
pub fn run(config: &SimConfig, plain: bool) -> Result<()> {
    log::info!("Interactive mode started");
    let result = run_raw(config, plain);
    log::info!("Interactive mode finished");
    result
}

fn run_raw(config: &SimConfig, plain: bool) -> Result<()> {
    let _raw = RawMode::enter()?;

    let backend = if plain {
        TerminalBackend::plain(io::stdout(), config.plain, Layout::Fixed)
    } else {
        TerminalBackend::colored(io::stdout(), &config.colors, Layout::Fixed)
    };
    let mut session = Session::new(backend, config);
    let help = footer(config);
    let (columns, _) = crossterm::terminal::size().context("reading terminal size")?;
    redraw(&mut session, &help, columns)?;

    loop {
        match event::read().context("reading terminal input")? {
            Event::Key(key) => {
                if !apply(&mut session, translate(key))? {
                    break;
                }
            }
            Event::Resize(columns, _) => redraw(&mut session, &help, columns)?,
            _ => {}
        }
    }
    Ok(())
}

/// Apply one action, draw the changes and report the result
///
/// Returns `false` once the user quits.
fn apply<W: Write>(
    session: &mut Session<'_, TerminalBackend<W>>,
    action: Action,
) -> Result<bool> {
    let status = match action {
        Action::Key(raw) => {
            let line = session.controller().focused();
            match session.press(raw) {
                Ok(_) => String::new(),
                Err(e) => format!("Line {}: {}", line, e),
            }
        }
        Action::FocusNext => {
            session.focus_next();
            String::new()
        }
        Action::FocusPrevious => {
            session.focus_previous();
            String::new()
        }
        Action::ClearAll => {
            session.clear_all();
            String::new()
        }
        Action::Function(n) => match session.function_key(n) {
            Ok(true) => String::new(),
            Ok(false) => format!("F{} has no preset", n),
            Err(e) => format!("F{}: {:#}", n, e),
        },
        Action::Quit => return Ok(false),
        Action::Ignore => return Ok(true),
    };

    session.render()?;
    let backend = session.backend_mut();
    backend
        .draw_status(&status)
        .and_then(|()| backend.flush())
        .map_err(|e| anyhow!("drawing status: {}", e))?;
    Ok(true)
}

fn redraw<W: Write>(
    session: &mut Session<'_, TerminalBackend<W>>,
    help: &str,
    columns: u16,
) -> Result<()> {
    session.redraw()?;
    let backend = session.backend_mut();
    backend
        .draw_footer(&footer_line(help, columns))
        .and_then(|()| backend.flush())
        .map_err(|e| anyhow!("drawing footer: {}", e))
}

/// Footer text, led by a warning when the sign is wider than the terminal
fn footer_line(help: &str, columns: u16) -> String {
    if columns < SIGN_COLUMNS {
        format!("Sign needs {} columns, terminal has {}  {}", SIGN_COLUMNS, columns, help)
    } else {
        help.to_string()
    }
}

/// Key help shown below the sign
fn footer(config: &SimConfig) -> String {
    let mut parts = vec![format!("F{} clear", CLEAR_KEY)];
    let mut bound: Vec<_> = config
        .presets
        .iter()
        .filter_map(|preset| preset.key.map(|key| (key, preset.name.as_str())))
        .collect();
    bound.sort_unstable();
    parts.extend(bound.iter().map(|(key, name)| format!("F{} {}", key, name)));
    parts.push("Up/Down focus".to_string());
    parts.push("Ctrl+Q quit".to_string());
    parts.join("  ")
}

/// Map a crossterm key event onto a sign action
///
/// Terminals deliver shifted characters already shifted, so Shift is dropped
/// from character keys and lowercase letters are raised to the uppercase key
/// codes the sign expects.
fn translate(key: KeyEvent) -> Action {
    if key.kind == KeyEventKind::Release {
        return Action::Ignore;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let held = modifiers(key.modifiers);

    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => Action::Quit,
        KeyCode::Up | KeyCode::BackTab => Action::FocusPrevious,
        KeyCode::Down | KeyCode::Tab => Action::FocusNext,
        KeyCode::F(n) if n == CLEAR_KEY => Action::ClearAll,
        KeyCode::F(n) => Action::Function(n),
        KeyCode::Enter => Action::Key(RawKey::with(KEY_ENTER, held)),
        KeyCode::Esc => Action::Key(RawKey::with(KEY_ESCAPE, held)),
        KeyCode::Backspace => Action::Key(RawKey::with(KEY_BACKSPACE, held)),
        KeyCode::Char(c) => {
            let without_shift = modifiers(key.modifiers.difference(KeyModifiers::SHIFT));
            Action::Key(RawKey::with(u32::from(c.to_ascii_uppercase()), without_shift))
        }
        // A modifier pressed alone
        KeyCode::Modifier(_) => Action::Key(RawKey::with(0, held)),
        _ => Action::Ignore,
    }
}

fn modifiers(held: KeyModifiers) -> Modifiers {
    let mut modifiers = Modifiers::NONE;
    if held.contains(KeyModifiers::SHIFT) {
        modifiers = modifiers.union(Modifiers::SHIFT);
    }
    if held.contains(KeyModifiers::CONTROL) {
        modifiers = modifiers.union(Modifiers::CONTROL);
    }
    if held.contains(KeyModifiers::ALT) {
        modifiers = modifiers.union(Modifiers::ALT);
    }
    if held.contains(KeyModifiers::SUPER) {
        modifiers = modifiers.union(Modifiers::COMMAND);
    }
    modifiers
}
