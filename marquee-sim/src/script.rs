//! Key script parser
//!
//! A script drives the sign without a keyboard. Each line is one of:
//!
//! ```text
//! # comment
//! 0 HELLO{Enter}        keys for line 0
//! 1 {Shift+7}{Backspace} braced key names
//! !clear                clear every line
//! !preset arrow         show a configured preset
//! ```
//!
//! Key names: `Enter`, `Esc`, `Backspace`, `Space`, `Shift`, `Ctrl`, `Alt`,
//! and modifier combinations such as `Shift+7` or `Ctrl+Alt+X`.

use std::fmt;

use marquee_protocol::keys::{KEY_BACKSPACE, KEY_ENTER, KEY_ESCAPE};
use marquee_protocol::{Modifiers, RawKey, SIGN_LINES};

/// A modifier pressed on its own carries no key code
const NO_KEY: u32 = 0;

/// One parsed script step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Key presses delivered to a line
    Keys { line: u8, keys: Vec<RawKey> },
    /// Clear every line
    Clear,
    /// Show a named preset
    Preset(String),
}

/// A command and the script line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based line number in the script
    pub number: usize,
    pub command: Command,
}

/// Script parse errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Line number missing or not a sign line
    BadLine { number: usize, found: String },
    /// Braced key name not recognised
    UnknownKey { number: usize, name: String },
    /// `{` without a closing `}`
    UnclosedBrace { number: usize },
    /// `!` command not recognised
    UnknownCommand { number: usize, name: String },
    /// `!preset` without a name
    MissingPreset { number: usize },
}

impl ScriptError {
    /// Script line the error occurred on
    pub fn number(&self) -> usize {
        match self {
            ScriptError::BadLine { number, .. }
            | ScriptError::UnknownKey { number, .. }
            | ScriptError::UnclosedBrace { number }
            | ScriptError::UnknownCommand { number, .. }
            | ScriptError::MissingPreset { number } => *number,
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "script line {}: ", self.number())?;
        match self {
            ScriptError::BadLine { found, .. } => write!(
                f,
                "expected a sign line 0-{}, found {:?}",
                SIGN_LINES - 1,
                found
            ),
            ScriptError::UnknownKey { name, .. } => write!(f, "unknown key {{{}}}", name),
            ScriptError::UnclosedBrace { .. } => f.write_str("missing closing brace"),
            ScriptError::UnknownCommand { name, .. } => write!(f, "unknown command !{}", name),
            ScriptError::MissingPreset { .. } => f.write_str("!preset needs a name"),
        }
    }
}

impl std::error::Error for ScriptError {}

/// Parse a whole script
pub fn parse(input: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let number = index + 1;
        if let Some(command) = parse_line(line, number)? {
            steps.push(Step { number, command });
        }
    }

    Ok(steps)
}

/// Parse one script line; blank lines and comments yield nothing
pub fn parse_line(line: &str, number: usize) -> Result<Option<Command>, ScriptError> {
    let trimmed = line.trim_start();
    if trimmed.trim_end().is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    if let Some(command) = trimmed.strip_prefix('!') {
        return parse_command(command.trim_end(), number).map(Some);
    }

    // Keys may end in spaces, so only the line number is trimmed
    let (target, keys) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
    let line = target
        .parse::<u8>()
        .ok()
        .filter(|line| *line < SIGN_LINES)
        .ok_or_else(|| ScriptError::BadLine {
            number,
            found: target.to_string(),
        })?;

    let keys = parse_keys(keys, number)?;
    Ok(Some(Command::Keys { line, keys }))
}

fn parse_command(command: &str, number: usize) -> Result<Command, ScriptError> {
    let (name, argument) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, rest)| (name, rest.trim()));

    match name {
        "clear" => Ok(Command::Clear),
        "preset" if argument.is_empty() => Err(ScriptError::MissingPreset { number }),
        "preset" => Ok(Command::Preset(argument.to_string())),
        _ => Err(ScriptError::UnknownCommand {
            number,
            name: name.to_string(),
        }),
    }
}

/// Parse literal characters and braced key names
fn parse_keys(text: &str, number: usize) -> Result<Vec<RawKey>, ScriptError> {
    let mut keys = Vec::new();
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c == '{' {
            let mut name = String::new();
            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(c) => name.push(c),
                    None => return Err(ScriptError::UnclosedBrace { number }),
                }
            }
            let key = parse_key_name(&name).ok_or(ScriptError::UnknownKey { number, name })?;
            keys.push(key);
        } else {
            keys.push(RawKey::plain(u32::from(c)));
        }
    }

    Ok(keys)
}

/// Parse `Name` or `Mod+...+Name`
fn parse_key_name(name: &str) -> Option<RawKey> {
    let mut parts: Vec<&str> = name.split('+').collect();
    let last = parts.pop()?;

    let mut modifiers = Modifiers::NONE;
    for part in parts {
        modifiers = modifiers.union(parse_modifier(part)?);
    }

    // A bare modifier name is that modifier pressed alone
    if let Some(modifier) = parse_modifier(last) {
        return Some(RawKey::with(NO_KEY, modifiers.union(modifier)));
    }

    let code = match last {
        "Enter" => KEY_ENTER,
        "Esc" => KEY_ESCAPE,
        "Backspace" => KEY_BACKSPACE,
        "Space" => u32::from(b' '),
        _ => {
            let mut chars = last.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => u32::from(c),
                _ => return None,
            }
        }
    };

    Some(RawKey::with(code, modifiers))
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    match name {
        "Shift" => Some(Modifiers::SHIFT),
        "Ctrl" => Some(Modifiers::CONTROL),
        "Alt" => Some(Modifiers::ALT),
        "Cmd" => Some(Modifiers::COMMAND),
        _ => None,
    }
}
