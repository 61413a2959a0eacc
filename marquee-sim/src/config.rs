//! Simulator configuration
//!
//! Loaded from TOML. A default `sign.toml` is compiled into the binary and
//! used when no `--config` path is given.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use crossterm::style::Color;
use serde::Deserialize;

use marquee_core::{encode, Palette, ALPHABET};
use marquee_protocol::SIGN_LINES;

/// Bundled default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../sign.toml");

/// Function key that clears the board in interactive mode
pub const CLEAR_KEY: u8 = 2;

/// Highest function key a preset can bind
pub const MAX_FUNCTION_KEY: u8 = 12;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    palette: RawPalette,
    plain: RawPlain,
    #[serde(default)]
    preset: Vec<RawPreset>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPalette {
    lit: String,
    unlit: String,
    text: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlain {
    lit: String,
    unlit: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPreset {
    name: String,
    line: u8,
    text: String,
    key: Option<u8>,
    #[serde(default)]
    clear: bool,
}

/// Terminal colors for the sign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Lit cells
    pub lit: Color,
    /// Unlit cells and separators
    pub unlit: Color,
    /// Lines being edited
    pub text: Color,
    /// Character painted for every cell
    pub symbol: char,
}

/// A canned message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Name used by `!preset` in scripts
    pub name: String,
    /// Target line
    pub line: u8,
    /// Message, already checked against the alphabet
    pub text: String,
    /// Function key number in interactive mode
    pub key: Option<u8>,
    /// Clear every line before showing
    pub clear: bool,
}

/// Validated simulator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    pub colors: ColorScheme,
    /// Characters used without color
    pub plain: Palette<char>,
    pub presets: Vec<Preset>,
}

impl SimConfig {
    /// Configuration compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG).context("bundled sign.toml")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("loading {}", path.display()))
    }

    /// Parse and validate configuration text
    pub fn parse(input: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(input).context("invalid TOML")?;

        let colors = ColorScheme {
            lit: parse_color("palette.lit", &raw.palette.lit)?,
            unlit: parse_color("palette.unlit", &raw.palette.unlit)?,
            text: parse_color("palette.text", &raw.palette.text)?,
            symbol: parse_symbol("palette.symbol", &raw.palette.symbol)?,
        };

        let plain = Palette::new(
            parse_symbol("plain.lit", &raw.plain.lit)?,
            parse_symbol("plain.unlit", &raw.plain.unlit)?,
        );

        let presets = validate_presets(raw.preset)?;
        log::debug!("Loaded configuration with {} presets", presets.len());

        Ok(Self {
            colors,
            plain,
            presets,
        })
    }

    /// Look up a preset by name
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.name == name)
    }

    /// Look up the preset bound to a function key
    pub fn preset_for_key(&self, key: u8) -> Option<&Preset> {
        self.presets.iter().find(|preset| preset.key == Some(key))
    }
}

/// Parse `#rrggbb` or a terminal color name
fn parse_color(field: &str, value: &str) -> Result<Color> {
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            return Ok(Color::Rgb {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            });
        }
        bail!("{}: expected #rrggbb, got {:?}", field, value);
    }

    Color::try_from(value).map_err(|_| anyhow!("{}: unknown color {:?}", field, value))
}

/// Parse a single-character string
fn parse_symbol(field: &str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => bail!("{}: expected a single character, got {:?}", field, value),
    }
}

fn validate_presets(raw: Vec<RawPreset>) -> Result<Vec<Preset>> {
    let mut names = HashSet::new();
    let mut keys = HashSet::new();
    let mut presets = Vec::with_capacity(raw.len());

    for preset in raw {
        let name = preset.name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            bail!("preset.name: {:?} must be one word", preset.name);
        }
        if !names.insert(name.to_string()) {
            bail!("preset.name: duplicate preset {:?}", name);
        }

        if preset.line >= SIGN_LINES {
            bail!(
                "preset.{}.line: {} is outside 0-{}",
                name,
                preset.line,
                SIGN_LINES - 1
            );
        }

        encode(preset.text.chars(), &ALPHABET)
            .map_err(|e| anyhow!("preset.{}.text: {}", name, e))?;

        if let Some(key) = preset.key {
            if key == 0 || key > MAX_FUNCTION_KEY {
                bail!("preset.{}.key: F{} does not exist", name, key);
            }
            if key == CLEAR_KEY {
                bail!("preset.{}.key: F{} clears the board", name, key);
            }
            if !keys.insert(key) {
                bail!("preset.{}.key: F{} is already bound", name, key);
            }
        }

        presets.push(Preset {
            name: name.to_string(),
            line: preset.line,
            text: preset.text,
            key: preset.key,
            clear: preset.clear,
        });
    }

    Ok(presets)
}
