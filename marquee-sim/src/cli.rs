//! Command-line argument parsing for marquee-sim.

use std::path::PathBuf;

use anyhow::{bail, Result};

/// Where script mode reads keys from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptSource {
    Stdin,
    File(PathBuf),
}

/// Command-line interface configuration.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cli {
    /// Configuration file replacing the bundled sign.toml
    pub config: Option<PathBuf>,

    /// Run a key script instead of the interactive sign
    pub script: Option<ScriptSource>,

    /// Paint with characters only, no color
    pub plain: bool,

    /// Print usage and exit
    pub help: bool,
}

pub const USAGE: &str = "\
marquee-sim - Dot-matrix message sign simulator

Usage: marquee-sim [OPTIONS]

Options:
  -c, --config PATH    Load configuration from PATH
  -s, --script [PATH]  Run a key script from PATH (stdin if omitted)
  -p, --plain          Paint without color
  -h, --help           Show this help message

Interactive keys:
  A-Z 0-9 - / space    Type on the focused line
  Shift+7              Type &
  Enter                Show the focused line
  Esc                  Clear the focused line
  Backspace            Delete the last character
  Up/Down/Tab          Move focus
  F2                   Clear every line
  F3..F12              Show the preset bound to that key
  Ctrl+Q, Ctrl+C       Quit

Set RUST_LOG=info to log sign activity to stderr.";

impl Cli {
    /// Parse the process arguments.
    pub fn parse() -> Result<Self> {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse an argument list (without the program name).
    pub fn parse_from<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut cli = Self::default();
        let mut args = args.into_iter().peekable();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-p" | "--plain" => cli.plain = true,
                "-h" | "--help" => cli.help = true,
                "-c" | "--config" => {
                    if let Some(path) = args.next() {
                        cli.config = Some(PathBuf::from(path));
                    } else {
                        bail!("--config requires a value");
                    }
                }
                "-s" | "--script" => {
                    // The path is optional; a following flag is not a path
                    let path = args.next_if(|next| !next.starts_with('-'));
                    cli.script = Some(match path {
                        Some(path) => ScriptSource::File(PathBuf::from(path)),
                        None => ScriptSource::Stdin,
                    });
                }
                arg if arg.starts_with('-') => {
                    bail!("Unknown flag: {}. Use --help for usage.", arg);
                }
                arg => bail!("Unexpected argument: {}. Use --help for usage.", arg),
            }
        }

        Ok(cli)
    }
}
