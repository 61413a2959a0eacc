//! Marquee sign simulator
//!
//! Entry point. Parses arguments, loads configuration and runs the sign
//! either interactively or from a key script.

mod backend;
mod cli;
mod config;
mod interactive;
mod script;
mod session;

use std::fs;
use std::io::{self, IsTerminal, Read};

use anyhow::{Context, Result};

use crate::backend::{Layout, TerminalBackend};
use crate::cli::{Cli, ScriptSource};
use crate::config::SimConfig;
use crate::session::Session;

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the sign
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse()?;
    if cli.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::bundled()?,
    };

    // Piped input is a script even without --script
    let source = match cli.script.clone() {
        Some(source) => Some(source),
        None if !io::stdin().is_terminal() => Some(ScriptSource::Stdin),
        None => None,
    };

    match source {
        Some(source) => run_script(&config, &source, cli.plain),
        None => interactive::run(&config, cli.plain),
    }
}

/// Run a key script, printing lines to stdout as they change
fn run_script(config: &SimConfig, source: &ScriptSource, plain: bool) -> Result<()> {
    let input = match source {
        ScriptSource::File(path) => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?,
        ScriptSource::Stdin => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("reading script from stdin")?;
            input
        }
    };

    let steps = script::parse(&input).context("parsing script")?;
    log::info!("Running script with {} steps", steps.len());

    let stdout = io::stdout();
    // Escape codes only make sense on a terminal
    let plain = plain || !stdout.is_terminal();
    let backend = if plain {
        TerminalBackend::plain(stdout.lock(), config.plain, Layout::Stream)
    } else {
        TerminalBackend::colored(stdout.lock(), &config.colors, Layout::Stream)
    };

    let mut session = Session::new(backend, config);
    session.run_script(&steps)?;

    for (index, line) in session.controller().lines().iter().enumerate() {
        log::debug!("Line {} ends {:?}: {:?}", index, line.mode(), line.content());
    }
    Ok(())
}
