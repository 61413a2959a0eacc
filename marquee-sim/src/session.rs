//! Sign session
//!
//! Owns the edit controller, the screen mirror and a display backend, and
//! applies keys, presets and script steps to them.

use anyhow::{anyhow, bail, Context, Result};

use marquee_core::{EditController, Outcome, SignError};
use marquee_display::{DisplayBackend, Screen};
use marquee_protocol::{EditEvent, RawKey};

use crate::config::SimConfig;
use crate::script::{Command, Step};

/// A running sign
pub struct Session<'c, B: DisplayBackend> {
    controller: EditController<'static>,
    screen: Screen,
    backend: B,
    config: &'c SimConfig,
}

impl<'c, B: DisplayBackend> Session<'c, B> {
    pub fn new(backend: B, config: &'c SimConfig) -> Self {
        Self {
            controller: EditController::new(),
            screen: Screen::new(),
            backend,
            config,
        }
    }

    pub fn controller(&self) -> &EditController<'static> {
        &self.controller
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[cfg(test)]
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Deliver one event
    ///
    /// A rejected event leaves the sign unchanged; the caller decides how
    /// to tell the operator.
    pub fn deliver(&mut self, event: EditEvent) -> Result<Outcome, SignError> {
        log::debug!("Line {} <- {:?}", event.line, event.payload);

        let outcome = self.controller.handle(event)?;
        self.log_outcome(event.line, &outcome);
        Ok(outcome)
    }

    /// Deliver a key press to the focused line
    pub fn press(&mut self, key: RawKey) -> Result<Outcome, SignError> {
        self.deliver(key.to_event(self.controller.focused()))
    }

    /// Deliver a key press to a specific line
    pub fn press_on(&mut self, line: u8, key: RawKey) -> Result<Outcome, SignError> {
        self.deliver(key.to_event(line))
    }

    pub fn focus_next(&mut self) {
        self.controller.focus_next();
    }

    pub fn focus_previous(&mut self) {
        self.controller.focus_previous();
    }

    /// Clear every line
    pub fn clear_all(&mut self) {
        self.controller.clear_all();
        log::info!("Cleared all lines");
    }

    /// Show a configured preset
    pub fn show_preset(&mut self, name: &str) -> Result<()> {
        let config = self.config;
        let Some(preset) = config.preset(name) else {
            bail!("unknown preset {:?}", name);
        };

        if preset.clear {
            self.clear_all();
        }
        self.controller
            .show(preset.line, &preset.text)
            .map_err(|e| anyhow!("preset {}: {}", name, e))?;

        log::info!("Line {} shows preset {}", preset.line, name);
        Ok(())
    }

    /// Show the preset bound to a function key, if any
    pub fn function_key(&mut self, key: u8) -> Result<bool> {
        let config = self.config;
        match config.preset_for_key(key) {
            Some(preset) => self.show_preset(&preset.name).map(|()| true),
            None => Ok(false),
        }
    }

    /// Apply one script command
    pub fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Keys { line, keys } => {
                for key in keys {
                    if let Err(e) = self.press_on(*line, *key) {
                        log::warn!("Line {}: {}", line, e);
                    }
                }
            }
            Command::Clear => self.clear_all(),
            Command::Preset(name) => self.show_preset(name)?,
        }
        Ok(())
    }

    /// Apply script steps, drawing after each one
    pub fn run_script(&mut self, steps: &[Step]) -> Result<()> {
        self.redraw()?;
        for step in steps {
            self.apply(&step.command)
                .with_context(|| format!("script line {}", step.number))?;
            self.render()?;
        }
        Ok(())
    }

    /// Draw the lines that changed since the last render
    pub fn render(&mut self) -> Result<()> {
        self.screen
            .refresh(&self.controller)
            .map_err(|e| anyhow!("refreshing screen: {}", e))?;
        self.screen
            .render_to(&mut self.backend)
            .map_err(|e| anyhow!("drawing sign: {}", e))
    }

    /// Clear the surface and draw every line
    pub fn redraw(&mut self) -> Result<()> {
        self.backend
            .clear()
            .map_err(|e| anyhow!("clearing display: {}", e))?;
        self.screen.mark_dirty();
        self.render()
    }

    fn log_outcome(&self, line: u8, outcome: &Outcome) {
        match outcome {
            Outcome::Displayed(bitmap) => {
                let content = self
                    .controller
                    .line(line)
                    .map(|buffer| buffer.content())
                    .unwrap_or_default();
                log::info!(
                    "Line {} displayed {:?} ({} columns)",
                    line,
                    content,
                    bitmap.width()
                );
            }
            Outcome::Cleared => log::info!("Line {} cleared", line),
            Outcome::Edited | Outcome::Ignored => {}
        }
    }
}
