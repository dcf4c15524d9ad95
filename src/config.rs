use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::app::App;
use crate::countdown::Clock;
use crate::error::{ClockError, Result};
use crate::game::GameController;
use crate::presets::{self, Preset};

pub const DEFAULT_TICK_RATE_MS: u64 = 100;
pub const MIN_TICK_RATE_MS: u64 = 10;
pub const MAX_TICK_RATE_MS: u64 = 1000;

/// Validated startup settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub preset: Preset,
    pub switch_sides: bool,
    pub tick_rate: Duration,
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: presets::default_preset(),
            switch_sides: false,
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
            log_file: None,
            verbose: false,
        }
    }
}

impl Settings {
    pub fn resolve(
        preset: Option<&str>,
        switch_sides: bool,
        tick_rate_ms: u64,
        log_file: Option<PathBuf>,
        verbose: bool,
    ) -> Result<Self> {
        let preset = match preset {
            Some(label) => presets::find(label)?,
            None => presets::default_preset(),
        };
        if !(MIN_TICK_RATE_MS..=MAX_TICK_RATE_MS).contains(&tick_rate_ms) {
            return Err(ClockError::InvalidTickRate(tick_rate_ms));
        }

        Ok(Self {
            preset,
            switch_sides,
            tick_rate: Duration::from_millis(tick_rate_ms),
            log_file,
            verbose,
        })
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Builds the app in its menu state with these settings applied.
    pub fn build_app(&self, clock: Arc<dyn Clock>) -> Result<App> {
        let mut game = GameController::new(self.preset, clock)?;
        if self.switch_sides {
            game.switch_sides();
        }
        Ok(App::new(game))
    }
}
