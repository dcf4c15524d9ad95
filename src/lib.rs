// Library surface for the binary, headless/integration tests and reuse.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod countdown;
pub mod display;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod player_timer;
pub mod presets;
pub mod runtime;
pub mod time_values;
pub mod ui;

pub use error::{ClockError, Result};
