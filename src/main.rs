use std::{
    io::{self, stdin},
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use klok::{
    app::App,
    config::{Settings, DEFAULT_TICK_RATE_MS},
    countdown::MonotonicClock,
    game::GamePhase,
    logging,
    runtime::{ClockEvent, ClockEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    ui,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::{error, info};

/// two-player chess clock for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A two-player chess clock for the terminal. Pick a time control, start the game and end each move with your key; Fischer increments are added when you hand the move over."
)]
pub struct Cli {
    /// time control to preselect, e.g. "5 min" or "3 | 2"
    #[clap(short = 'p', long)]
    preset: Option<String>,

    /// seat player 2 on the left with the white pieces
    #[clap(long)]
    switch_sides: bool,

    /// redraw interval in milliseconds
    #[clap(short = 't', long, default_value_t = DEFAULT_TICK_RATE_MS)]
    tick_rate_ms: u64,

    /// write diagnostics to this file instead of the default state directory
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log at debug level
    #[clap(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn to_settings(&self) -> klok::Result<Settings> {
        Settings::resolve(
            self.preset.as_deref(),
            self.switch_sides,
            self.tick_rate_ms,
            self.log_file.clone(),
            self.verbose,
        )
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match cli.to_settings() {
        Ok(settings) => settings,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = logging::init(&settings)? {
        info!(log = %path.display(), "starting klok");
    }

    let mut app = settings.build_app(Arc::new(MonotonicClock::new()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        // Lets the two shift keys arrive as distinct key presses
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(settings.tick_rate),
    );
    let result = run_app(&mut terminal, &mut app, &mut runner);

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!("event loop failed: {e:#}");
    }
    result?;

    println!("{}", outcome_summary(&app));
    info!("exiting");
    Ok(())
}

fn run_app<B: Backend, E: ClockEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E, T>,
) -> anyhow::Result<()> {
    terminal
        .draw(|f| ui::draw(app, f))
        .context("initial draw")?;

    while !app.should_quit {
        match runner.step() {
            ClockEvent::Tick => {
                app.on_tick();
            }
            ClockEvent::Resize => {}
            ClockEvent::Key(key) => {
                app.on_key(key);
                // Settle any expiry that happened between ticks
                app.on_tick();
            }
        }
        terminal.draw(|f| ui::draw(app, f))?;
    }

    Ok(())
}

/// One line for the shell once the alternate screen is gone.
fn outcome_summary(app: &App) -> String {
    match (app.game.phase(), app.game.winner()) {
        (GamePhase::Ended, Some(winner)) => format!(
            "{} ({}) wins on time, {}",
            winner,
            app.game.side_of(winner),
            app.game.preset().label
        ),
        _ => "no result".to_string(),
    }
}
