use std::sync::Arc;

use crossterm::event::KeyEvent;
use tracing::{debug, warn};

use crate::countdown::Clock;
use crate::error::Result;
use crate::game::{GameController, GamePhase, Player};
use crate::input::{self, Command, CursorMove, InputView};
use crate::presets::{self, PRESETS};

/// Presets per row on the menu grid
pub const MENU_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Game,
}

/// The game controller plus the bits of UI state around it.
#[derive(Debug)]
pub struct App {
    pub game: GameController,
    pub menu_cursor: usize,
    pub help_open: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(game: GameController) -> Self {
        let menu_cursor = presets::index_of(game.preset().label).unwrap_or(0);
        Self {
            game,
            menu_cursor,
            help_open: false,
            should_quit: false,
        }
    }

    pub fn with_default_preset(clock: Arc<dyn Clock>) -> Result<Self> {
        Ok(Self::new(GameController::with_default_preset(clock)?))
    }

    pub fn screen(&self) -> Screen {
        match self.game.phase() {
            GamePhase::Menu => Screen::Menu,
            GamePhase::Playing | GamePhase::Paused | GamePhase::Ended => Screen::Game,
        }
    }

    pub fn input_view(&self) -> InputView {
        InputView {
            phase: self.game.phase(),
            sides_switched: self.game.sides_switched(),
            help_open: self.help_open,
        }
    }

    /// Maps and applies a key. Returns true when something changed and the
    /// screen should be redrawn.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match input::map_key(key, self.input_view()) {
            Some(command) => self.apply(command),
            None => false,
        }
    }

    pub fn on_tick(&mut self) -> Option<Player> {
        self.game.tick()
    }

    pub fn apply(&mut self, command: Command) -> bool {
        debug!(?command, "applying command");
        match command {
            Command::SwitchTurn(player) => self.game.switch_turn(player),
            Command::TogglePause => self.game.toggle(),
            Command::StartGame => {
                self.game.phase() == GamePhase::Menu && self.game.toggle()
            }
            Command::NewGame => {
                let changed = self.game.new_game();
                if changed {
                    self.menu_cursor = presets::index_of(self.game.preset().label).unwrap_or(0);
                }
                changed
            }
            Command::Reset => self.game.reset(),
            Command::SwitchSides => self.game.switch_sides(),
            Command::MoveCursor(direction) => self.move_cursor(direction),
            Command::SelectPreset => {
                let preset = PRESETS[self.menu_cursor];
                match self.game.select_preset(preset) {
                    Ok(changed) => changed,
                    Err(e) => {
                        warn!("rejected preset {}: {e}", preset.label);
                        false
                    }
                }
            }
            Command::OpenHelp => {
                self.help_open = true;
                true
            }
            Command::CloseHelp => {
                self.help_open = false;
                true
            }
            Command::Quit => {
                self.should_quit = true;
                true
            }
        }
    }

    fn move_cursor(&mut self, direction: CursorMove) -> bool {
        let last = PRESETS.len() - 1;
        let next = match direction {
            CursorMove::Left => self.menu_cursor.saturating_sub(1),
            CursorMove::Right => (self.menu_cursor + 1).min(last),
            CursorMove::Up => self.menu_cursor.saturating_sub(MENU_COLUMNS),
            CursorMove::Down => {
                let down = self.menu_cursor + MENU_COLUMNS;
                if down > last {
                    self.menu_cursor
                } else {
                    down
                }
            }
        };
        let moved = next != self.menu_cursor;
        self.menu_cursor = next;
        moved
    }
}
