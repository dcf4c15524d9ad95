use std::sync::Arc;

use tracing::{debug, info};

use crate::countdown::{Clock, TimerConfig};
use crate::error::Result;
use crate::player_timer::PlayerTimer;
use crate::presets::{self, Preset};
use crate::time_values::increment_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Player {
    #[strum(serialize = "Player 1")]
    P1,
    #[strum(serialize = "Player 2")]
    P2,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::P1 => Player::P2,
            Player::P2 => Player::P1,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::P1 => 0,
            Player::P2 => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Side {
    White,
    Black,
}

/// Everything the screens render from.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: GamePhase,
    pub turn: Player,
    pub increment_secs: u64,
    pub timer_config: TimerConfig,
    pub sides_switched: bool,
    pub winner: Option<Player>,
    pub preset: Preset,
}

/// The turn and timer state machine.
///
/// Owns the session and both player timers. Illegal moves (switching for
/// the wrong player, pausing a finished game) are ignored and reported as
/// `false`, never as errors. While `Playing`, exactly one timer runs.
#[derive(Debug)]
pub struct GameController {
    session: Session,
    timers: [PlayerTimer; 2],
}

impl GameController {
    pub fn new(preset: Preset, clock: Arc<dyn Clock>) -> Result<Self> {
        let timer_config = TimerConfig::countdown_from_secs(preset.base_secs)?;
        let timers = [
            PlayerTimer::new(&timer_config, Arc::clone(&clock)),
            PlayerTimer::new(&timer_config, clock),
        ];

        Ok(Self {
            session: Session {
                phase: GamePhase::Menu,
                turn: Player::P1,
                increment_secs: preset.increment_secs,
                timer_config,
                sides_switched: false,
                winner: None,
                preset,
            },
            timers,
        })
    }

    pub fn with_default_preset(clock: Arc<dyn Clock>) -> Result<Self> {
        Self::new(presets::default_preset(), clock)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn turn(&self) -> Player {
        self.session.turn
    }

    pub fn winner(&self) -> Option<Player> {
        self.session.winner
    }

    pub fn increment_secs(&self) -> u64 {
        self.session.increment_secs
    }

    pub fn sides_switched(&self) -> bool {
        self.session.sides_switched
    }

    pub fn preset(&self) -> Preset {
        self.session.preset
    }

    pub fn timer(&self, player: Player) -> &PlayerTimer {
        &self.timers[player.index()]
    }

    fn timer_mut(&mut self, player: Player) -> &mut PlayerTimer {
        &mut self.timers[player.index()]
    }

    /// Seat colour. White moves first.
    pub fn side_of(&self, player: Player) -> Side {
        match (player, self.session.sides_switched) {
            (Player::P1, false) | (Player::P2, true) => Side::White,
            _ => Side::Black,
        }
    }

    /// Whoever holds White starts a fresh game.
    pub fn default_turn(&self) -> Player {
        if self.session.sides_switched {
            Player::P2
        } else {
            Player::P1
        }
    }

    /// Picks a time control. Only allowed in the menu; choosing the preset
    /// already selected changes nothing.
    pub fn select_preset(&mut self, preset: Preset) -> Result<bool> {
        if self.session.phase != GamePhase::Menu || preset == self.session.preset {
            return Ok(false);
        }

        let timer_config = TimerConfig::countdown_from_secs(preset.base_secs)?;
        self.session.timer_config = timer_config;
        self.session.increment_secs = preset.increment_secs;
        self.session.preset = preset;

        let config = self.session.timer_config.clone();
        for timer in self.timers.iter_mut() {
            timer.sync_config(&config);
        }
        info!(preset = preset.label, "selected time control");
        Ok(true)
    }

    /// Start, pause and resume in one: looks at whether the current turn's
    /// timer is running.
    pub fn toggle(&mut self) -> bool {
        if self.settle() {
            return true;
        }
        if self.session.phase == GamePhase::Ended {
            return false;
        }

        let turn = self.session.turn;
        if self.timer(turn).is_running() {
            self.timer_mut(turn).pause();
            self.set_phase(GamePhase::Paused);
        } else {
            self.timer_mut(turn.other()).pause();
            self.timer_mut(turn).start();
            self.set_phase(GamePhase::Playing);
        }
        true
    }

    /// Ends `player`'s move. Ignored unless the game is running and it is
    /// actually `player`'s turn, so a repeated key press cannot advance the
    /// turn twice.
    pub fn switch_turn(&mut self, player: Player) -> bool {
        if self.settle() {
            return true;
        }
        if self.session.phase != GamePhase::Playing || self.session.turn != player {
            return false;
        }

        let next = player.other();
        let increment = self.session.increment_secs;

        self.timer_mut(player).pause();
        if increment > 0 {
            let incremented = increment_time(self.timer(player).remaining(), increment);
            self.timer_mut(player).replace(incremented);
        }
        self.timer_mut(next).start();
        self.session.turn = next;

        debug!(from = %player, to = %next, increment, "switched turn");
        true
    }

    /// Back to the menu with fresh clocks.
    pub fn new_game(&mut self) -> bool {
        if self.session.phase == GamePhase::Menu {
            return false;
        }
        for timer in self.timers.iter_mut() {
            timer.stop();
        }
        self.rebuild_timers();
        self.set_phase(GamePhase::Menu);
        true
    }

    /// After a flag fall: fresh clocks, same time control, paused and ready.
    pub fn reset(&mut self) -> bool {
        if self.session.phase != GamePhase::Ended {
            return false;
        }
        self.rebuild_timers();
        self.set_phase(GamePhase::Paused);
        true
    }

    /// Swaps seat colours. Menu only.
    pub fn switch_sides(&mut self) -> bool {
        if self.session.phase != GamePhase::Menu {
            return false;
        }
        self.session.sides_switched = !self.session.sides_switched;
        self.session.turn = self.default_turn();
        debug!(sides_switched = self.session.sides_switched, "switched sides");
        true
    }

    /// Polls both timers. Returns the winner when this tick ended the game.
    pub fn tick(&mut self) -> Option<Player> {
        let mut flagged = None;
        for player in [Player::P1, Player::P2] {
            if self.timer_mut(player).poll().is_some() {
                flagged = Some(player);
            }
        }

        let loser = flagged?;
        if !matches!(self.session.phase, GamePhase::Playing | GamePhase::Paused)
            || self.session.winner.is_some()
        {
            debug!(%loser, phase = %self.session.phase, "expiry outside a running game");
            return None;
        }

        let winner = loser.other();
        self.session.winner = Some(winner);
        self.set_phase(GamePhase::Ended);
        info!(%loser, %winner, "flag fell");
        Some(winner)
    }

    /// Applies a flag fall the last tick has not seen yet, so no transition
    /// acts on a clock that already ran out. Returns true when it ended the
    /// game.
    fn settle(&mut self) -> bool {
        self.tick().is_some()
    }

    /// Number of timers currently running.
    pub fn running_timers(&self) -> usize {
        self.timers.iter().filter(|t| t.is_running()).count()
    }

    fn rebuild_timers(&mut self) {
        let config = self.session.timer_config.clone();
        for timer in self.timers.iter_mut() {
            timer.rebuild(&config);
        }
        self.session.turn = self.default_turn();
        self.session.winner = None;
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.session.phase != phase {
            info!(from = %self.session.phase, to = %phase, "phase change");
        }
        self.session.phase = phase;
    }
}
