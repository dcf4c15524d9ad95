use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::countdown::{Clock, Countdown, CountdownEvent, TimerConfig};
use crate::display;
use crate::time_values::TimeValues;

/// Returned by [`PlayerTimer::poll`] the one time a handle runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expired;

/// Owns one player's countdown handle and its subscription.
///
/// `remaining` is the observable value the UI reads; it only changes through
/// events from the current handle. The handle is never adjusted in place:
/// new time means a new handle.
#[derive(Debug)]
pub struct PlayerTimer {
    clock: Arc<dyn Clock>,
    config_generation: u64,
    initial_secs: u64,
    handle: Countdown,
    events: Receiver<CountdownEvent>,
    remaining: TimeValues,
    expired: bool,
}

impl PlayerTimer {
    pub fn new(config: &TimerConfig, clock: Arc<dyn Clock>) -> Self {
        let mut handle = Countdown::new(config.clone(), Arc::clone(&clock));
        let events = handle.subscribe();
        Self {
            clock,
            config_generation: config.generation(),
            initial_secs: config.initial_secs(),
            remaining: handle.remaining(),
            handle,
            events,
            expired: false,
        }
    }

    /// Rebuilds the handle when `config` is not the one this timer was last
    /// built from. Returns whether a rebuild happened.
    pub fn sync_config(&mut self, config: &TimerConfig) -> bool {
        if config.generation() == self.config_generation {
            return false;
        }
        self.rebuild(config);
        true
    }

    /// Discards the current handle and builds a fresh one from `config`.
    pub fn rebuild(&mut self, config: &TimerConfig) {
        self.config_generation = config.generation();
        self.initial_secs = config.initial_secs();
        self.install(config.clone());
    }

    /// Swaps in a handle seeded at `start_values`, keeping the session
    /// config this timer belongs to.
    pub fn replace(&mut self, start_values: TimeValues) {
        match self.handle.config().with_start_values(start_values) {
            Ok(config) => self.install(config),
            Err(e) => warn!("keeping current handle, cannot seed {start_values:?}: {e}"),
        }
    }

    fn install(&mut self, config: TimerConfig) {
        // Old subscription is released before the new handle exists, so no
        // late tick from it can land after the new one is live.
        self.events = detached();
        self.handle = Countdown::new(config, Arc::clone(&self.clock));

        self.events = self.handle.subscribe();
        self.remaining = self.handle.remaining();
        self.expired = false;
        debug!(remaining = ?self.remaining, "installed countdown handle");
    }

    pub fn start(&mut self) {
        self.handle.start();
    }

    pub fn pause(&mut self) {
        self.handle.pause();
        self.remaining = self.handle.remaining();
    }

    pub fn stop(&mut self) {
        self.handle.stop();
        self.drain();
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    pub fn remaining(&self) -> TimeValues {
        self.remaining
    }

    pub fn initial_secs(&self) -> u64 {
        self.initial_secs
    }

    pub fn has_expired(&self) -> bool {
        self.expired
    }

    /// Share of the starting time still on the clock, in percent.
    pub fn progress_percent(&self) -> f64 {
        display::progress_percent(self.handle.total_remaining_secs(), self.initial_secs)
    }

    /// Advances the handle and republishes its events. Yields `Expired` at
    /// most once per handle.
    pub fn poll(&mut self) -> Option<Expired> {
        self.handle.poll();
        if self.drain() && !self.expired {
            self.expired = true;
            return Some(Expired);
        }
        None
    }

    /// Returns true when a target-reached event was seen.
    fn drain(&mut self) -> bool {
        let mut reached = false;
        loop {
            match self.events.try_recv() {
                Ok(CountdownEvent::Tick(values)) => self.remaining = values,
                Ok(CountdownEvent::TargetReached) => reached = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        reached
    }
}

fn detached() -> Receiver<CountdownEvent> {
    let (_, rx) = mpsc::channel();
    rx
}
