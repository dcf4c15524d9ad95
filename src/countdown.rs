use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{ClockError, Result};
use crate::time_values::TimeValues;

/// Monotonic time source, read as an offset from an arbitrary origin.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    fn now(&self) -> Duration;
}

/// Production clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Clock that only moves when told to. Clones share the same reading.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    micros: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saturates at `u64::MAX` microseconds instead of wrapping.
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_micros()).unwrap_or(u64::MAX);
        let _ = self
            .micros
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.saturating_add(by))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Seconds,
    SecondTenths,
}

impl Precision {
    fn unit_tenths(self) -> u64 {
        match self {
            Precision::Seconds => 10,
            Precision::SecondTenths => 1,
        }
    }

    /// Rounds remaining tenths up to the displayed unit so a clock never
    /// shows less time than is left.
    fn quantize(self, tenths: u64) -> u64 {
        let unit = self.unit_tenths();
        tenths.div_ceil(unit) * unit
    }
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Immutable countdown configuration.
///
/// Every constructed value gets a fresh generation, which is what timer
/// controllers compare to decide whether their handle is out of date.
#[derive(Debug, Clone)]
pub struct TimerConfig {
    precision: Precision,
    countdown: bool,
    start_values: TimeValues,
    generation: u64,
}

impl TimerConfig {
    pub fn countdown_from_secs(secs: u64) -> Result<Self> {
        Self::countdown(TimeValues::from_secs(secs))
    }

    pub fn countdown(start_values: TimeValues) -> Result<Self> {
        if start_values.is_zero() {
            return Err(ClockError::NonPositiveDuration);
        }
        Ok(Self {
            precision: Precision::SecondTenths,
            countdown: true,
            start_values,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Same precision and direction, different seed. Used when increments
    /// are folded into a fresh handle.
    pub fn with_start_values(&self, start_values: TimeValues) -> Result<Self> {
        let mut config = Self::countdown(start_values)?;
        config.precision = self.precision;
        Ok(config)
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn is_countdown(&self) -> bool {
        self.countdown
    }

    pub fn start_values(&self) -> TimeValues {
        self.start_values
    }

    pub fn initial_secs(&self) -> u64 {
        self.start_values.total_secs()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Displayed remaining time changed
    Tick(TimeValues),
    /// Remaining time hit zero. Sent once per countdown.
    TargetReached,
}

/// A single countdown handle.
///
/// Time only advances while running; `poll` turns clock movement into
/// events for every live subscriber. Subscribers unsubscribe by dropping
/// their receiver, and dropping the countdown closes every channel.
pub struct Countdown {
    config: TimerConfig,
    clock: Arc<dyn Clock>,
    total_tenths: u64,
    consumed: Duration,
    running_since: Option<Duration>,
    last_shown: u64,
    reached: bool,
    listeners: Vec<Sender<CountdownEvent>>,
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("total_tenths", &self.total_tenths)
            .field("consumed", &self.consumed)
            .field("running", &self.is_running())
            .field("reached", &self.reached)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Countdown {
    pub fn new(config: TimerConfig, clock: Arc<dyn Clock>) -> Self {
        let total_tenths = config.start_values().total_tenths();
        Self {
            config,
            clock,
            total_tenths,
            consumed: Duration::ZERO,
            running_since: None,
            last_shown: total_tenths,
            reached: false,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn subscribe(&mut self) -> Receiver<CountdownEvent> {
        let (tx, rx) = mpsc::channel();
        self.listeners.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn start(&mut self) {
        if self.reached || self.running_since.is_some() {
            return;
        }
        self.running_since = Some(self.clock.now());
    }

    pub fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.consumed += self.clock.now().saturating_sub(since);
        }
    }

    /// Stops and rewinds to the start value.
    pub fn stop(&mut self) {
        self.running_since = None;
        self.consumed = Duration::ZERO;
        self.reached = false;
        self.last_shown = self.total_tenths;
        self.emit(CountdownEvent::Tick(self.config.start_values().normalized()));
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn has_reached_target(&self) -> bool {
        self.reached
    }

    pub fn remaining(&self) -> TimeValues {
        TimeValues::from_tenths(self.config.precision().quantize(self.remaining_tenths()))
    }

    /// Time counted down on this handle, pause gaps excluded.
    pub fn elapsed(&self) -> TimeValues {
        TimeValues::from_tenths(self.elapsed_tenths().min(self.total_tenths))
    }

    pub fn total_remaining_secs(&self) -> f64 {
        self.remaining_tenths() as f64 / 10.0
    }

    /// Advances against the clock and emits whatever changed since the
    /// last poll.
    pub fn poll(&mut self) {
        let remaining = self.remaining_tenths();
        let shown = self.config.precision().quantize(remaining);
        if shown != self.last_shown {
            self.last_shown = shown;
            self.emit(CountdownEvent::Tick(TimeValues::from_tenths(shown)));
        }

        if remaining == 0 && !self.reached {
            self.reached = true;
            self.running_since = None;
            self.consumed = Duration::from_millis(self.total_tenths * 100);
            self.emit(CountdownEvent::TargetReached);
        }
    }

    fn consumed_now(&self) -> Duration {
        match self.running_since {
            Some(since) => self.consumed + self.clock.now().saturating_sub(since),
            None => self.consumed,
        }
    }

    fn elapsed_tenths(&self) -> u64 {
        (self.consumed_now().as_millis() / 100) as u64
    }

    fn remaining_tenths(&self) -> u64 {
        self.total_tenths.saturating_sub(self.elapsed_tenths())
    }

    fn emit(&mut self, event: CountdownEvent) {
        self.listeners.retain(|tx| tx.send(event).is_ok());
    }
}
