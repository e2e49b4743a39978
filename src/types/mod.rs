//! Core data types for the seconds counter.
//!
//! This module defines the data structures used for:
//! - Timer mode and state transitions
//! - One-shot notifications
//! - Counter configuration with validation
//! - Read-only snapshots for the presentation layer

mod error;

pub use error::ConfigError;

use serde::{Deserialize, Serialize};

/// Default threshold for the Up mode notification.
pub const DEFAULT_UP_TARGET: u32 = 30;

/// Default starting value for the Down mode.
pub const DEFAULT_DOWN_START: u32 = 10;

// ============================================================================
// Validation
// ============================================================================

/// Validates a user-supplied seconds value.
///
/// The value must be finite, positive, and fit in a `u32`. It is floored
/// and raised to at least 1, so `0.5` becomes 1.
pub fn validate_seconds(value: f64) -> Result<u32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite(value));
    }
    if value <= 0.0 {
        return Err(ConfigError::BelowMinimum(value));
    }
    let floored = value.floor();
    if floored > f64::from(u32::MAX) {
        return Err(ConfigError::TooLarge(value));
    }
    Ok((floored as u32).max(1))
}

// ============================================================================
// TimerMode
// ============================================================================

/// Direction the counter moves on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    /// Stopwatch: counts up towards the target
    #[default]
    Up,
    /// Countdown: counts down to zero
    Down,
}

impl TimerMode {
    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Up => "up",
            TimerMode::Down => "down",
        }
    }

    /// Returns the other mode.
    pub fn flipped(&self) -> Self {
        match self {
            TimerMode::Up => TimerMode::Down,
            TimerMode::Down => TimerMode::Up,
        }
    }
}

// ============================================================================
// Notification
// ============================================================================

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
}

/// One-shot signal raised by the timer for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// The Up counter reached its target
    ReachedTarget {
        /// Target value that was reached
        target: u32,
    },
    /// The Down counter hit zero
    CountdownFinished,
}

impl Notification {
    /// Returns the message shown to the user.
    pub fn message(&self) -> String {
        match self {
            Notification::ReachedTarget { target } => format!("Reached {} seconds!", target),
            Notification::CountdownFinished => "Countdown finished!".to_string(),
        }
    }

    pub fn level(&self) -> NotificationLevel {
        match self {
            Notification::ReachedTarget { .. } => NotificationLevel::Info,
            Notification::CountdownFinished => NotificationLevel::Success,
        }
    }
}

// ============================================================================
// CounterConfig
// ============================================================================

fn default_up_target() -> u32 {
    DEFAULT_UP_TARGET
}

fn default_down_start() -> u32 {
    DEFAULT_DOWN_START
}

/// Initial configuration for a counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterConfig {
    /// Mode the counter starts in
    #[serde(default)]
    pub mode: TimerMode,
    /// Up mode notification threshold in seconds
    #[serde(default = "default_up_target")]
    pub up_target: u32,
    /// Down mode starting value in seconds
    #[serde(default = "default_down_start")]
    pub down_start: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            mode: TimerMode::Up,
            up_target: DEFAULT_UP_TARGET,
            down_start: DEFAULT_DOWN_START,
        }
    }
}

impl CounterConfig {
    /// Sets the initial mode.
    pub fn with_mode(mut self, mode: TimerMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the Up mode target.
    pub fn with_up_target(mut self, seconds: u32) -> Self {
        self.up_target = seconds;
        self
    }

    /// Sets the Down mode starting value.
    pub fn with_down_start(mut self, seconds: u32) -> Self {
        self.down_start = seconds;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.up_target == 0 {
            return Err(ConfigError::ZeroField("upTarget"));
        }
        if self.down_start == 0 {
            return Err(ConfigError::ZeroField("downStart"));
        }
        Ok(())
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The complete state of one counter.
///
/// Transitions here are pure bookkeeping; starting and stopping the tick
/// driver is the job of [`crate::engine::TimerCore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Current counting direction
    pub mode: TimerMode,
    /// Seconds since start (Up) or seconds remaining (Down)
    pub elapsed_seconds: u32,
    /// Whether ticks are being applied
    pub is_running: bool,
    /// Up mode notification threshold
    pub up_target: u32,
    /// Down mode starting value
    pub down_start: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_notification: Option<Notification>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(CounterConfig::default())
    }
}

impl TimerState {
    /// Creates an idle state from the given configuration.
    ///
    /// Zero values in the configuration fall back to the defaults.
    pub fn new(config: CounterConfig) -> Self {
        let up_target = if config.up_target == 0 {
            DEFAULT_UP_TARGET
        } else {
            config.up_target
        };
        let down_start = if config.down_start == 0 {
            DEFAULT_DOWN_START
        } else {
            config.down_start
        };
        let elapsed_seconds = match config.mode {
            TimerMode::Up => 0,
            TimerMode::Down => down_start,
        };

        Self {
            mode: config.mode,
            elapsed_seconds,
            is_running: false,
            up_target,
            down_start,
            pending_notification: None,
        }
    }

    /// Switches to Up mode and runs, keeping the current count.
    pub fn start_up(&mut self) {
        self.mode = TimerMode::Up;
        self.is_running = true;
    }

    /// Switches to Down mode and runs from `down_start`.
    ///
    /// A valid `initial` replaces `down_start` first; an invalid one is
    /// ignored.
    pub fn start_down(&mut self, initial: Option<f64>) {
        if let Some(Ok(value)) = initial.map(validate_seconds) {
            self.down_start = value;
        }
        self.mode = TimerMode::Down;
        self.elapsed_seconds = self.down_start;
        self.is_running = true;
    }

    /// Continues in the current mode without touching the count.
    ///
    /// A finished countdown restarts from `down_start`.
    pub fn resume(&mut self) {
        match self.mode {
            TimerMode::Up => self.start_up(),
            TimerMode::Down if self.elapsed_seconds == 0 => self.start_down(None),
            TimerMode::Down => self.is_running = true,
        }
    }

    pub fn pause(&mut self) {
        self.is_running = false;
    }

    /// Stops and rewinds the count for the current mode.
    pub fn reset(&mut self) {
        self.is_running = false;
        self.elapsed_seconds = match self.mode {
            TimerMode::Up => 0,
            TimerMode::Down => self.down_start,
        };
    }

    /// Changes direction only; running state and count are kept.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
    }

    /// Updates the Up target if the value is valid.
    pub fn set_up_target(&mut self, value: f64) -> Result<u32, ConfigError> {
        let target = validate_seconds(value)?;
        self.up_target = target;
        Ok(target)
    }

    /// Updates the Down start if the value is valid.
    ///
    /// While idle in Down mode the displayed count follows the new value.
    pub fn set_down_start(&mut self, value: f64) -> Result<u32, ConfigError> {
        let start = validate_seconds(value)?;
        self.down_start = start;
        if self.mode == TimerMode::Down && !self.is_running {
            self.elapsed_seconds = start;
        }
        Ok(start)
    }

    /// Applies one second.
    ///
    /// Returns the notification raised by this tick, if any. Does nothing
    /// while not running.
    pub fn tick(&mut self) -> Option<Notification> {
        if !self.is_running {
            return None;
        }

        let raised = match self.mode {
            TimerMode::Up => {
                self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
                (self.elapsed_seconds == self.up_target)
                    .then_some(Notification::ReachedTarget { target: self.up_target })
            }
            TimerMode::Down => {
                if self.elapsed_seconds <= 1 {
                    self.elapsed_seconds = 0;
                    self.is_running = false;
                    Some(Notification::CountdownFinished)
                } else {
                    self.elapsed_seconds -= 1;
                    None
                }
            }
        };

        if raised.is_some() {
            self.pending_notification = raised;
        }
        raised
    }

    /// Returns the pending notification without clearing it.
    pub fn pending_notification(&self) -> Option<Notification> {
        self.pending_notification
    }

    /// Returns and clears the pending notification.
    pub fn take_notification(&mut self) -> Option<Notification> {
        self.pending_notification.take()
    }

    /// Completion percentage for the current mode, clamped to 0..=100.
    pub fn progress_percent(&self) -> f64 {
        let percent = match self.mode {
            TimerMode::Up => {
                if self.up_target == 0 {
                    return 0.0;
                }
                f64::from(self.elapsed_seconds) / f64::from(self.up_target) * 100.0
            }
            TimerMode::Down => {
                if self.down_start == 0 {
                    return 0.0;
                }
                let done = f64::from(self.down_start) - f64::from(self.elapsed_seconds);
                done / f64::from(self.down_start) * 100.0
            }
        };
        percent.clamp(0.0, 100.0)
    }

    /// Returns a read-only view for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            mode: self.mode,
            elapsed_seconds: self.elapsed_seconds,
            is_running: self.is_running,
            up_target: self.up_target,
            down_start: self.down_start,
            progress_percent: self.progress_percent(),
        }
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Outbound view of the timer handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub mode: TimerMode,
    pub elapsed_seconds: u32,
    pub is_running: bool,
    pub up_target: u32,
    pub down_start: u32,
    pub progress_percent: f64,
}

// ============================================================================
// Tests
// ============================================================================
