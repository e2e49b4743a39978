//! Seconds Counter Library
//!
//! This library provides the core functionality for the seconds counter CLI.
//! It includes:
//! - Timer core with Up (stopwatch) and Down (countdown) modes
//! - Tick drivers backed by tokio or applied by hand
//! - CLI command parsing, interactive session and display utilities
//! - Type definitions for configuration, state and notifications

pub mod cli;
pub mod engine;
pub mod types;

// Re-export commonly used types for convenience
pub use engine::{DriverTick, IntervalDriver, ManualTickDriver, TickDriver, TimerCore, TICK_PERIOD};
pub use types::{
    validate_seconds, ConfigError, CounterConfig, Notification, NotificationLevel, TimerMode,
    TimerSnapshot, TimerState,
};
