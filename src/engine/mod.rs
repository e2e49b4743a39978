//! Timer engine for the seconds counter.
//!
//! This module contains the core timer functionality:
//! - `driver`: Tick drivers that produce one tick per period while running
//! - `timer`: `TimerCore`, which owns the state and keeps the driver in step

pub mod driver;
pub mod timer;

pub use driver::{DriverTick, IntervalDriver, ManualTickDriver, TickDriver, TICK_PERIOD};
pub use timer::TimerCore;
