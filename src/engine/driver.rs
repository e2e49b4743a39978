//! Tick drivers.
//!
//! A driver is the single repeating timer resource owned by a
//! [`TimerCore`](super::TimerCore). Starting a driver that is already active
//! cancels the previous run first, so there is never more than one source of
//! ticks.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

/// Default cadence of the counter.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One tick emitted by a driver run.
///
/// `generation` identifies the run that produced it; ticks from a cancelled
/// run carry an older generation and are discarded by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverTick {
    pub generation: u64,
}

/// Lifecycle of a repeating tick source.
pub trait TickDriver {
    /// Starts a new run, cancelling any active one first.
    ///
    /// Returns the generation of the new run.
    fn start(&mut self) -> u64;

    /// Cancels the active run. Does nothing when idle.
    fn stop(&mut self);

    /// Returns true while a run is registered.
    fn is_active(&self) -> bool;

    /// Generation of the most recent run.
    fn generation(&self) -> u64;
}

// ============================================================================
// IntervalDriver
// ============================================================================

/// Driver backed by a tokio task running `tokio::time::interval`.
///
/// Ticks are delivered over an unbounded channel to whoever owns the core.
/// Dropping the driver aborts the task.
#[derive(Debug)]
pub struct IntervalDriver {
    period: Duration,
    tick_tx: mpsc::UnboundedSender<DriverTick>,
    task: Option<JoinHandle<()>>,
    generation: u64,
}

impl IntervalDriver {
    /// Creates an idle driver and the receiving end of its tick channel.
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<DriverTick>) {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let driver = Self {
            period,
            tick_tx,
            task: None,
            generation: 0,
        };
        (driver, tick_rx)
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl TickDriver for IntervalDriver {
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    fn start(&mut self) -> u64 {
        self.stop();
        self.generation += 1;

        let generation = self.generation;
        let period = self.period;
        let tick_tx = self.tick_tx.clone();

        self.task = Some(tokio::spawn(async move {
            // First tick one full period after start
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if tick_tx.send(DriverTick { generation }).is_err() {
                    tracing::debug!(generation, "tick receiver dropped, driver exiting");
                    break;
                }
            }
        }));

        tracing::debug!(generation, period_ms = period.as_millis() as u64, "tick driver started");
        generation
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(generation = self.generation, "tick driver stopped");
        }
    }

    fn is_active(&self) -> bool {
        self.task.is_some()
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for IntervalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

// ============================================================================
// ManualTickDriver
// ============================================================================

/// Driver without a background task.
///
/// Ticks are applied by calling [`TimerCore::tick`](super::TimerCore::tick)
/// directly. Start and cancel calls are counted so callers can verify the
/// lifecycle.
#[derive(Debug, Default)]
pub struct ManualTickDriver {
    active: bool,
    generation: u64,
    start_count: usize,
    cancel_count: usize,
}

impl ManualTickDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of runs started.
    #[must_use]
    pub fn start_count(&self) -> usize {
        self.start_count
    }

    /// Number of active runs cancelled, including implicit cancels on restart.
    #[must_use]
    pub fn cancel_count(&self) -> usize {
        self.cancel_count
    }
}

impl TickDriver for ManualTickDriver {
    fn start(&mut self) -> u64 {
        self.stop();
        self.active = true;
        self.generation += 1;
        self.start_count += 1;
        self.generation
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.cancel_count += 1;
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn generation(&self) -> u64 {
        self.generation
    }
}

// ============================================================================
// Tests
// ============================================================================
