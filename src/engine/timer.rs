//! Timer core for the seconds counter.
//!
//! This module provides the state machine that the presentation layer drives:
//! - Up (stopwatch) and Down (countdown) modes
//! - Start, pause, resume, reset and mode switching
//! - Target detection with one-shot notifications
//! - Keeping exactly one tick driver registered while running

use tokio::sync::mpsc;
use tokio::time::Duration;

use super::driver::{DriverTick, IntervalDriver, ManualTickDriver, TickDriver};
use crate::types::{CounterConfig, Notification, TimerMode, TimerSnapshot, TimerState};

// ============================================================================
// TimerCore
// ============================================================================

/// Owns the timer state and its tick driver.
///
/// Every operation leaves `is_running` and the driver's activity in step:
/// whenever the state stops running the driver is cancelled in the same call.
#[derive(Debug)]
pub struct TimerCore<D: TickDriver> {
    state: TimerState,
    driver: D,
}

impl TimerCore<IntervalDriver> {
    /// Creates a core driven by a tokio interval with the given period.
    ///
    /// The returned receiver yields the driver's ticks; pass each one to
    /// [`TimerCore::on_driver_tick`].
    pub fn with_interval(
        config: CounterConfig,
        period: Duration,
    ) -> (Self, mpsc::UnboundedReceiver<DriverTick>) {
        let (driver, tick_rx) = IntervalDriver::new(period);
        (Self::new(config, driver), tick_rx)
    }
}

impl TimerCore<ManualTickDriver> {
    /// Creates a core whose ticks are applied by calling [`TimerCore::tick`].
    pub fn manual(config: CounterConfig) -> Self {
        Self::new(config, ManualTickDriver::new())
    }
}

impl<D: TickDriver> TimerCore<D> {
    /// Creates an idle core with the given configuration and driver.
    pub fn new(config: CounterConfig, driver: D) -> Self {
        Self {
            state: TimerState::new(config),
            driver,
        }
    }

    /// Switches to Up mode and runs, continuing from the current count.
    pub fn start_up(&mut self) {
        self.state.start_up();
        if !self.driver.is_active() {
            self.driver.start();
        }
        tracing::debug!(elapsed = self.state.elapsed_seconds, "started counting up");
    }

    /// Switches to Down mode and runs from the start value.
    ///
    /// A valid `initial` replaces the stored start value. Any active driver
    /// run is replaced by a fresh one.
    pub fn start_down(&mut self, initial: Option<f64>) {
        self.state.start_down(initial);
        self.driver.start();
        tracing::debug!(from = self.state.down_start, "started counting down");
    }

    /// Continues in the current mode without rewinding the count.
    pub fn resume(&mut self) {
        match self.state.mode {
            TimerMode::Up => self.start_up(),
            TimerMode::Down if self.state.elapsed_seconds == 0 => self.start_down(None),
            TimerMode::Down => {
                self.state.resume();
                if !self.driver.is_active() {
                    self.driver.start();
                }
                tracing::debug!(remaining = self.state.elapsed_seconds, "resumed countdown");
            }
        }
    }

    /// Stops ticking. Calling it while idle changes nothing.
    pub fn pause(&mut self) {
        self.state.pause();
        self.stop_driver();
    }

    /// Pauses when running, resumes otherwise.
    pub fn toggle(&mut self) {
        if self.state.is_running {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Stops and rewinds to 0 (Up) or the start value (Down).
    pub fn reset(&mut self) {
        self.state.reset();
        self.stop_driver();
        tracing::debug!(
            mode = self.state.mode.as_str(),
            elapsed = self.state.elapsed_seconds,
            "reset"
        );
    }

    /// Changes direction; a running counter keeps running the other way.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.state.set_mode(mode);
        tracing::debug!(mode = mode.as_str(), "mode changed");
    }

    /// Sets the Up target. Invalid values are ignored.
    pub fn set_up_target(&mut self, value: f64) {
        match self.state.set_up_target(value) {
            Ok(target) => tracing::debug!(target, "up target updated"),
            Err(e) => tracing::debug!(error = %e, "up target rejected"),
        }
    }

    /// Sets the Down start value. Invalid values are ignored.
    pub fn set_down_start(&mut self, value: f64) {
        match self.state.set_down_start(value) {
            Ok(start) => tracing::debug!(start, "down start updated"),
            Err(e) => tracing::debug!(error = %e, "down start rejected"),
        }
    }

    /// Applies one second. Ignored while not running.
    pub fn tick(&mut self) {
        let raised = self.state.tick();

        if !self.state.is_running {
            self.stop_driver();
        }

        if let Some(notification) = raised {
            tracing::info!(?notification, "{}", notification.message());
        }
    }

    /// Applies a tick delivered by the driver.
    ///
    /// Returns false if the tick belongs to a cancelled run or arrives while
    /// idle.
    pub fn on_driver_tick(&mut self, tick: DriverTick) -> bool {
        if tick.generation != self.driver.generation() || !self.state.is_running {
            tracing::trace!(generation = tick.generation, "discarding stale tick");
            return false;
        }
        self.tick();
        true
    }

    /// Returns and clears the pending notification.
    pub fn consume_notification(&mut self) -> Option<Notification> {
        self.state.take_notification()
    }

    /// Returns a read-only view for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a reference to the tick driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn stop_driver(&mut self) {
        if self.driver.is_active() {
            self.driver.stop();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_core() -> TimerCore<ManualTickDriver> {
        TimerCore::manual(CounterConfig::default())
    }

    fn assert_driver_in_step(core: &TimerCore<ManualTickDriver>) {
        assert_eq!(core.state().is_running, core.driver().is_active());
    }

    // ------------------------------------------------------------------------
    // Operation Tests
    // ------------------------------------------------------------------------

    mod operation_tests {
        use super::*;

        #[test]
        fn test_new_core_is_idle_up() {
            let core = create_core();
            let snapshot = core.snapshot();
            assert_eq!(snapshot.mode, TimerMode::Up);
            assert_eq!(snapshot.elapsed_seconds, 0);
            assert!(!snapshot.is_running);
            assert!(!core.driver().is_active());
        }

        #[test]
        fn test_start_up_starts_driver_once() {
            let mut core = create_core();
            core.start_up();
            core.start_up();
            assert!(core.state().is_running);
            assert_eq!(core.driver().start_count(), 1);
            assert_driver_in_step(&core);
        }

        #[test]
        fn test_start_up_continues_from_current() {
            let mut core = create_core();
            core.start_up();
            core.tick();
            core.tick();
            core.pause();
            core.start_up();
            assert_eq!(core.state().elapsed_seconds, 2);
        }

        #[test]
        fn test_start_down_replaces_active_driver() {
            let mut core = create_core();
            core.start_up();
            core.start_down(Some(5.0));
            assert_eq!(core.driver().start_count(), 2);
            assert_eq!(core.driver().cancel_count(), 1);
            assert!(core.driver().is_active());
            assert_eq!(core.state().elapsed_seconds, 5);
        }

        #[test]
        fn test_start_down_without_initial_uses_stored_start() {
            let mut core = create_core();
            core.start_down(None);
            assert_eq!(core.state().elapsed_seconds, 10);
        }

        #[test]
        fn test_pause_twice_is_noop() {
            let mut core = create_core();
            core.start_up();
            core.tick();
            core.pause();
            let before = core.state().clone();
            core.pause();
            assert_eq!(core.state(), &before);
            assert_eq!(core.driver().cancel_count(), 1);
            assert_driver_in_step(&core);
        }

        #[test]
        fn test_toggle() {
            let mut core = create_core();
            core.toggle();
            assert!(core.state().is_running);
            core.toggle();
            assert!(!core.state().is_running);
            assert_driver_in_step(&core);
        }

        #[test]
        fn test_toggle_resumes_countdown_without_rewind() {
            let mut core = create_core();
            core.start_down(Some(6.0));
            core.tick();
            core.toggle();
            core.toggle();
            assert!(core.state().is_running);
            assert_eq!(core.state().elapsed_seconds, 5);
        }

        #[test]
        fn test_reset_up() {
            let mut core = create_core();
            core.start_up();
            core.tick();
            core.reset();
            assert_eq!(core.state().elapsed_seconds, 0);
            assert!(!core.state().is_running);
            assert_driver_in_step(&core);
        }

        #[test]
        fn test_reset_down() {
            let mut core = create_core();
            core.start_down(Some(7.0));
            core.tick();
            core.tick();
            core.reset();
            assert_eq!(core.state().elapsed_seconds, 7);
            assert!(!core.state().is_running);
            assert_driver_in_step(&core);
        }

        #[test]
        fn test_set_mode_while_running_reverses_direction() {
            let mut core = create_core();
            core.start_up();
            core.tick();
            core.tick();
            core.set_mode(TimerMode::Down);
            assert!(core.state().is_running);
            assert_eq!(core.state().elapsed_seconds, 2);
            core.tick();
            assert_eq!(core.state().elapsed_seconds, 1);
            assert_driver_in_step(&core);
        }

        #[test]
        fn test_set_up_target_rejects_invalid() {
            let mut core = create_core();
            core.set_up_target(0.0);
            core.set_up_target(-5.0);
            core.set_up_target(f64::NAN);
            assert_eq!(core.state().up_target, 30);

            core.set_up_target(12.0);
            assert_eq!(core.state().up_target, 12);
        }

        #[test]
        fn test_set_down_start_syncs_idle_down_display() {
            let mut core = TimerCore::manual(CounterConfig::default().with_mode(TimerMode::Down));
            core.set_down_start(42.0);
            assert_eq!(core.state().down_start, 42);
            assert_eq!(core.state().elapsed_seconds, 42);

            core.set_down_start(f64::INFINITY);
            assert_eq!(core.state().down_start, 42);
        }
    }

    // ------------------------------------------------------------------------
    // Tick Tests
    // ------------------------------------------------------------------------

    mod tick_tests {
        use super::*;

        #[test]
        fn test_tick_while_idle_does_nothing() {
            let mut core = create_core();
            core.tick();
            assert_eq!(core.state().elapsed_seconds, 0);
            assert_eq!(core.consume_notification(), None);
        }

        #[test]
        fn test_countdown_finish_stops_driver() {
            let mut core = create_core();
            core.start_down(Some(1.0));
            core.tick();
            assert!(!core.state().is_running);
            assert!(!core.driver().is_active());
            assert_eq!(
                core.consume_notification(),
                Some(Notification::CountdownFinished)
            );
            assert_eq!(core.consume_notification(), None);
        }

        #[test]
        fn test_target_fires_once_per_crossing() {
            let mut core = TimerCore::manual(CounterConfig::default().with_up_target(3));
            core.start_up();

            let mut fired = Vec::new();
            for _ in 0..6 {
                core.tick();
                if let Some(n) = core.consume_notification() {
                    fired.push((core.state().elapsed_seconds, n));
                }
            }
            assert_eq!(fired, vec![(3, Notification::ReachedTarget { target: 3 })]);

            core.reset();
            core.start_up();
            for _ in 0..3 {
                core.tick();
            }
            assert_eq!(
                core.consume_notification(),
                Some(Notification::ReachedTarget { target: 3 })
            );
        }

        #[test]
        fn test_on_driver_tick_discards_stale_generation() {
            let mut core = create_core();
            core.start_up();
            let stale = DriverTick {
                generation: core.driver().generation(),
            };
            core.start_down(Some(5.0));

            assert!(!core.on_driver_tick(stale));
            assert_eq!(core.state().elapsed_seconds, 5);

            let current = DriverTick {
                generation: core.driver().generation(),
            };
            assert!(core.on_driver_tick(current));
            assert_eq!(core.state().elapsed_seconds, 4);
        }

        #[test]
        fn test_on_driver_tick_discards_when_paused() {
            let mut core = create_core();
            core.start_up();
            let tick = DriverTick {
                generation: core.driver().generation(),
            };
            core.pause();
            assert!(!core.on_driver_tick(tick));
            assert_eq!(core.state().elapsed_seconds, 0);
        }
    }

    // ------------------------------------------------------------------------
    // Integration Tests with Tokio Runtime
    // ------------------------------------------------------------------------

    mod integration_tests {
        use super::*;
        use tokio::time::timeout;

        #[tokio::test]
        async fn test_interval_core_counts_down_to_zero() {
            let config = CounterConfig::default();
            let (mut core, mut rx) = TimerCore::with_interval(config, Duration::from_millis(20));
            core.start_down(Some(3.0));

            let result = timeout(Duration::from_secs(2), async {
                while let Some(tick) = rx.recv().await {
                    core.on_driver_tick(tick);
                    if !core.state().is_running {
                        break;
                    }
                }
            })
            .await;

            assert!(result.is_ok(), "countdown should finish");
            assert_eq!(core.state().elapsed_seconds, 0);
            assert!(!core.driver().is_active());
            assert_eq!(
                core.consume_notification(),
                Some(Notification::CountdownFinished)
            );
        }

        #[tokio::test]
        async fn test_interval_core_pause_stops_counting() {
            let config = CounterConfig::default();
            let (mut core, mut rx) = TimerCore::with_interval(config, Duration::from_millis(20));
            core.start_up();

            let tick = timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("tick within timeout")
                .expect("channel open");
            assert!(core.on_driver_tick(tick));
            core.pause();

            tokio::time::sleep(Duration::from_millis(100)).await;
            while let Ok(tick) = rx.try_recv() {
                assert!(!core.on_driver_tick(tick));
            }
            assert_eq!(core.state().elapsed_seconds, 1);
        }
    }
}
