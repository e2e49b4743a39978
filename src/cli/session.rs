//! Session drivers for the CLI.
//!
//! The interactive session feeds stdin commands and driver ticks into one
//! [`TimerCore`]; the simulation applies ticks back to back without waiting.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::cli::display::Display;
use crate::cli::keys::KeyCommand;
use crate::engine::{DriverTick, IntervalDriver, TickDriver, TimerCore};
use crate::types::{CounterConfig, Notification, TimerMode, TimerSnapshot};

// ============================================================================
// Commands
// ============================================================================

/// Applies a timer command to the core.
///
/// `Help` and `Quit` are handled by the caller and leave the core untouched.
pub fn apply<D: TickDriver>(core: &mut TimerCore<D>, command: KeyCommand) {
    tracing::debug!(%command, "applying command");

    match command {
        KeyCommand::Toggle => core.toggle(),
        KeyCommand::Reset => core.reset(),
        KeyCommand::StartUp => core.start_up(),
        KeyCommand::StartDown(initial) => core.start_down(initial),
        KeyCommand::Pause => core.pause(),
        KeyCommand::SwitchMode => {
            let mode = core.state().mode.flipped();
            core.set_mode(mode);
        }
        KeyCommand::SetUpTarget(value) => core.set_up_target(value),
        KeyCommand::SetDownStart(value) => core.set_down_start(value),
        KeyCommand::Help | KeyCommand::Quit => {}
    }
}

fn render<D: TickDriver>(core: &mut TimerCore<D>) {
    Display::show_status(&core.snapshot());
    if let Some(notification) = core.consume_notification() {
        Display::show_notification(&notification);
    }
}

// ============================================================================
// Interactive Session
// ============================================================================

/// Input lines handed to the interactive session.
pub type InputLines = mpsc::UnboundedReceiver<io::Result<String>>;

/// Reads stdin on a dedicated OS thread and forwards each line.
///
/// A blocking stdin read cannot be cancelled, so the thread is detached and
/// never joined; the session can end on Ctrl-C while a read is pending. The
/// channel closes at end of input or after the first read error.
pub fn spawn_stdin_reader() -> InputLines {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let failed = line.is_err();
            if tx.send(line).is_err() || failed {
                break;
            }
        }
    });
    rx
}

/// Runs the interactive loop until `q`, end of input, or Ctrl-C.
///
/// Returns the final snapshot. The core, and with it the tick driver, is
/// dropped on every exit path.
pub async fn run_interactive(
    mut core: TimerCore<IntervalDriver>,
    mut ticks: mpsc::UnboundedReceiver<DriverTick>,
    mut input: InputLines,
) -> Result<TimerSnapshot> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    render(&mut core);

    loop {
        tokio::select! {
            line = input.recv() => {
                let Some(line) = line else {
                    tracing::debug!("input closed");
                    break;
                };
                let line = line.context("failed to read input")?;
                match KeyCommand::parse(&line) {
                    Some(KeyCommand::Quit) => break,
                    Some(KeyCommand::Help) => Display::show_help(),
                    Some(command) => {
                        apply(&mut core, command);
                        render(&mut core);
                    }
                    None => Display::show_unknown(&line),
                }
            }
            Some(tick) = ticks.recv() => {
                if core.on_driver_tick(tick) {
                    render(&mut core);
                }
            }
            _ = &mut ctrl_c => {
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    Ok(core.snapshot())
}

// ============================================================================
// Simulation
// ============================================================================

/// State after one simulated tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    /// 1-based tick number
    pub tick: u32,
    /// State after the tick
    pub snapshot: TimerSnapshot,
    /// Notification raised by this tick
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// Starts a counter in the configured mode and applies up to `ticks` ticks.
///
/// Stops early once the counter is no longer running.
pub fn simulate(config: CounterConfig, ticks: u32) -> Vec<SimulationStep> {
    let mode = config.mode;
    let mut core = TimerCore::manual(config);
    match mode {
        TimerMode::Up => core.start_up(),
        TimerMode::Down => core.start_down(None),
    }

    let mut steps = Vec::new();
    for tick in 1..=ticks {
        if !core.state().is_running {
            break;
        }
        core.tick();
        steps.push(SimulationStep {
            tick,
            snapshot: core.snapshot(),
            notification: core.consume_notification(),
        });
    }
    steps
}

// ============================================================================
// Tests
// ============================================================================
