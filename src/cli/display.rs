//! Display utilities for the seconds counter CLI.
//!
//! This module provides formatted output for:
//! - The status line (clock, mode, progress bar)
//! - Notifications
//! - Help and error messages

use anyhow::{Context, Result};

use crate::cli::keys::KeyCommand;
use crate::cli::session::SimulationStep;
use crate::types::{Notification, NotificationLevel, TimerMode, TimerSnapshot};

/// Width of the progress bar in characters.
const BAR_WIDTH: usize = 20;

/// Key labels shown on the help screen.
const HELP_KEYS: [(&str, KeyCommand); 9] = [
    ("Enter", KeyCommand::Toggle),
    ("r", KeyCommand::Reset),
    ("u", KeyCommand::StartUp),
    ("d [N]", KeyCommand::StartDown(None)),
    ("p", KeyCommand::Pause),
    ("m", KeyCommand::SwitchMode),
    ("t N", KeyCommand::SetUpTarget(0.0)),
    ("s N", KeyCommand::SetDownStart(0.0)),
    ("q", KeyCommand::Quit),
];

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the current status line.
    pub fn show_status(snapshot: &TimerSnapshot) {
        println!("{}", Self::status_line(snapshot));
    }

    /// Shows a notification once.
    pub fn show_notification(notification: &Notification) {
        let tag = match notification.level() {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "done",
        };
        println!("[{}] {}", tag, notification.message());
    }

    /// Shows one simulated tick, as text or JSON.
    pub fn show_step(step: &SimulationStep, json: bool) -> Result<()> {
        if json {
            let line = serde_json::to_string(step).context("failed to encode tick as JSON")?;
            println!("{}", line);
        } else {
            println!("#{:<4} {}", step.tick, Self::status_line(&step.snapshot));
            if let Some(notification) = &step.notification {
                Self::show_notification(notification);
            }
        }
        Ok(())
    }

    /// Shows the key bindings.
    pub fn show_help() {
        println!("Keys (type and press Enter):");
        for (key, command) in HELP_KEYS {
            println!("  {:<6} {}", key, command.description());
        }
    }

    /// Shows a hint for input that did not map to a command.
    pub fn show_unknown(input: &str) {
        println!("Unknown command '{}', type ? for help", input.trim());
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Renders the status line.
    pub fn status_line(snapshot: &TimerSnapshot) -> String {
        let state = if snapshot.is_running { "running" } else { "paused" };
        let (from, to) = match snapshot.mode {
            TimerMode::Up => ("0s".to_string(), format!("{}s target", snapshot.up_target)),
            TimerMode::Down => (format!("{}s", snapshot.down_start), "0s".to_string()),
        };

        format!(
            "{:<4} {}  {:<7}  {} {} {:>3}%  {}",
            snapshot.mode.as_str().to_uppercase(),
            Self::format_hms(snapshot.elapsed_seconds),
            state,
            from,
            Self::progress_bar(snapshot.progress_percent, BAR_WIDTH),
            snapshot.progress_percent.round() as u32,
            to,
        )
    }

    /// Formats seconds as `HH:MM:SS`; hours do not wrap.
    pub fn format_hms(total_seconds: u32) -> String {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    }

    /// Renders a bar of `width` cells filled to `percent`.
    pub fn progress_bar(percent: f64, width: usize) -> String {
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}

// ============================================================================
// Tests
// ============================================================================
