//! Keyboard input handling for the interactive session.
//!
//! Each line typed on stdin is mapped to one [`KeyCommand`]. An empty line
//! stands in for the space bar.

use std::fmt;

/// Commands a user can issue during an interactive session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyCommand {
    /// Start or pause (space / Enter)
    Toggle,
    /// Stop and rewind
    Reset,
    /// Count up from the current value
    StartUp,
    /// Count down, optionally from a new start value
    StartDown(Option<f64>),
    Pause,
    /// Flip between up and down without restarting
    SwitchMode,
    SetUpTarget(f64),
    SetDownStart(f64),
    Help,
    Quit,
}

impl fmt::Display for KeyCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCommand::Toggle => write!(f, "toggle"),
            KeyCommand::Reset => write!(f, "reset"),
            KeyCommand::StartUp => write!(f, "start-up"),
            KeyCommand::StartDown(_) => write!(f, "start-down"),
            KeyCommand::Pause => write!(f, "pause"),
            KeyCommand::SwitchMode => write!(f, "switch-mode"),
            KeyCommand::SetUpTarget(_) => write!(f, "set-up-target"),
            KeyCommand::SetDownStart(_) => write!(f, "set-down-start"),
            KeyCommand::Help => write!(f, "help"),
            KeyCommand::Quit => write!(f, "quit"),
        }
    }
}

impl KeyCommand {
    /// Parses one line of input.
    ///
    /// Numbers that do not parse are passed on as NaN so the timer rejects
    /// them like any other invalid value. Returns `None` for unknown input or
    /// a missing number.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let key = parts.next().unwrap_or("").to_lowercase();
        let number = parts.next().map(parse_number);

        if parts.next().is_some() {
            return None;
        }

        let command = match (key.as_str(), number) {
            ("" | "space", None) => KeyCommand::Toggle,
            ("r" | "reset", None) => KeyCommand::Reset,
            ("u" | "up", None) => KeyCommand::StartUp,
            ("d" | "down", initial) => KeyCommand::StartDown(initial),
            ("p" | "pause", None) => KeyCommand::Pause,
            ("m" | "mode", None) => KeyCommand::SwitchMode,
            ("t" | "target", Some(value)) => KeyCommand::SetUpTarget(value),
            ("s" | "start", Some(value)) => KeyCommand::SetDownStart(value),
            ("?" | "h" | "help", None) => KeyCommand::Help,
            ("q" | "quit", None) => KeyCommand::Quit,
            _ => return None,
        };
        Some(command)
    }

    /// Returns a short description for the help screen.
    pub fn description(&self) -> &'static str {
        match self {
            KeyCommand::Toggle => "start / pause",
            KeyCommand::Reset => "reset",
            KeyCommand::StartUp => "count up",
            KeyCommand::StartDown(_) => "count down [from N]",
            KeyCommand::Pause => "pause",
            KeyCommand::SwitchMode => "switch mode",
            KeyCommand::SetUpTarget(_) => "set up target to N",
            KeyCommand::SetDownStart(_) => "set down start to N",
            KeyCommand::Help => "show this help",
            KeyCommand::Quit => "quit",
        }
    }
}

fn parse_number(raw: &str) -> f64 {
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

// ============================================================================
// Tests
// ============================================================================
