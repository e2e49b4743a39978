//! Command definitions for the seconds counter CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::types::{CounterConfig, TimerMode};

// ============================================================================
// CLI Structure
// ============================================================================

/// Seconds Counter - stopwatch and countdown in the terminal
#[derive(Parser, Debug)]
#[command(
    name = "seconds-counter",
    version,
    about = "Stopwatch and countdown timer with target notifications",
    long_about = "Counts seconds up towards a target or down to zero.\n\
                  Interactive keys: Enter/space toggles, r resets, q quits.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the counter interactively
    Run(RunArgs),

    /// Start the counter and apply a fixed number of ticks instantly
    Simulate(SimulateArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Counting direction as accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Count up towards the target
    Up,
    /// Count down to zero
    Down,
}

impl From<ModeArg> for TimerMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Up => TimerMode::Up,
            ModeArg::Down => TimerMode::Down,
        }
    }
}

// ============================================================================
// Shared Configuration Arguments
// ============================================================================

/// Counter configuration flags; these override the config file
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Initial counting mode
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Seconds at which the up counter notifies
    #[arg(short = 't', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub up_target: Option<u32>,

    /// Seconds the countdown starts from
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub down_start: Option<u32>,

    /// JSON file with `mode`, `upTarget` and `downStart`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Builds the effective configuration: defaults, then file, then flags.
    pub fn resolve(&self) -> Result<CounterConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => CounterConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(up_target) = self.up_target {
            config.up_target = up_target;
        }
        if let Some(down_start) = self.down_start {
            config.down_start = down_start;
        }

        config.validate().context("invalid counter configuration")?;
        tracing::debug!(?config, "resolved configuration");
        Ok(config)
    }
}

/// Reads a counter configuration from a JSON file.
pub fn load_config_file(path: &Path) -> Result<CounterConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

// ============================================================================
// Run / Simulate Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Start counting immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Tick period in milliseconds
    #[arg(long, hide = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: Option<u64>,
}

/// Arguments for the simulate command
#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Number of ticks to apply
    #[arg(short = 'n', long, default_value = "10")]
    pub ticks: u32,

    /// Print one JSON object per tick
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Tests
// ============================================================================
