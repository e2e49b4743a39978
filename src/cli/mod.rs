//! CLI module for the seconds counter.
//!
//! This module provides the presentation layer:
//! - `commands`: Command definitions using clap derive
//! - `keys`: Mapping of typed input to timer commands
//! - `session`: Interactive session loop and tick simulation
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod keys;
pub mod session;

pub use commands::{Cli, Commands, ConfigArgs, ModeArg, RunArgs, SimulateArgs};
pub use display::Display;
pub use keys::KeyCommand;
pub use session::{apply, run_interactive, simulate, spawn_stdin_reader, InputLines, SimulationStep};
