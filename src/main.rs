//! Seconds Counter CLI - stopwatch and countdown in the terminal
//!
//! Counts seconds up towards a target, or down to zero, and tells you
//! when it gets there.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::time::Duration;

use seconds_counter::cli::{self, Cli, Commands, Display, RunArgs, SimulateArgs};
use seconds_counter::{TimerCore, TICK_PERIOD};

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run(args).await?,
        Some(Commands::Simulate(args)) => simulate(args)?,
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Runs the interactive counter on stdin.
async fn run(args: RunArgs) -> Result<()> {
    let config = args.config.resolve()?;
    let period = args.tick_ms.map(Duration::from_millis).unwrap_or(TICK_PERIOD);
    let (mut core, ticks) = TimerCore::with_interval(config, period);

    if args.autostart {
        core.resume();
    }

    Display::show_help();
    let input = cli::spawn_stdin_reader();
    let last = cli::run_interactive(core, ticks, input).await?;
    tracing::debug!(?last, "session ended");
    Ok(())
}

/// Prints the states produced by a burst of ticks.
fn simulate(args: SimulateArgs) -> Result<()> {
    let config = args.config.resolve()?;
    for step in cli::simulate(config, args.ticks) {
        Display::show_step(&step, args.json)?;
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["seconds-counter"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["seconds-counter", "run"]);
        assert!(matches!(cli.command, Some(Commands::Run(_))));
    }

    #[test]
    fn test_cli_parse_simulate_with_options() {
        let cli = Cli::parse_from([
            "seconds-counter",
            "simulate",
            "--mode",
            "down",
            "--down-start",
            "5",
            "--ticks",
            "5",
        ]);
        match cli.command {
            Some(Commands::Simulate(args)) => {
                assert_eq!(args.ticks, 5);
                assert_eq!(args.config.down_start, Some(5));
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["seconds-counter", "--verbose", "run"]);
        assert!(cli.verbose);
    }
}
