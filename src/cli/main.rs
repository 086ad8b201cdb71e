//! Command-line interface entry point for `relgraph`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use relgraph::config::Config;
use relgraph::info;
use relgraph::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config logging.level; fallback warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| Level::from_name(&config.logging.level))
        .unwrap_or(Level::Warn);
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // CLI flag wins, otherwise config logging.file if set
    let config_log_path = (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file));
    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Render {
            input,
            output,
            format,
            open,
        } => commands::render::run(
            input.as_deref(),
            output.as_deref(),
            format.as_deref(),
            open,
            &config,
        )
        .map(|path| println!("✓ Graph drawn: {}", path.display())),
        Command::Inspect { input } => commands::inspect::run(input.as_deref(), &config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
