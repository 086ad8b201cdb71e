//! CLI argument definitions for `relgraph`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use relgraph::config::ConfigOverrides;
use relgraph::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `input`, `width`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Draw the relation graph of a spreadsheet.
    ///
    /// Loads the first worksheet, lays the graph out without crossings and
    /// writes the drawing to a file.
    Render {
        /// Spreadsheet to read (xlsx, xls, ods or csv; defaults to config `input`)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file path (defaults to `<out_dir>/<input stem>_graph.<format>`)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format: svg, html or png (defaults to config `format`)
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Open the drawing with the system viewer once written
        #[arg(long)]
        open: bool,
    },
    /// Print the nodes, relations and graph partitions read from a spreadsheet.
    Inspect {
        /// Spreadsheet to read (defaults to config `input`)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "relgraph",
    about = "Draw relationship spreadsheets as planar graphs",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config default input spreadsheet
    #[arg(long = "config-input", value_name = "FILE")]
    pub config_input: Option<PathBuf>,

    /// Override config output directory
    #[arg(long = "config-out-dir", value_name = "DIR")]
    pub config_out_dir: Option<PathBuf>,

    /// Override config output directory (short form)
    #[arg(long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `--out-dir` takes precedence over `--config-out-dir` when both are given.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            input: self.config_input.as_ref().map(path_string),
            out_dir: self
                .out_dir
                .as_ref()
                .or(self.config_out_dir.as_ref())
                .map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(command: Command) -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_input: None,
            config_out_dir: None,
            out_dir: None,
            command,
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(Command::Config { subcommand: None }).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.input.is_none());
        assert!(overrides.out_dir.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let mut args = cli(Command::Inspect { input: None });
        args.config_level = Some(LogLevelArg::Debug);
        args.config_log_file = Some(PathBuf::from("/tmp/test.log"));
        args.config_verbose = Some(true);
        args.config_input = Some(PathBuf::from("sheet.csv"));
        args.out_dir = Some(PathBuf::from("/output"));

        let overrides = args.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.input, Some("sheet.csv".to_string()));
        assert_eq!(overrides.out_dir, Some("/output".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let mut args = cli(Command::Config { subcommand: None });
        args.config_out_dir = Some(PathBuf::from("/long/out"));
        args.out_dir = Some(PathBuf::from("/short/out"));
        assert_eq!(
            args.to_config_overrides().out_dir,
            Some("/short/out".to_string())
        );

        args.out_dir = None;
        assert_eq!(
            args.to_config_overrides().out_dir,
            Some("/long/out".to_string())
        );
    }

    #[test]
    fn test_render_arguments_parse() {
        let args = Cli::parse_from([
            "relgraph",
            "--debug",
            "render",
            "terms.xlsx",
            "-f",
            "png",
            "-o",
            "out/terms.png",
            "--open",
        ]);
        assert!(args.debug_flag);
        match args.command {
            Command::Render {
                input,
                output,
                format,
                open,
            } => {
                assert_eq!(input, Some(PathBuf::from("terms.xlsx")));
                assert_eq!(output, Some(PathBuf::from("out/terms.png")));
                assert_eq!(format.as_deref(), Some("png"));
                assert!(open);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
