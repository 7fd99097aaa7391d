//! Command-line interface for par-term-typeset.
//!
//! This module handles CLI argument parsing and the small config subcommands.
//! The `layout` command itself is implemented in the [`layout`] submodule.

pub mod layout;

use clap::{Parser, Subcommand};
use par_term_config::Config;
use std::path::PathBuf;

pub use layout::{LayoutOptions, OutputFormat, run_layout};

/// par-term-typeset - Lay out terminal grid rows as positioned glyph runs
#[derive(Parser)]
#[command(name = "par-term-typeset")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out one row of text and print the drawable runs
    Layout {
        /// Text of the row; double-width clusters get continuation cells
        text: String,

        /// Absolute grid column of the first cell
        #[arg(long, default_value_t = 0)]
        start_column: usize,

        /// Baseline y position in pixels
        #[arg(long, default_value_t = 0.0)]
        y: f32,

        /// Primary font family (overrides config)
        #[arg(long, value_name = "FAMILY")]
        font: Option<String>,

        /// Font size in pixels (overrides config)
        #[arg(long, value_name = "PX")]
        size: Option<f32>,

        /// Load the primary font from this file instead of the system fonts
        #[arg(long, value_name = "PATH")]
        font_file: Option<PathBuf>,

        /// Foreground color as RRGGBB hex
        #[arg(long, default_value = "ffffff", value_parser = parse_color)]
        color: u32,

        /// Pin every glyph to its cell (overrides config)
        #[arg(long)]
        no_ligatures: bool,

        /// Print runs as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default config file location
    ConfigPath,

    /// Write a config file with default values (keeps an existing file)
    InitConfig {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_color(value: &str) -> Result<u32, String> {
    let hex = value.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected RRGGBB, got {value:?}"));
    }
    u32::from_str_radix(hex, 16).map_err(|e| format!("invalid color {value:?}: {e}"))
}

/// The single stderr line reporting a failed command, with its context chain.
pub fn error_line(error: &anyhow::Error) -> String {
    format!("par-term-typeset: error: {error:#}")
}

/// Runtime options passed from CLI to the layout command
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Config file override
    pub config: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
    /// What to lay out
    pub layout: LayoutOptions,
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with the layout command
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle the config subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    match cli.command {
        Commands::ConfigPath => {
            let path = cli.config.unwrap_or_else(Config::config_path);
            println!("{}", path.display());
            CliResult::Exit(0)
        }
        Commands::InitConfig { force } => {
            let path = cli.config.unwrap_or_else(Config::config_path);
            if path.exists() && !force {
                eprintln!(
                    "par-term-typeset: {} already exists (use --force to overwrite)",
                    path.display()
                );
                return CliResult::Exit(1);
            }
            match Config::default().save_to(&path) {
                Ok(()) => {
                    println!("Wrote {}", path.display());
                    CliResult::Exit(0)
                }
                Err(e) => {
                    eprintln!("{}", error_line(&e));
                    CliResult::Exit(1)
                }
            }
        }
        Commands::Layout {
            text,
            start_column,
            y,
            font,
            size,
            font_file,
            color,
            no_ligatures,
            json,
        } => CliResult::Continue(RuntimeOptions {
            config: cli.config,
            log_level: cli.log_level.map(|l| l.to_level_filter()),
            layout: LayoutOptions {
                text,
                start_column,
                y,
                color,
                font_family: font,
                font_size: size,
                font_file,
                ligatures: if no_ligatures { Some(false) } else { None },
                format: if json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Text
                },
            },
        }),
    }
}
