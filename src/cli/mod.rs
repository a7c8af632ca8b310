//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stockta")]
#[command(author, version, about = "Stock technical indicators with terminal charts")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", env = "STOCKTA_CONFIG")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plot price, moving averages, RSI and MACD
    Indicators(ChartArgs),
    /// Plot price inside Bollinger bands
    Bollinger(ChartArgs),
    /// Print the indicator values of the latest row
    Summary(SummaryArgs),
    /// Validate configuration
    ValidateConfig,
    /// Print the default configuration as TOML
    DefaultConfig,
}

impl Commands {
    /// Whether the command runs calculators and so needs the loaded settings.
    pub fn uses_settings(&self) -> bool {
        !matches!(self, Commands::ValidateConfig | Commands::DefaultConfig)
    }
}

#[derive(clap::Args)]
pub struct ChartArgs {
    /// Price data file (CSV with Date and Adj Close columns)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Save the chart as text instead of opening the viewer
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SummaryArgs {
    /// Price data file (CSV with Date and Adj Close columns)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
