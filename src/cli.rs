// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `termdag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "termdag",
    version,
    about = "Pack courses into ordered terms under prerequisite and credit constraints.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the catalog file (TOML).
    ///
    /// Default: `Curriculum.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Curriculum.toml")]
    pub catalog: String,

    /// Override the per-term credit cap from the catalog file.
    #[arg(long, value_name = "CREDITS")]
    pub cap: Option<u32>,

    /// Output format for the plan.
    #[arg(long, value_enum, value_name = "FORMAT", default_value = "json")]
    pub format: OutputFormat,

    /// How notes are encoded in JSON output.
    ///
    /// `structured` keeps kind/message/action as an object; `prefixed`
    /// flattens each note to a "ERROR: ..." style string (lossy).
    #[arg(long, value_enum, value_name = "ENCODING", default_value = "structured")]
    pub notes: NotesFormat,

    /// Write the plan to a file instead of stdout.
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Parse + validate, print the catalog, but don't plan anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TERMDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Plan output format as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The wire-contract JSON document.
    Json,
    /// A terse human-readable term listing.
    Summary,
}

/// Note encoding as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum NotesFormat {
    Structured,
    Prefixed,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
