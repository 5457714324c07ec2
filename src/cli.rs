// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `livebuild`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "livebuild",
    version,
    about = "Rebuild a project whenever its source files change.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `LIVEBUILD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Watch a directory tree and rebuild on every source change.
    Live {
        /// Root directory to watch.
        ///
        /// Defaults to the config file's `watch.dir`, or `.`.
        #[arg(long, value_name = "PATH")]
        dir: Option<String>,

        /// File extension to track, without the leading dot (repeatable).
        ///
        /// Overrides the config file's `watch.extensions`.
        #[arg(long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Poll interval in milliseconds.
        ///
        /// Overrides the config file's `watch.poll_ms`.
        #[arg(long, value_name = "MS")]
        poll_ms: Option<u64>,

        /// Path to the config file (TOML).
        ///
        /// Default: `Livebuild.toml` in the current working directory, when
        /// present.
        #[arg(long, value_name = "PATH")]
        config: Option<String>,
    },
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
