// src/errors.rs

//! Crate-wide error type and `Result` alias.
//!
//! Every failure here is unrecoverable for the current run: a scan error
//! aborts before anything starts, a detector or builder error tears the
//! whole watch down, and process failures surface to the builder that ran
//! the command. The top-level caller decides whether to exit or restart.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LivebuildError {
    #[error("reading directory {path:?}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("watched file {path:?} can no longer be read: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("build step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<LivebuildError>,
    },

    #[error("starting '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("writing to stdin of '{program}': {source}")]
    Stdin {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with code {code}")]
    Exit { program: String, code: i32 },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("stamp file error: {0}")]
    Stamp(String),

    #[error("invalid watch pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LivebuildError>;
