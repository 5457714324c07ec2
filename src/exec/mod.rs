// src/exec/mod.rs

//! Process execution layer.
//!
//! Build callbacks use [`CommandSpec`] to run external programs: a
//! structured program + argument list, executed through
//! `tokio::process::Command` with the caller's standard streams attached.
//! The first error encountered (spawn failure, stdin write failure, or
//! non-zero exit) is reported; there are no retries.

pub mod command;

pub use command::CommandSpec;
