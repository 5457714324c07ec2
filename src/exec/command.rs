// src/exec/command.rs

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{LivebuildError, Result};

/// A structured command descriptor: program plus argument list.
///
/// Callers supply the program and its arguments separately; no shell is
/// involved and no string tokenization happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the command with the caller's stdin/stdout/stderr attached and
    /// wait for completion. A non-zero exit status is an error carrying the
    /// exit code.
    pub async fn run(&self) -> Result<()> {
        info!(program = %self.program, args = ?self.args, "running command");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LivebuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let status = child.wait().await?;
        self.check_status(status)
    }

    /// Run the command with `input` written to its stdin after start; stdout
    /// and stderr stay attached to the caller's streams.
    pub async fn run_with_input(&self, input: &str) -> Result<()> {
        info!(program = %self.program, args = ?self.args, "running command with piped stdin");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LivebuildError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Write the input and drop the pipe so the child sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(input.as_bytes())
                .await
                .map_err(|source| LivebuildError::Stdin {
                    program: self.program.clone(),
                    source,
                })?;
        }

        let status = child.wait().await?;
        self.check_status(status)
    }

    fn check_status(&self, status: std::process::ExitStatus) -> Result<()> {
        if status.success() {
            debug!(program = %self.program, "command succeeded");
            return Ok(());
        }
        Err(LivebuildError::Exit {
            program: self.program.clone(),
            code: status.code().unwrap_or(-1),
        })
    }
}
