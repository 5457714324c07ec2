// src/lib.rs

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod watch;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::{CliArgs, CliCommand};
use crate::config::{ConfigFile, default_config_path, load_and_validate};
use crate::engine::{BuildStep, LiveBuildOptions, live_build, run_steps};
use crate::errors::Result;
use crate::exec::CommandSpec;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (optional `Livebuild.toml`)
/// - the live-build pipeline (scan, detectors, coordinator)
/// - Ctrl-C handling as the cancellation signal
pub async fn run(args: CliArgs) -> Result<()> {
    match args.command {
        CliCommand::Live {
            dir,
            extensions,
            poll_ms,
            config,
        } => run_live(dir, extensions, poll_ms, config.as_deref()).await,
    }
}

async fn run_live(
    cli_dir: Option<String>,
    cli_extensions: Vec<String>,
    cli_poll_ms: Option<u64>,
    config_path: Option<&str>,
) -> Result<()> {
    let cfg = load_config(config_path)?;

    // CLI flags override config-file values.
    let root = cli_dir.unwrap_or_else(|| cfg.watch.dir.clone());
    let extensions = if cli_extensions.is_empty() {
        cfg.watch.extensions.clone()
    } else {
        cli_extensions
    };
    let poll_ms = cli_poll_ms.unwrap_or(cfg.watch.poll_ms);

    let options = LiveBuildOptions {
        poll_interval: Duration::from_millis(poll_ms.max(1)),
        extensions,
    };

    // Ctrl-C → cancellation channel consumed by the coordinator.
    let (cancel_tx, cancel_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            eprintln!("failed to listen for Ctrl+C: {err}");
            return;
        }
        let _ = cancel_tx.send(()).await;
    });

    info!(steps = cfg.step.len(), "live command configured");

    let cfg = Arc::new(cfg);
    let builder = move || {
        let cfg = Arc::clone(&cfg);
        async move {
            println!("change detected, rebuilding ...");
            if cfg.step.is_empty() {
                return Ok(());
            }
            run_steps(config_steps(&cfg)).await
        }
    };

    live_build(Path::new(&root), options, builder, cancel_rx).await
}

/// Load the config: an explicit `--config` path must exist; the default
/// `Livebuild.toml` is used only when present.
fn load_config(path: Option<&str>) -> Result<ConfigFile> {
    match path {
        Some(path) => load_and_validate(path),
        None => {
            let default = default_config_path();
            if default.exists() {
                load_and_validate(&default)
            } else {
                Ok(ConfigFile::default())
            }
        }
    }
}

/// Turn `[[step]]` config entries into runnable build steps.
fn config_steps(cfg: &ConfigFile) -> Vec<BuildStep> {
    cfg.step
        .iter()
        .map(|step| {
            let spec = CommandSpec::new(step.program.as_str()).args(step.args.clone());
            match &step.stdin {
                Some(input) => {
                    BuildStep::command_with_input(step.name.as_str(), spec, input.clone())
                }
                None => BuildStep::command(step.name.as_str(), spec),
            }
        })
        .collect()
}
