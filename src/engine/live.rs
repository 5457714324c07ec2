// src/engine/live.rs

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use crate::engine::coordinator::Coordinator;
use crate::errors::Result;
use crate::watch::detector::spawn_detectors;
use crate::watch::scan::{SourceFilter, scan_source_files};

/// Options for a live-build run.
#[derive(Debug, Clone)]
pub struct LiveBuildOptions {
    /// How often each tracked file is re-stat'ed.
    pub poll_interval: Duration,

    /// File extensions to track, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for LiveBuildOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            extensions: vec!["rs".to_string()],
        }
    }
}

/// Watch `root` and invoke `builder` on every observed source change until
/// `cancel_rx` fires (or closes) or the first error occurs.
///
/// An enumeration failure aborts before anything is started. On every
/// return path the stop signal has been fanned out and every detector task
/// has been awaited, so nothing keeps running after this function returns,
/// and all channels created here are dropped with it.
pub async fn live_build<B, Fut>(
    root: impl AsRef<Path>,
    options: LiveBuildOptions,
    builder: B,
    cancel_rx: mpsc::Receiver<()>,
) -> Result<()>
where
    B: FnMut() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let root = root.as_ref();

    let filter = SourceFilter::from_extensions(&options.extensions)?;
    let snapshots = scan_source_files(root, &filter)?;

    info!(
        root = ?root,
        files = snapshots.len(),
        poll_ms = options.poll_interval.as_millis() as u64,
        "starting live build"
    );

    // Capacity 1 keeps the bus effectively unbuffered: a detector that fires
    // while the builder is busy blocks on send until the coordinator is free
    // again, so triggers backpressure instead of being dropped.
    let (trigger_tx, trigger_rx) = mpsc::channel::<()>(1);
    let (error_tx, error_rx) = mpsc::channel(1);
    let (stop_tx, stop_rx) = watch::channel(false);

    let handles = spawn_detectors(
        snapshots,
        options.poll_interval,
        trigger_tx,
        error_tx,
        stop_rx,
    );

    let coordinator = Coordinator::new(cancel_rx, error_rx, trigger_rx, stop_tx);
    let outcome = coordinator.run(builder).await;

    for handle in handles {
        let _ = handle.await;
    }
    debug!("all detectors stopped");

    outcome
}
