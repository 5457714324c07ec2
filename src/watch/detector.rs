// src/watch/detector.rs

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace, warn};

use crate::errors::LivebuildError;
use crate::watch::scan::FileSnapshot;

/// Spawn one change detector per snapshot.
///
/// Each detector owns its snapshot and a clone of the stop receiver, so the
/// coordinator can deterministically stop every detector on teardown. The
/// passed-in senders are consumed here; once every detector has exited the
/// trigger and error channels close.
pub fn spawn_detectors(
    snapshots: Vec<FileSnapshot>,
    poll_interval: Duration,
    trigger_tx: mpsc::Sender<()>,
    error_tx: mpsc::Sender<LivebuildError>,
    stop_rx: watch::Receiver<bool>,
) -> Vec<JoinHandle<()>> {
    snapshots
        .into_iter()
        .map(|snapshot| {
            tokio::spawn(detect_changes(
                snapshot,
                poll_interval,
                trigger_tx.clone(),
                error_tx.clone(),
                stop_rx.clone(),
            ))
        })
        .collect()
}

/// Poll one file's modification time until stopped.
///
/// On every tick the file is re-stat'ed. A changed timestamp emits exactly
/// one trigger onto the bus, then the baseline is rebased, so a file that
/// stays static never re-triggers. A stat failure is fatal for the whole
/// run: the error is reported on the error channel and the detector stops.
async fn detect_changes(
    mut snapshot: FileSnapshot,
    poll_interval: Duration,
    trigger_tx: mpsc::Sender<()>,
    error_tx: mpsc::Sender<LivebuildError>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = stop_rx.changed() => {
                debug!(path = ?snapshot.path, "detector stopped");
                return;
            }
            _ = ticker.tick() => {}
        }

        let stat = tokio::fs::metadata(&snapshot.path)
            .await
            .and_then(|meta| meta.modified());
        let modified = match stat {
            Ok(modified) => modified,
            Err(source) => {
                warn!(path = ?snapshot.path, error = %source, "watched file is no longer readable");
                let _ = error_tx
                    .send(LivebuildError::Watch {
                        path: snapshot.path.clone(),
                        source,
                    })
                    .await;
                return;
            }
        };

        if modified == snapshot.last_modified {
            trace!(path = ?snapshot.path, "no change");
            continue;
        }

        debug!(path = ?snapshot.path, "modification time changed, emitting trigger");

        // The trigger bus has capacity 1: while the coordinator is busy
        // building, this send blocks until it is free again. The stop signal
        // still has to win during that wait, otherwise teardown would hang on
        // a bus nobody is draining.
        tokio::select! {
            _ = stop_rx.changed() => {
                debug!(path = ?snapshot.path, "detector stopped while emitting");
                return;
            }
            sent = trigger_tx.send(()) => {
                if sent.is_err() {
                    // Coordinator is gone; nothing left to notify.
                    return;
                }
                snapshot.last_modified = modified;
            }
        }
    }
}
