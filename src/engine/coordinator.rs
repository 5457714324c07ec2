// src/engine/coordinator.rs

use std::future::Future;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::errors::{LivebuildError, Result};

/// Serializes builder invocations and owns pipeline teardown.
///
/// The coordinator consumes three channels:
/// - the cancellation channel supplied by the caller,
/// - the fatal-error channel written by change detectors,
/// - the trigger bus written by change detectors.
///
/// Whichever of cancellation / detector error / builder error is observed
/// first decides the outcome; in every case the stop signal is fanned out to
/// all detectors before returning.
pub struct Coordinator {
    cancel_rx: mpsc::Receiver<()>,
    error_rx: mpsc::Receiver<LivebuildError>,
    trigger_rx: mpsc::Receiver<()>,
    stop_tx: watch::Sender<bool>,
}

impl Coordinator {
    pub fn new(
        cancel_rx: mpsc::Receiver<()>,
        error_rx: mpsc::Receiver<LivebuildError>,
        trigger_rx: mpsc::Receiver<()>,
        stop_tx: watch::Sender<bool>,
    ) -> Self {
        Self {
            cancel_rx,
            error_rx,
            trigger_rx,
            stop_tx,
        }
    }

    /// Main loop: wait for cancellation, a detector error, or a trigger.
    ///
    /// The builder runs to completion before the next trigger is taken off
    /// the bus, so invocations never overlap; triggers arriving in the
    /// meantime stay queued on the bus (and in blocked detector sends). The
    /// first builder error terminates the loop and is returned unchanged.
    /// Clean cancellation returns `Ok(())`.
    pub async fn run<B, Fut>(mut self, mut builder: B) -> Result<()>
    where
        B: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        info!("build coordinator started");

        let outcome = loop {
            tokio::select! {
                cancelled = self.cancel_rx.recv() => {
                    // `None` means the cancel sender was dropped; a closed
                    // cancellation channel also stops the run.
                    if cancelled.is_none() {
                        debug!("cancellation channel closed");
                    }
                    info!("cancellation received, stopping");
                    break Ok(());
                }
                Some(err) = self.error_rx.recv() => {
                    warn!(error = %err, "detector reported a fatal error");
                    break Err(err);
                }
                Some(()) = self.trigger_rx.recv() => {
                    debug!("trigger received, invoking builder");
                    if let Err(err) = builder().await {
                        warn!(error = %err, "builder failed");
                        break Err(err);
                    }
                    debug!("builder finished");
                }
            }
        };

        // Fan the stop signal out to every detector regardless of which exit
        // condition fired.
        let _ = self.stop_tx.send(true);

        info!("build coordinator exiting");
        outcome
    }
}
