use std::{future::Future, process, time::Duration};

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

const EXIT_CODE_ON_SECOND_INTERRUPT: i32 = 130;

/// How a pause ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Wakeup {
    Elapsed,
    Cancelled,
}

/// Cancellable delays. Once shut down, every pending and future pause ends immediately.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    shutdown: CancellationToken,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shuts the scheduler down on the first Ctrl-C. A second Ctrl-C terminates the process right
    /// away.
    pub fn cancel_on_ctrl_c(&self) {
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Couldn't listen for Ctrl-C: {e}");
                return;
            }
            info!("Received Ctrl-C, shutting down. Press Ctrl-C again to exit immediately");
            shutdown.cancel();

            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Received second Ctrl-C, exiting");
                process::exit(EXIT_CODE_ON_SECOND_INTERRUPT);
            }
        });
    }

    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Drives `operation` to completion, unless the scheduler shuts down first. An operation that
    /// is ready is not abandoned even after a shutdown.
    pub async fn unless_shut_down<F: Future>(&self, operation: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            output = operation => Some(output),
            _ = self.shutdown.cancelled() => None,
        }
    }

    pub async fn pause(&self, duration: Duration) -> Wakeup {
        tokio::select! {
            _ = self.shutdown.cancelled() => Wakeup::Cancelled,
            _ = tokio::time::sleep(duration) => Wakeup::Elapsed,
        }
    }
}
