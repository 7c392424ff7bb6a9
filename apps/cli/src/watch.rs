//! Watch mode: fetch, render and print on a fixed interval until stopped.
//!
//! Cancellation is cooperative. The token is checked before each fetch and
//! again before each sleep, and a sleep in progress wakes up early on
//! cancel. A frame that has started rendering is always written out.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::dashboard::{render_dashboard, DashboardOptions};
use crate::session::QuoteSession;

/// Shortest allowed refresh interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Clonable stop flag shared between the watch loop and a signal handler.
#[derive(Clone, Debug)]
pub struct StopToken {
    tx: Arc<watch::Sender<bool>>,
}

impl StopToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request a stop. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once `cancel` has been called, immediately if it already was.
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for StopToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancel `token` on the first Ctrl+C.
pub fn cancel_on_ctrl_c(token: StopToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupt received, stopping after the current frame");
                token.cancel();
            }
            Err(e) => warn!("Unable to listen for Ctrl+C: {}", e),
        }
    });
}

#[derive(Clone, Debug)]
pub struct WatchOptions {
    pub interval: Duration,
    /// Clear the terminal before each frame
    pub clear_screen: bool,
    pub dashboard: DashboardOptions,
}

/// Run the refresh loop until `stop` is cancelled. Returns the number of frames written.
pub async fn run_watch<W: Write>(
    session: &mut QuoteSession,
    options: &WatchOptions,
    stop: &StopToken,
    out: &mut W,
) -> std::io::Result<usize> {
    let interval = options.interval.max(MIN_INTERVAL);
    let mut frames = 0;

    info!(
        "Watching {} every {} ms",
        session.label(),
        interval.as_millis()
    );

    loop {
        if stop.is_cancelled() {
            break;
        }

        let outcome = session.refresh().await;
        let frame = render_dashboard(&session.label(), &outcome, session.stats(), &options.dashboard);

        if options.clear_screen {
            queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        }
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        frames += 1;

        if stop.is_cancelled() {
            break;
        }

        tokio::select! {
            _ = stop.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    debug!("Watch loop finished after {} frame(s)", frames);
    Ok(frames)
}
