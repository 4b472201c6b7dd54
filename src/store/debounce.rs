//! Trailing-edge debounce over a channel pair.
//!
//! The forwarding task restarts its timer on every arrival, so only the
//! final settled value of a burst is ever emitted. Intermediate values are
//! dropped, not queued. Closing the input side cancels a pending emission,
//! which is what makes teardown quiet: nothing fires after the sender is
//! gone.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

/// Create a debounced channel with the given settle delay.
///
/// Values sent on the returned sender reappear on the receiver only after
/// the input has been quiet for `delay`.
pub fn debounce_channel<T: Send + 'static>(
    delay: Duration,
) -> (mpsc::UnboundedSender<T>, mpsc::UnboundedReceiver<T>) {
    let (in_tx, mut in_rx) = mpsc::unbounded_channel();
    let (out_tx, out_rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Some(mut latest) = in_rx.recv().await {
            // Hold the value until the input stays quiet for one full
            // delay window; each new arrival restarts the window.
            loop {
                tokio::select! {
                    next = in_rx.recv() => match next {
                        Some(value) => latest = value,
                        // Input closed mid-window: the pending value is
                        // cancelled, not flushed.
                        None => return,
                    },
                    _ = sleep(delay) => break,
                }
            }
            if out_tx.send(latest).is_err() {
                // Consumer is gone; stop forwarding.
                return;
            }
        }
    });

    (in_tx, out_rx)
}

// ===== Tests =====

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
