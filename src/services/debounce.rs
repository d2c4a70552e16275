use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Trailing-edge debounce timer
///
/// Every [`push`](Debouncer::push) cancels the pending timer and starts a new
/// one. When a timer runs out its value is sent downstream, so a burst of
/// pushes yields exactly one emission carrying the last value.
///
/// Must be used from within a Tokio runtime.
pub struct Debouncer<T> {
    quiet: Duration,
    output: mpsc::UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(quiet: Duration, output: mpsc::UnboundedSender<T>) -> Self {
        Self {
            quiet,
            output,
            pending: None,
        }
    }

    /// Debouncer together with the receiving end of its output
    pub fn channel(quiet: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(quiet, tx), rx)
    }

    /// Restart the quiet interval with `value` as the one to emit
    pub fn push(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let output = self.output.clone();
        let quiet = self.quiet;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(quiet) => {
                    if output.send(value).is_err() {
                        tracing::debug!("Debounced value dropped, receiver gone");
                    }
                }
            }
        });

        self.pending = Some(token);
    }

    /// Drop the pending value, if any, without emitting it
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }

    pub fn quiet(&self) -> Duration {
        self.quiet
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
