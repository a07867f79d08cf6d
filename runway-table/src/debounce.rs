//! Debounced input commits.
//!
//! Typed search and filter inputs are committed to the URL only after the
//! user stops typing for a while. A [`Debouncer`] restarts its timer on every
//! [`push`](Debouncer::push) and delivers only the last value on its channel.

use std::time::Duration;

use log::trace;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Delivers the last pushed value once no new value arrived for `delay`.
///
/// Must be used from within a Tokio runtime. Dropping the debouncer cancels
/// any pending commit.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use runway_table::debounce::Debouncer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (mut search, mut commits) = Debouncer::new(Duration::from_millis(10));
/// search.push("fa".to_string());
/// search.push("fall".to_string());
/// assert_eq!(commits.recv().await.as_deref(), Some("fall"));
/// # }
/// ```
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    pending: Option<CancellationToken>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Creates a debouncer and the receiver committed values arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            pending: None,
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, replacing whatever was waiting.
    pub fn push(&mut self, value: T) {
        self.cancel();

        let token = CancellationToken::new();
        let cancel = token.clone();
        let tx = self.tx.clone();
        let deadline = Instant::now() + self.delay;

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => {
                    trace!("Committing debounced input");
                    // The receiver may be gone; nothing is waiting then.
                    let _ = tx.send(value);
                }
            }
        });
        self.pending = Some(token);
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}
