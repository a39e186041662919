//! Debouncing of a rapidly changing input value.
//!
//! Every [`QueryDebouncer::observe`] restarts a quiet-period timer. Only when
//! the timer elapses without another observation does the settle callback
//! fire, exactly once, with the last observed value. Superseded values never
//! reach the callback, and dropping the debouncer cancels any pending timer.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

/// Quiet period used when none is configured.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

type SettleCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Delays dispatch of a changing value until it has been stable for `delay`.
///
/// Timers run on the ambient tokio runtime; `observe` must be called from
/// within one.
pub struct QueryDebouncer {
    delay: Duration,
    on_settle: Option<SettleCallback>,
    pending: Option<JoinHandle<()>>,
}

impl QueryDebouncer {
    /// Create a debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            on_settle: None,
            pending: None,
        }
    }

    /// Quiet period before a value settles.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register the callback invoked with each settled value.
    ///
    /// Replaces any previous callback. Timers already running keep the
    /// callback they were started with.
    pub fn on_settle<F>(&mut self, callback: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.on_settle = Some(Arc::new(callback));
    }

    /// Record a new value and restart the quiet period.
    pub fn observe(&mut self, text: impl Into<String>) {
        self.cancel();

        let Some(callback) = self.on_settle.clone() else {
            trace!("no settle callback registered, ignoring observation");
            return;
        };

        let text = text.into();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            trace!(text = %text, "query settled");
            callback(text);
        }));
    }

    /// Discard the pending timer, if any, without firing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a timer is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for QueryDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    fn recording_debouncer(
        delay_ms: u64,
    ) -> (QueryDebouncer, mpsc::UnboundedReceiver<(Instant, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(Duration::from_millis(delay_ms));
        debouncer.on_settle(move |text| {
            let _ = tx.send((Instant::now(), text));
        });
        (debouncer, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_settles_once_with_last_value_before_gap() {
        let (mut debouncer, mut settled) = recording_debouncer(300);
        let start = Instant::now();

        debouncer.observe("L"); // t=0
        sleep(Duration::from_millis(100)).await;
        debouncer.observe("Lo"); // t=100
        sleep(Duration::from_millis(50)).await;
        debouncer.observe("Lon"); // t=150
        sleep(Duration::from_millis(350)).await;

        // t=500: exactly one settle so far, at t=450, for "Lon"
        let (at, value) = settled.try_recv().expect("one settle before t=500");
        assert_eq!(value, "Lon");
        let elapsed = at.duration_since(start);
        assert!(
            elapsed >= Duration::from_millis(450) && elapsed < Duration::from_millis(460),
            "settled at {elapsed:?}"
        );
        assert!(settled.try_recv().is_err());

        debouncer.observe("Lond"); // t=500
        sleep(Duration::from_millis(250)).await;
        assert!(settled.try_recv().is_err(), "t=750 is still inside the quiet period");

        sleep(Duration::from_millis(60)).await; // t=810
        let (at, value) = settled.try_recv().expect("second settle at t=800");
        assert_eq!(value, "Lond");
        let elapsed = at.duration_since(start);
        assert!(
            elapsed >= Duration::from_millis(800) && elapsed < Duration::from_millis(810),
            "settled at {elapsed:?}"
        );
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_timer() {
        let (mut debouncer, mut settled) = recording_debouncer(300);

        debouncer.observe("Paris");
        assert!(debouncer.is_pending());
        drop(debouncer);

        sleep(Duration::from_secs(1)).await;
        assert!(settled.recv().await.is_none(), "sender dropped without firing");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending_value() {
        let (mut debouncer, mut settled) = recording_debouncer(300);

        debouncer.observe("Rome");
        sleep(Duration::from_millis(200)).await;
        debouncer.cancel();
        assert!(!debouncer.is_pending());

        sleep(Duration::from_secs(1)).await;
        assert!(settled.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_observe_without_callback_is_noop() {
        let mut debouncer = QueryDebouncer::default();
        assert_eq!(debouncer.delay(), DEFAULT_DEBOUNCE);
        debouncer.observe("Oslo");
        assert!(!debouncer.is_pending());
    }
}
