//! Shutdown coordination for the shim.

use std::future::Future;

use tokio::sync::watch;

/// One-shot shutdown latch.
///
/// Once triggered it stays triggered, so a future taken after the trigger
/// resolves immediately.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A future that resolves once [`Shutdown::trigger`] has been called.
    pub fn notified(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trigger_reaches_every_waiter() {
        let shutdown = Shutdown::new();
        let a = tokio::spawn(shutdown.notified());
        let b = tokio::spawn(shutdown.notified());

        shutdown.trigger();
        a.await.unwrap();
        b.await.unwrap();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn late_waiter_sees_earlier_trigger() {
        let shutdown = Shutdown::default();
        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), shutdown.notified())
            .await
            .expect("already-triggered shutdown resolves immediately");
    }

    #[tokio::test]
    async fn untriggered_waiter_stays_pending() {
        let shutdown = Shutdown::new();
        let waited = tokio::time::timeout(Duration::from_millis(50), shutdown.notified()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_triggered());
    }
}
