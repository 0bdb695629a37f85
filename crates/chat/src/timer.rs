//! Offer timer task: drives one `OfferCountdown` per offered product on a
//! one-second tick and reports expiry exactly once. Timers are independent;
//! dropping the handle tears the countdown down with the owning view.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use shopmate_core::domain::product::ProductId;
use shopmate_core::offers::{CountdownTick, OfferCountdown};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OfferExpired {
    pub product_id: ProductId,
}

pub struct OfferTimerHandle {
    product_id: ProductId,
    remaining: watch::Receiver<u32>,
    task: JoinHandle<()>,
}

impl OfferTimerHandle {
    /// Spawn a countdown for one offered product. Expiry is delivered on
    /// `notify`; the live remaining-seconds value is observable through the
    /// handle for display.
    pub fn spawn(
        product_id: ProductId,
        expires_in_minutes: u32,
        notify: mpsc::UnboundedSender<OfferExpired>,
    ) -> Self {
        let mut countdown = OfferCountdown::start(expires_in_minutes);
        let (remaining_tx, remaining_rx) = watch::channel(countdown.remaining_secs());
        let task_product_id = product_id.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
            // The first tick of a tokio interval fires immediately; consume
            // it so the countdown starts a full second later.
            interval.tick().await;
            loop {
                interval.tick().await;
                match countdown.tick() {
                    CountdownTick::Running { remaining_secs } => {
                        let _ = remaining_tx.send(remaining_secs);
                    }
                    CountdownTick::JustExpired => {
                        let _ = remaining_tx.send(0);
                        debug!(product_id = %task_product_id.0, "offer expired");
                        let _ = notify.send(OfferExpired { product_id: task_product_id });
                        return;
                    }
                    CountdownTick::Inert => return,
                }
            }
        });

        Self { product_id, remaining: remaining_rx, task }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn remaining_secs(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for OfferTimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc;

    use shopmate_core::domain::product::ProductId;

    use super::{OfferExpired, OfferTimerHandle};

    /// Let the spawned timer task drain every tick queued by `advance`.
    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn two_minute_offer_expires_after_120_virtual_seconds() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = OfferTimerHandle::spawn(ProductId("p-1".to_owned()), 2, tx);

        // Let the spawned task reach its first `interval.tick()` await so the
        // countdown is anchored at t=0 before we jump the paused clock.
        settle().await;

        tokio::time::advance(Duration::from_secs(119)).await;
        settle().await;
        assert!(rx.try_recv().is_err(), "must not expire early");

        tokio::time::advance(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(
            rx.try_recv().ok(),
            Some(OfferExpired { product_id: ProductId("p-1".to_owned()) })
        );

        // Exactly once: the task ends and nothing else arrives.
        tokio::time::advance(Duration::from_secs(60)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn timers_run_independently() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _short = OfferTimerHandle::spawn(ProductId("p-short".to_owned()), 1, tx.clone());
        let long = OfferTimerHandle::spawn(ProductId("p-long".to_owned()), 2, tx);

        // Anchor both countdowns at t=0 before advancing the paused clock.
        settle().await;

        tokio::time::advance(Duration::from_secs(61)).await;
        settle().await;
        let expired = rx.try_recv().expect("short timer fired");
        assert_eq!(expired.product_id.0, "p-short");
        assert!(!long.is_finished());
        assert!(long.remaining_secs() > 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_cancels_the_countdown() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timer = OfferTimerHandle::spawn(ProductId("p-1".to_owned()), 1, tx);
        drop(timer);

        tokio::time::advance(Duration::from_secs(120)).await;
        settle().await;
        assert!(rx.try_recv().is_err());
    }
}
