//! Recurring one-second tick.
//!
//! The ticker is owned by whoever owns the timer engine. It spawns its
//! interval task lazily on the first `tick().await`, so it can be started
//! from synchronous code, and it aborts that task on `stop()` or drop. No
//! tick is ever delivered after `stop()` returns.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    active: bool,
    task: Option<(JoinHandle<()>, mpsc::Receiver<()>)>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            active: false,
            task: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
        if let Some((handle, _rx)) = self.task.take() {
            handle.abort();
        }
    }

    /// Wait for the next tick. Returns `false` immediately when stopped.
    pub async fn tick(&mut self) -> bool {
        if !self.active {
            return false;
        }
        let period = self.period;
        let (_, rx) = self.task.get_or_insert_with(|| spawn_interval(period));
        rx.recv().await.is_some()
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_interval(period: Duration) -> (JoinHandle<()>, mpsc::Receiver<()>) {
    // Capacity 1: a consumer that falls behind sees one tick, not a burst.
    let (tx, rx) = mpsc::channel(1);
    let handle = tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if tx.send(()).await.is_err() {
                break;
            }
        }
    });
    (handle, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut ticker = Ticker::default();
        ticker.start();
        let begin = Instant::now();
        assert!(ticker.tick().await);
        assert!(ticker.tick().await);
        assert_eq!(begin.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_ticker_yields_nothing() {
        let mut ticker = Ticker::default();
        assert!(!ticker.tick().await);

        ticker.start();
        assert!(ticker.tick().await);
        ticker.stop();
        assert!(!ticker.is_active());
        assert!(!ticker.tick().await);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_after_stop() {
        let mut ticker = Ticker::default();
        ticker.start();
        ticker.tick().await;
        ticker.stop();
        ticker.start();
        let begin = Instant::now();
        assert!(ticker.tick().await);
        assert_eq!(begin.elapsed(), Duration::from_secs(1));
    }
}
