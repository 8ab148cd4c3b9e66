// ABOUTME: Flush triggers that decide when the delivery queue drains its accumulation buffer
// ABOUTME: Provides a wall-clock interval trigger and a manually driven trigger for tests and drivers

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Source of flush ticks for the delivery queue
///
/// The flush loop awaits `tick` between cycles and stops for good once it
/// returns `false`.
pub trait FlushTrigger: Send + 'static {
    /// Wait for the next flush
    fn tick(&mut self) -> impl Future<Output = bool> + Send;
}

/// Fires every `period`, starting one period after creation
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct IntervalTrigger {
    interval: Interval,
}

impl IntervalTrigger {
    pub fn new(period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        // a slow tick pushes the schedule back instead of bursting
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl FlushTrigger for IntervalTrigger {
    async fn tick(&mut self) -> bool {
        self.interval.tick().await;
        true
    }
}

/// Fires whenever its [`FlushHandle`] asks for a flush
///
/// Stops once every handle has been dropped.
#[derive(Debug)]
pub struct ManualTrigger {
    receiver: mpsc::Receiver<()>,
}

/// Sender side of a [`ManualTrigger`]
#[derive(Debug, Clone)]
pub struct FlushHandle {
    sender: mpsc::Sender<()>,
}

/// Create a connected handle and trigger
pub fn manual() -> (FlushHandle, ManualTrigger) {
    let (sender, receiver) = mpsc::channel(1);
    (FlushHandle { sender }, ManualTrigger { receiver })
}

impl FlushHandle {
    /// Request one flush; returns false if the flush loop is gone
    pub async fn flush(&self) -> bool {
        self.sender.send(()).await.is_ok()
    }
}

impl FlushTrigger for ManualTrigger {
    async fn tick(&mut self) -> bool {
        self.receiver.recv().await.is_some()
    }
}
