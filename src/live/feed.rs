use std::{sync::Arc, time::Duration};

use chrono::{DateTime, FixedOffset, Local};
use rand::{rngs::StdRng, Rng};
use serde::{Deserialize, Serialize};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use validator::Validate;

use super::window::{SampleWindow, DEFAULT_WINDOW_CAPACITY};
use crate::{
    analytics::{self, BillingSettings, DerivedMetrics, Trend},
    domain::Sample,
    simulation::SeriesGenerator,
};

/// Shortest period [`LiveFeed::spawn`] will tick at
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FeedConfig {
    /// Seconds between appended samples
    #[validate(range(min = 1))]
    pub tick_seconds: u64,
    #[validate(range(min = 1))]
    pub window_capacity: usize,
    /// Samples generated when the feed starts
    pub initial_samples: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 3,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            initial_samples: 48,
        }
    }
}

/// Everything a view needs to render one frame.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<FixedOffset>,
    pub series: Arc<[Sample]>,
    pub latest: Option<Sample>,
    pub metrics: DerivedMetrics,
}

/// Owns the generator and the sample window; produces a fresh snapshot per tick.
pub struct LiveFeed<R = StdRng> {
    generator: SeriesGenerator<R>,
    window: SampleWindow,
    billing: BillingSettings,
}

impl<R: Rng> LiveFeed<R> {
    pub fn new(generator: SeriesGenerator<R>, billing: BillingSettings, capacity: usize) -> Self {
        Self {
            generator,
            window: SampleWindow::new(capacity),
            billing,
        }
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    /// Replace the window with `count` slots ending at `now`.
    pub fn seed(&mut self, count: usize, now: DateTime<FixedOffset>) -> Arc<DashboardSnapshot> {
        let series = self.generator.generate_until(count, now);
        self.window = SampleWindow::from_samples(series, self.window.capacity());
        self.current(now)
    }

    /// Snapshot of the window as it stands, trend taken from its last sample.
    pub fn current(&self, now: DateTime<FixedOffset>) -> Arc<DashboardSnapshot> {
        let metrics = DerivedMetrics::compute(self.window.as_slice(), now, &self.billing);
        self.publish(metrics, now)
    }

    /// Generate one sample at `now`, classify it against the samples already
    /// held, then append it.
    pub fn tick(&mut self, now: DateTime<FixedOffset>) -> Arc<DashboardSnapshot> {
        let sample = self.generator.sample_at(now);
        let trend: Trend = analytics::trend(sample.usage_kw, self.window.as_slice());
        let current_usage = sample.usage_kw;
        self.window.push(sample);

        let metrics =
            DerivedMetrics::with_trend(self.window.as_slice(), current_usage, trend, now, &self.billing);
        self.publish(metrics, now)
    }

    fn publish(&self, metrics: DerivedMetrics, now: DateTime<FixedOffset>) -> Arc<DashboardSnapshot> {
        Arc::new(DashboardSnapshot {
            generated_at: now,
            series: self.window.snapshot(),
            latest: self.window.latest().cloned(),
            metrics,
        })
    }
}

impl<R: Rng + Send + 'static> LiveFeed<R> {
    /// Run [`LiveFeed::tick`] every `period` on the tokio runtime.
    ///
    /// The first tick fires one period after the call. The task stops when the
    /// returned handle is stopped or dropped. Periods below one millisecond are
    /// raised to one millisecond.
    pub fn spawn(mut self, period: Duration) -> FeedHandle {
        let period = period.max(MIN_TICK_PERIOD);
        let (tx, rx) = watch::channel(self.current(Local::now().fixed_offset()));
        let token = CancellationToken::new();
        let cancelled = token.child_token();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            info!(period_ms = period.as_millis() as u64, "live feed started");

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {
                        let snapshot = self.tick(Local::now().fixed_offset());
                        debug!(
                            usage_kw = snapshot.metrics.current_usage,
                            trend = %snapshot.metrics.trend,
                            daily_total_kwh = snapshot.metrics.daily_total,
                            window_len = snapshot.series.len(),
                            "feed tick"
                        );
                        tx.send_replace(snapshot);
                    }
                }
            }

            info!("live feed stopped");
        });

        FeedHandle {
            token,
            receiver: rx,
            task: Some(task),
        }
    }
}

/// Lifecycle owner of a running feed. Dropping it cancels the task.
pub struct FeedHandle {
    token: CancellationToken,
    receiver: watch::Receiver<Arc<DashboardSnapshot>>,
    task: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn subscribe(&self) -> watch::Receiver<Arc<DashboardSnapshot>> {
        self.receiver.clone()
    }

    pub fn current(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.receiver.borrow())
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the task and wait for it to exit.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "live feed task ended abnormally");
            }
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::TimeOfUseTariff, simulation::GeneratorConfig};
    use chrono::TimeZone;

    fn feed(seed: u64) -> LiveFeed {
        let generator = SeriesGenerator::from_config(
            GeneratorConfig {
                random_seed: Some(seed),
                ..Default::default()
            },
            TimeOfUseTariff::default(),
        );
        LiveFeed::new(generator, BillingSettings::default(), 100)
    }

    fn noon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_then_tick() {
        let mut feed = feed(42);
        let seeded = feed.seed(48, noon());
        assert_eq!(seeded.series.len(), 48);
        assert_eq!(seeded.latest.as_ref().unwrap().timestamp, noon());

        let now = noon() + chrono::Duration::seconds(3);
        let ticked = feed.tick(now);
        assert_eq!(ticked.series.len(), 49);
        assert_eq!(ticked.latest.as_ref().unwrap().timestamp, now);
        assert_eq!(ticked.metrics.current_usage, ticked.latest.as_ref().unwrap().usage_kw);
        // Earlier snapshot is unaffected by the append
        assert_eq!(seeded.series.len(), 48);
    }

    #[test]
    fn test_tick_trend_uses_window_before_append() {
        let mut feed = feed(7);
        feed.seed(10, noon());
        let expected = analytics::trend(0.0, feed.window().as_slice());
        assert_eq!(expected, Trend::Down);

        let snapshot = feed.tick(noon() + chrono::Duration::seconds(3));
        let before = &snapshot.series[..snapshot.series.len() - 1];
        assert_eq!(
            snapshot.metrics.trend,
            analytics::trend(snapshot.metrics.current_usage, before)
        );
    }

    #[test]
    fn test_window_is_bounded() {
        let mut feed = feed(1);
        feed.seed(100, noon());
        let snapshot = (1..=5)
            .map(|i| feed.tick(noon() + chrono::Duration::seconds(3 * i)))
            .last()
            .unwrap();
        assert_eq!(snapshot.series.len(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_feed_appends_and_stops() {
        let mut live = feed(3);
        live.seed(48, Local::now().fixed_offset());
        let handle = live.spawn(Duration::from_secs(3));
        let mut rx = handle.subscribe();
        assert_eq!(handle.current().series.len(), 48);

        for _ in 0..3 {
            rx.changed().await.unwrap();
        }
        assert_eq!(rx.borrow().series.len(), 51);
        assert!(handle.is_running());

        handle.stop().await;
        // Sender is gone once the task exits, so no further snapshot can arrive
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let mut live = feed(6);
        live.seed(5, Local::now().fixed_offset());
        let handle = live.spawn(Duration::ZERO);
        let mut rx = handle.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().series.len(), 6);
        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_feed() {
        let mut live = feed(4);
        live.seed(5, Local::now().fixed_offset());
        let handle = live.spawn(Duration::from_secs(3));
        let mut rx = handle.subscribe();

        drop(handle);
        assert!(rx.changed().await.is_err());
        assert_eq!(rx.borrow().series.len(), 5);
    }
}
