pub mod feed;
pub mod window;

pub use feed::{DashboardSnapshot, FeedConfig, FeedHandle, LiveFeed, MIN_TICK_PERIOD};
pub use window::{SampleWindow, DEFAULT_WINDOW_CAPACITY};

use std::{sync::Arc, time::Duration};

use chrono::Local;
use tokio::sync::watch;
use tracing::info;

use crate::{config::Config, simulation::SeriesGenerator};

/// Shared state handed to request handlers.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub feed: watch::Receiver<Arc<DashboardSnapshot>>,
}

impl AppState {
    /// Seed a feed from `cfg`, start its timer and return the state plus the
    /// handle that owns the running task.
    pub fn start(cfg: Config) -> (Self, FeedHandle) {
        let generator = SeriesGenerator::from_config(cfg.generator.clone(), cfg.tariff);
        let mut feed = LiveFeed::new(generator, cfg.billing.clone(), cfg.feed.window_capacity);
        let seeded = feed.seed(cfg.feed.initial_samples, Local::now().fixed_offset());
        info!(
            samples = seeded.series.len(),
            hot_day_mode = ?cfg.generator.hot_day_mode,
            share_allocation = ?cfg.generator.share_allocation,
            "seeded live feed"
        );

        let handle = feed.spawn(Duration::from_secs(cfg.feed.tick_seconds.max(1)));
        let state = Self {
            cfg,
            feed: handle.subscribe(),
        };
        (state, handle)
    }

    pub fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&self.feed.borrow())
    }
}
