use home_energy_monitor::{config::Config, live::AppState};

#[tokio::test(start_paused = true)]
async fn app_state_follows_the_running_feed() {
    let mut cfg = Config::default();
    cfg.generator.random_seed = Some(5);
    cfg.feed.window_capacity = 50;

    let (state, handle) = AppState::start(cfg);
    assert_eq!(state.snapshot().series.len(), 48);

    let mut rx = state.feed.clone();
    for _ in 0..4 {
        rx.changed().await.unwrap();
    }
    let snapshot = state.snapshot();
    assert_eq!(snapshot.series.len(), 50);
    assert_eq!(
        snapshot.metrics.current_usage,
        snapshot.latest.as_ref().unwrap().usage_kw
    );

    handle.stop().await;
    assert!(rx.changed().await.is_err());
}
