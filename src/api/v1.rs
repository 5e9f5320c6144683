use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::{ApiError, ApiResult};
use crate::{
    analytics::{BillProjection, ChartWindow, DerivedMetrics},
    domain::Sample,
    live::AppState,
    simulation::{bill_history, weather_impact, BillHistoryEntry, WeatherImpact},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/series", get(get_series))
        .route("/chart", get(get_chart))
        .route("/bill", get(get_bill))
        .route("/bill/history", get(get_bill_history))
        .route("/weather", get(get_weather))
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub generated_at: DateTime<FixedOffset>,
    pub latest: Sample,
    pub metrics: DerivedMetrics,
}

/// Latest sample plus derived metrics. 503 until the window holds a sample.
pub async fn get_dashboard(State(st): State<AppState>) -> ApiResult<Json<DashboardView>> {
    let snapshot = st.snapshot();
    let latest = snapshot
        .latest
        .clone()
        .ok_or_else(|| ApiError::ServiceUnavailable("no samples generated yet".to_string()))?;

    Ok(Json(DashboardView {
        generated_at: snapshot.generated_at,
        latest,
        metrics: snapshot.metrics.clone(),
    }))
}

/// Whole window, oldest first.
pub async fn get_series(State(st): State<AppState>) -> Json<Vec<Sample>> {
    Json(st.snapshot().series.to_vec())
}

pub async fn get_chart(State(st): State<AppState>) -> Json<ChartWindow> {
    let snapshot = st.snapshot();
    Json(ChartWindow::from_series(
        &snapshot.series,
        st.cfg.billing.flat_rate_per_kwh,
    ))
}

pub async fn get_bill(State(st): State<AppState>) -> Json<BillProjection> {
    let snapshot = st.snapshot();
    Json(BillProjection::compute(
        snapshot.metrics.current_usage,
        snapshot.metrics.daily_total,
        snapshot.generated_at,
        &st.cfg.billing,
    ))
}

#[derive(Debug, Deserialize, Validate)]
pub struct BillHistoryQuery {
    #[serde(default = "default_history_months")]
    #[validate(range(min = 1, max = 24))]
    pub months: usize,
}

fn default_history_months() -> usize {
    6
}

pub async fn get_bill_history(
    State(st): State<AppState>,
    query: Result<Query<BillHistoryQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<BillHistoryEntry>>> {
    let Query(q) = query?;
    q.validate()?;
    let today = st.snapshot().generated_at.date_naive();
    let entries = bill_history(&mut rand::thread_rng(), today, q.months);
    Ok(Json(entries))
}

pub async fn get_weather() -> Json<WeatherImpact> {
    Json(weather_impact(&mut rand::thread_rng()))
}
