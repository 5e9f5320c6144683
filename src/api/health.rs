use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, FixedOffset, Local};
use serde::Serialize;

use crate::live::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: DateTime<FixedOffset>,
    checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    feed: ComponentHealth,
}

/// Health status of a component
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_sample_age_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// GET /health
///
/// The feed counts as stale when no snapshot was published for three tick
/// periods.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let now = Local::now().fixed_offset();
    let feed = check_feed(&state, now);
    let healthy = feed.status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        timestamp: now,
        checks: HealthChecks { feed },
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    tracing::debug!(healthy, "Health check completed");

    (status_code, Json(response))
}

fn check_feed(state: &AppState, now: DateTime<FixedOffset>) -> ComponentHealth {
    let snapshot = state.snapshot();
    let age = (now - snapshot.generated_at).num_seconds();
    let max_age = (state.cfg.feed.tick_seconds.max(1) * 3) as i64;

    if snapshot.series.is_empty() {
        ComponentHealth {
            status: "unhealthy",
            last_sample_age_secs: None,
            error: Some("window is empty".to_string()),
        }
    } else if age > max_age {
        ComponentHealth {
            status: "unhealthy",
            last_sample_age_secs: Some(age),
            error: Some(format!("no snapshot for {age}s")),
        }
    } else {
        ComponentHealth {
            status: "healthy",
            last_sample_age_secs: Some(age),
            error: None,
        }
    }
}
