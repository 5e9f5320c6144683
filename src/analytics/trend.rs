use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::Sample;

/// Number of trailing samples the latest reading is compared against
pub const TREND_WINDOW: usize = 10;

/// Thresholds in tenths of the mean. Readings exactly on a boundary count.
const UP_TENTHS: f64 = 11.0;
const DOWN_TENTHS: f64 = 9.0;
const BOUNDARY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    #[default]
    Stable,
}

/// Classify `latest_kw` against the mean of the last [`TREND_WINDOW`] samples of `recent`.
///
/// An empty window is stable.
pub fn trend(latest_kw: f64, recent: &[Sample]) -> Trend {
    let window = &recent[recent.len().saturating_sub(TREND_WINDOW)..];
    if window.is_empty() {
        return Trend::Stable;
    }
    let mean = window.iter().map(|s| s.usage_kw).sum::<f64>() / window.len() as f64;
    classify(latest_kw, mean)
}

/// Up at or above 110 % of `mean`, down at or below 90 %.
pub fn classify(latest_kw: f64, mean: f64) -> Trend {
    let scaled = latest_kw * 10.0;
    if scaled >= mean * UP_TENTHS - BOUNDARY_EPSILON {
        Trend::Up
    } else if scaled <= mean * DOWN_TENTHS + BOUNDARY_EPSILON {
        Trend::Down
    } else {
        Trend::Stable
    }
}
