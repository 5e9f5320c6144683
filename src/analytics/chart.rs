use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::domain::Sample;

/// Number of trailing samples plotted on the usage chart
pub const CHART_POINTS: usize = 48;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub usage: f64,
    /// Usage priced at the flat rate
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWindow {
    pub points: Vec<ChartPoint>,
    pub average_usage: f64,
}

impl ChartWindow {
    pub fn from_series(series: &[Sample], flat_rate_per_kwh: f64) -> Self {
        let tail = &series[series.len().saturating_sub(CHART_POINTS)..];
        let points: Vec<ChartPoint> = tail
            .iter()
            .map(|s| ChartPoint {
                timestamp: s.timestamp,
                usage: s.usage_kw,
                cost: s.usage_kw * flat_rate_per_kwh,
            })
            .collect();

        let average_usage = if points.is_empty() {
            0.0
        } else {
            points.iter().map(|p| p.usage).sum::<f64>() / points.len() as f64
        };

        Self { points, average_usage }
    }
}
