//! Metrics derived from a sample series. All pure and total; nothing here is persisted.

pub mod bill;
pub mod chart;
pub mod daily;
pub mod efficiency;
pub mod trend;

pub use bill::{
    days_in_month, monthly_projection, peak_alert, BillProjection, BillingSettings,
    DEFAULT_DAILY_AVERAGE_KWH, FLAT_RATE_PER_KWH,
};
pub use chart::{ChartPoint, ChartWindow, CHART_POINTS};
pub use daily::{daily_total, todays_cost};
pub use efficiency::{efficiency_score, usage_level, UsageLevel};
pub use trend::{trend, Trend, TREND_WINDOW};

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::domain::Sample;

/// Usage above this is flagged regardless of the hour (kW)
pub const HIGH_USAGE_THRESHOLD_KW: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UsageAlert {
    /// Above the peak threshold during 16:00-21:59
    PeakHourHighUsage,
    HighUsage,
    TrendingUp,
}

/// Point-in-time dashboard metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub daily_total: f64,
    pub current_usage: f64,
    pub trend: Trend,
    pub efficiency_score: f64,
    pub usage_level: UsageLevel,
    pub todays_cost: f64,
    pub projected_monthly_bill: f64,
    pub peak_alert: bool,
    pub alerts: Vec<UsageAlert>,
}

impl DerivedMetrics {
    /// Metrics for the series as of `now`; the trend compares the last sample
    /// with the samples before it.
    pub fn compute(series: &[Sample], now: DateTime<FixedOffset>, settings: &BillingSettings) -> Self {
        let (current_usage, trend) = match series.split_last() {
            Some((latest, previous)) => (latest.usage_kw, trend::trend(latest.usage_kw, previous)),
            None => (0.0, Trend::Stable),
        };
        Self::with_trend(series, current_usage, trend, now, settings)
    }

    /// Metrics with an externally classified trend.
    pub fn with_trend(
        series: &[Sample],
        current_usage: f64,
        trend: Trend,
        now: DateTime<FixedOffset>,
        settings: &BillingSettings,
    ) -> Self {
        let daily_total = daily::daily_total(series, now);
        let days = bill::days_in_month(now.date_naive());
        let peak_alert = bill::peak_alert(current_usage, now.hour());

        let mut alerts = Vec::new();
        if peak_alert {
            alerts.push(UsageAlert::PeakHourHighUsage);
        }
        if current_usage > HIGH_USAGE_THRESHOLD_KW {
            alerts.push(UsageAlert::HighUsage);
        }
        if trend == Trend::Up {
            alerts.push(UsageAlert::TrendingUp);
        }

        Self {
            daily_total,
            current_usage,
            trend,
            efficiency_score: efficiency::efficiency_score(current_usage),
            usage_level: efficiency::usage_level(current_usage),
            todays_cost: daily::todays_cost(daily_total, settings.flat_rate_per_kwh),
            projected_monthly_bill: bill::monthly_projection(daily_total, days, settings.flat_rate_per_kwh),
            peak_alert,
            alerts,
        }
    }
}
