use serde::{Deserialize, Serialize};
use strum::Display;

pub const MIN_EFFICIENCY_SCORE: f64 = 20.0;
pub const MAX_EFFICIENCY_SCORE: f64 = 100.0;

/// `100 - 15 * usage`, clamped to 20..=100.
pub fn efficiency_score(current_usage_kw: f64) -> f64 {
    (MAX_EFFICIENCY_SCORE - current_usage_kw * 15.0).clamp(MIN_EFFICIENCY_SCORE, MAX_EFFICIENCY_SCORE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UsageLevel {
    Low,
    Medium,
    High,
}

pub fn usage_level(current_usage_kw: f64) -> UsageLevel {
    if current_usage_kw < 2.0 {
        UsageLevel::Low
    } else if current_usage_kw < 4.0 {
        UsageLevel::Medium
    } else {
        UsageLevel::High
    }
}
