//! Hour-of-day usage bands driving the synthetic load shape.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Always-on household draw in kW before any band is added
pub const BASELINE_KW: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UsageBand {
    /// 06:00-09:59: breakfast, showers
    MorningPeak,
    /// 16:00-21:59: cooking, appliances
    EveningPeak,
    /// 22:00-05:59
    NightTrough,
    /// 10:00-15:59
    DaytimePlateau,
}

impl UsageBand {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..=9 => UsageBand::MorningPeak,
            16..=21 => UsageBand::EveningPeak,
            22..=23 | 0..=5 => UsageBand::NightTrough,
            _ => UsageBand::DaytimePlateau,
        }
    }

    /// Fixed load the band adds on top of the baseline
    pub fn base_kw(&self) -> f64 {
        match self {
            UsageBand::MorningPeak => 1.5,
            UsageBand::EveningPeak => 2.0,
            UsageBand::NightTrough => 0.2,
            UsageBand::DaytimePlateau => 0.8,
        }
    }

    /// Width of the uniform random component added to `base_kw`
    pub fn spread_kw(&self) -> f64 {
        match self {
            UsageBand::MorningPeak => 0.8,
            UsageBand::EveningPeak => 1.2,
            UsageBand::NightTrough => 0.3,
            UsageBand::DaytimePlateau => 0.6,
        }
    }

    /// Range of load the band can contribute, `[base, base + spread)`
    pub fn range_kw(&self) -> (f64, f64) {
        (self.base_kw(), self.base_kw() + self.spread_kw())
    }
}

/// Hours during which a hot day adds cooling load
pub fn is_cooling_hour(hour: u32) -> bool {
    (12..=18).contains(&hour)
}
