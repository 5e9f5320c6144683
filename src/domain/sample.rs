use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter};

/// Appliance categories a sample's usage is split across.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ApplianceCategory {
    Hvac,
    WaterHeater,
    Lighting,
    Electronics,
    Other,
}

/// Per-category power draw in kW. The categories sum to the owning sample's usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplianceBreakdown {
    pub hvac: f64,
    pub water_heater: f64,
    pub lighting: f64,
    pub electronics: f64,
    pub other: f64,
}

impl ApplianceBreakdown {
    pub fn get(&self, category: ApplianceCategory) -> f64 {
        match category {
            ApplianceCategory::Hvac => self.hvac,
            ApplianceCategory::WaterHeater => self.water_heater,
            ApplianceCategory::Lighting => self.lighting,
            ApplianceCategory::Electronics => self.electronics,
            ApplianceCategory::Other => self.other,
        }
    }

    pub fn total(&self) -> f64 {
        self.hvac + self.water_heater + self.lighting + self.electronics + self.other
    }

    /// Largest consumer in this breakdown
    pub fn dominant(&self) -> ApplianceCategory {
        use strum::IntoEnumIterator;

        ApplianceCategory::iter()
            .max_by(|a, b| self.get(*a).total_cmp(&self.get(*b)))
            .unwrap_or(ApplianceCategory::Other)
    }
}

/// One 15-minute reading: usage in kW, cost for the interval and its appliance split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<FixedOffset>,
    #[serde(rename = "usage")]
    pub usage_kw: f64,
    pub cost: f64,
    pub appliances: ApplianceBreakdown,
}

/// Round to two decimals (cents / hundredths of a kW).
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
