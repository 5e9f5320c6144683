use serde::{Deserialize, Serialize};
use strum::Display;
use validator::Validate;

/// Time-of-use price band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RateBand {
    /// 16:00-21:59
    Peak,
    /// 22:00-06:59
    OffPeak,
    Standard,
}

impl RateBand {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            16..=21 => RateBand::Peak,
            22..=23 | 0..=6 => RateBand::OffPeak,
            _ => RateBand::Standard,
        }
    }
}

/// Price per kWh for each band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TimeOfUseTariff {
    #[validate(range(min = 0.0))]
    pub peak_per_kwh: f64,
    #[validate(range(min = 0.0))]
    pub off_peak_per_kwh: f64,
    #[validate(range(min = 0.0))]
    pub standard_per_kwh: f64,
}

impl Default for TimeOfUseTariff {
    fn default() -> Self {
        Self {
            peak_per_kwh: 0.18,
            off_peak_per_kwh: 0.08,
            standard_per_kwh: 0.12,
        }
    }
}

impl TimeOfUseTariff {
    pub fn rate(&self, band: RateBand) -> f64 {
        match band {
            RateBand::Peak => self.peak_per_kwh,
            RateBand::OffPeak => self.off_peak_per_kwh,
            RateBand::Standard => self.standard_per_kwh,
        }
    }

    pub fn rate_at_hour(&self, hour: u32) -> f64 {
        self.rate(RateBand::for_hour(hour))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, RateBand::OffPeak)]
    #[case(6, RateBand::OffPeak)]
    #[case(7, RateBand::Standard)]
    #[case(15, RateBand::Standard)]
    #[case(16, RateBand::Peak)]
    #[case(21, RateBand::Peak)]
    #[case(22, RateBand::OffPeak)]
    #[case(23, RateBand::OffPeak)]
    fn test_band_boundaries(#[case] hour: u32, #[case] expected: RateBand) {
        assert_eq!(RateBand::for_hour(hour), expected);
    }

    #[test]
    fn test_default_rates() {
        let tariff = TimeOfUseTariff::default();
        assert_eq!(tariff.rate_at_hour(18), 0.18);
        assert_eq!(tariff.rate_at_hour(3), 0.08);
        assert_eq!(tariff.rate_at_hour(11), 0.12);
    }
}
