//! # Synthetic Series Generator
//!
//! Produces plausible household power-usage samples at a fixed 15-minute cadence.
//!
//! Each slot is built from:
//! - a baseline draw plus an hour-of-day band (morning/evening peaks, night trough)
//! - an optional "hot day" cooling load between 12:00 and 18:59
//! - a weekend multiplier
//! - symmetric noise, clamped to a floor of 0.5 kW
//!
//! The total is then split across appliance categories from perturbed baseline
//! shares and priced with the time-of-use tariff.
//!
//! ## Randomness
//!
//! The generator is generic over [`rand::Rng`]. Production code uses a
//! [`StdRng`] seeded from OS entropy or from `random_seed`; tests inject a seeded
//! or mock source to make output reproducible.
//!
//! ```ignore
//! let mut generator = SeriesGenerator::from_config(GeneratorConfig::default(), TimeOfUseTariff::default());
//! let series = generator.generate(48);
//! assert_eq!(series.len(), 48);
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, Timelike, Weekday};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::usage::{is_cooling_hour, UsageBand, BASELINE_KW};
use crate::domain::{round_cents, ApplianceBreakdown, Sample, TimeOfUseTariff};

/// Cadence between consecutive samples
pub const SLOT_MINUTES: i64 = 15;

/// Usage never drops below this floor (kW)
pub const MIN_USAGE_KW: f64 = 0.5;

/// Baseline appliance shares and their perturbation widths, `(share, spread)`.
/// "Other" takes whatever remains.
const HVAC_SHARE: (f64, f64) = (0.45, 0.10);
const WATER_HEATER_SHARE: (f64, f64) = (0.18, 0.05);
const LIGHTING_SHARE: (f64, f64) = (0.12, 0.03);
const ELECTRONICS_SHARE: (f64, f64) = (0.15, 0.04);

/// How often the hot-day modifier is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotDayMode {
    /// Independent draw for every slot. Hot-day load flickers on and off
    /// within an afternoon.
    #[default]
    PerSlot,
    /// One draw per calendar day, shared by every slot of that day.
    PerDay,
}

/// How perturbed appliance shares are reconciled when they exceed 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareAllocation {
    /// Clamp "other" at zero and scale every share so they sum to 1.
    #[default]
    Renormalize,
    /// Clamp "other" at zero and take the excess out of HVAC.
    ClampRemainder,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GeneratorConfig {
    pub hot_day_mode: HotDayMode,
    pub share_allocation: ShareAllocation,
    /// Probability that a draw yields a hot day
    #[validate(range(min = 0.0, max = 1.0))]
    pub hot_day_probability: f64,
    /// Multiplier applied on Saturday and Sunday
    #[validate(range(min = 0.0))]
    pub weekend_multiplier: f64,
    /// Peak-to-peak width of the symmetric noise in kW
    #[validate(range(min = 0.0))]
    pub noise_kw: f64,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            hot_day_mode: HotDayMode::PerSlot,
            share_allocation: ShareAllocation::Renormalize,
            hot_day_probability: 0.3,
            weekend_multiplier: 1.1,
            noise_kw: 0.4,
            random_seed: None,
        }
    }
}

pub struct SeriesGenerator<R = StdRng> {
    config: GeneratorConfig,
    tariff: TimeOfUseTariff,
    rng: R,
    hot_days: HashMap<NaiveDate, bool>,
}

impl SeriesGenerator<StdRng> {
    /// Create a generator whose randomness comes from `config.random_seed`
    /// or, when unset, from OS entropy.
    pub fn from_config(config: GeneratorConfig, tariff: TimeOfUseTariff) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, tariff, rng)
    }
}

impl<R: Rng> SeriesGenerator<R> {
    pub fn with_rng(config: GeneratorConfig, tariff: TimeOfUseTariff, rng: R) -> Self {
        Self {
            config,
            tariff,
            rng,
            hot_days: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn tariff(&self) -> &TimeOfUseTariff {
        &self.tariff
    }

    /// `count` back-to-back slots ending now, most recent last.
    pub fn generate(&mut self, count: usize) -> Vec<Sample> {
        self.generate_until(count, Local::now().fixed_offset())
    }

    /// `count` back-to-back slots, the last one stamped `end`.
    pub fn generate_until(&mut self, count: usize, end: DateTime<FixedOffset>) -> Vec<Sample> {
        (0..count)
            .rev()
            .map(|slots_back| {
                let timestamp = end - Duration::minutes(SLOT_MINUTES * slots_back as i64);
                self.sample_at(timestamp)
            })
            .collect()
    }

    /// Generate the sample for a single slot.
    pub fn sample_at(&mut self, timestamp: DateTime<FixedOffset>) -> Sample {
        let hour = timestamp.hour();
        let band = UsageBand::for_hour(hour);

        let mut usage = BASELINE_KW + band.base_kw() + self.rng.gen::<f64>() * band.spread_kw();

        let hot = self.hot_day_active(timestamp.date_naive());
        if hot && is_cooling_hour(hour) {
            usage += 1.0 + self.rng.gen::<f64>() * 0.5;
        }

        if matches!(timestamp.weekday(), Weekday::Sat | Weekday::Sun) {
            usage *= self.config.weekend_multiplier;
        }

        usage += (self.rng.gen::<f64>() - 0.5) * self.config.noise_kw;
        let usage_kw = round_cents(usage.max(MIN_USAGE_KW));

        let appliances = self.split_appliances(usage_kw);
        let cost = round_cents(usage_kw * self.tariff.rate_at_hour(hour));

        Sample {
            timestamp,
            usage_kw,
            cost,
            appliances,
        }
    }

    /// Whether the hot-day modifier applies to a slot on `date`.
    pub(crate) fn hot_day_active(&mut self, date: NaiveDate) -> bool {
        match self.config.hot_day_mode {
            HotDayMode::PerSlot => self.draw_hot_day(),
            HotDayMode::PerDay => {
                if let Some(&hot) = self.hot_days.get(&date) {
                    return hot;
                }
                let hot = self.draw_hot_day();
                self.hot_days
                    .retain(|day, _| (date - *day).num_days().abs() <= 7);
                self.hot_days.insert(date, hot);
                hot
            }
        }
    }

    fn draw_hot_day(&mut self) -> bool {
        self.rng.gen::<f64>() < self.config.hot_day_probability
    }

    fn perturb(&mut self, (share, spread): (f64, f64)) -> f64 {
        share + (self.rng.gen::<f64>() - 0.5) * spread
    }

    /// Shares for hvac, water heater, lighting, electronics and other; they sum to 1.
    fn draw_shares(&mut self) -> [f64; 5] {
        let mut shares = [
            self.perturb(HVAC_SHARE),
            self.perturb(WATER_HEATER_SHARE),
            self.perturb(LIGHTING_SHARE),
            self.perturb(ELECTRONICS_SHARE),
            0.0,
        ];
        let allocated: f64 = shares[..4].iter().sum();
        let remainder = 1.0 - allocated;
        if remainder >= 0.0 {
            shares[4] = remainder;
            return shares;
        }

        match self.config.share_allocation {
            ShareAllocation::Renormalize => {
                for share in &mut shares[..4] {
                    *share /= allocated;
                }
            }
            ShareAllocation::ClampRemainder => {
                shares[0] += remainder;
            }
        }
        shares
    }

    fn split_appliances(&mut self, usage_kw: f64) -> ApplianceBreakdown {
        let [hvac, water_heater, lighting, electronics, _] = self.draw_shares();
        let hvac = usage_kw * hvac;
        let water_heater = usage_kw * water_heater;
        let lighting = usage_kw * lighting;
        let electronics = usage_kw * electronics;
        // Remainder is taken from usage directly so the categories always add up.
        let other = (usage_kw - hvac - water_heater - lighting - electronics).max(0.0);

        ApplianceBreakdown {
            hvac,
            water_heater,
            lighting,
            electronics,
            other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::mock::StepRng;

    fn at(day: u32, hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, day, hour, 0, 0)
            .unwrap()
    }

    /// Every uniform draw returns 0.0
    fn low_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every uniform draw returns just under 1.0
    fn high_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn seeded(seed: u64) -> SeriesGenerator {
        SeriesGenerator::from_config(
            GeneratorConfig {
                random_seed: Some(seed),
                ..Default::default()
            },
            TimeOfUseTariff::default(),
        )
    }

    #[test]
    fn test_generate_spacing_and_order() {
        let end = at(12, 18);
        let series = seeded(42).generate_until(48, end);

        assert_eq!(series.len(), 48);
        assert_eq!(series.last().unwrap().timestamp, end);
        assert_eq!(series[0].timestamp, end - Duration::minutes(15 * 47));
        for pair in series.windows(2) {
            assert_eq!(pair[1].timestamp - pair[0].timestamp, Duration::minutes(15));
        }
    }

    #[test]
    fn test_generate_zero_is_empty() {
        assert!(seeded(1).generate_until(0, at(12, 12)).is_empty());
    }

    #[test]
    fn test_seed_reproducibility() {
        let end = at(12, 9);
        assert_eq!(seeded(7).generate_until(96, end), seeded(7).generate_until(96, end));
    }

    #[test]
    fn test_weekday_night_with_low_draws() {
        // 2024-06-12 is a Wednesday
        let mut generator =
            SeriesGenerator::with_rng(GeneratorConfig::default(), TimeOfUseTariff::default(), low_rng());
        let sample = generator.sample_at(at(12, 3));

        // 1.5 baseline + 0.2 night band - 0.2 noise
        assert_eq!(sample.usage_kw, 1.5);
        assert_eq!(sample.cost, 0.12);
    }

    #[test]
    fn test_weekend_multiplier() {
        // 2024-06-15 is a Saturday
        let mut generator =
            SeriesGenerator::with_rng(GeneratorConfig::default(), TimeOfUseTariff::default(), low_rng());
        let sample = generator.sample_at(at(15, 3));

        // (1.5 + 0.2) * 1.1 - 0.2
        assert_eq!(sample.usage_kw, 1.67);
    }

    #[test]
    fn test_hot_day_adds_cooling_load() {
        // Low draws always land under the hot-day probability
        let mut generator =
            SeriesGenerator::with_rng(GeneratorConfig::default(), TimeOfUseTariff::default(), low_rng());
        let sample = generator.sample_at(at(12, 13));

        // 1.5 + 0.8 daytime + 1.0 hot - 0.2 noise
        assert_eq!(sample.usage_kw, 3.1);
        assert_eq!(sample.cost, round_cents(3.1 * 0.12));
    }

    #[test]
    fn test_floor_is_enforced() {
        let config = GeneratorConfig {
            noise_kw: 10.0,
            ..Default::default()
        };
        let mut generator =
            SeriesGenerator::with_rng(config, TimeOfUseTariff::default(), low_rng());
        let sample = generator.sample_at(at(12, 3));
        assert_eq!(sample.usage_kw, MIN_USAGE_KW);
    }

    #[test]
    fn test_renormalize_keeps_other_non_negative() {
        // High draws push the four perturbed shares to 1.01
        let mut generator =
            SeriesGenerator::with_rng(GeneratorConfig::default(), TimeOfUseTariff::default(), high_rng());
        let shares = generator.draw_shares();

        assert_eq!(shares[4], 0.0);
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!(shares[0] < 0.5);
    }

    #[test]
    fn test_clamp_remainder_charges_hvac() {
        let config = GeneratorConfig {
            share_allocation: ShareAllocation::ClampRemainder,
            ..Default::default()
        };
        let mut generator = SeriesGenerator::with_rng(config, TimeOfUseTariff::default(), high_rng());
        let shares = generator.draw_shares();

        assert_eq!(shares[4], 0.0);
        assert!((shares.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        // Only HVAC absorbs the 0.01 excess
        assert!((shares[0] - 0.49).abs() < 1e-6);
        assert!((shares[1] - 0.205).abs() < 1e-6);
    }

    #[test]
    fn test_appliances_sum_to_usage() {
        let series = seeded(3).generate_until(500, at(14, 23));
        for sample in &series {
            assert!((sample.appliances.total() - sample.usage_kw).abs() < 1e-6);
            assert!(sample.appliances.other >= 0.0);
        }
    }

    #[test]
    fn test_per_day_hot_draw_is_stable() {
        let config = GeneratorConfig {
            hot_day_mode: HotDayMode::PerDay,
            random_seed: Some(11),
            ..Default::default()
        };
        let mut generator = SeriesGenerator::from_config(config, TimeOfUseTariff::default());

        for day in 1..=20 {
            let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
            let first = generator.hot_day_active(date);
            for _ in 0..5 {
                assert_eq!(generator.hot_day_active(date), first);
            }
        }
        assert!(generator.hot_days.len() <= 15);
    }

    #[test]
    fn test_per_day_mode_applies_uniformly_within_afternoon() {
        let config = GeneratorConfig {
            hot_day_mode: HotDayMode::PerDay,
            hot_day_probability: 1.0,
            noise_kw: 0.0,
            random_seed: Some(5),
            ..Default::default()
        };
        let mut generator = SeriesGenerator::from_config(config, TimeOfUseTariff::default());
        let series = generator.generate_until(28, at(12, 18) + Duration::minutes(45));

        // 12:00-18:59 on a hot weekday: 1.5 + daytime/evening band + >= 1.0 cooling
        for sample in &series {
            assert!(sample.usage_kw >= 3.3, "{sample:?}");
        }
    }
}
