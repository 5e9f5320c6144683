//! Synthetic monthly bill history and weather outlook shown next to the live feed.

use chrono::{Datelike, Months, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::Display;

/// One past billing month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillHistoryEntry {
    /// Short month label, e.g. "Mar"
    pub month: String,
    pub year: i32,
    pub amount: f64,
    pub usage_kwh: f64,
    /// 0-100
    pub efficiency: f64,
}

/// Bills for the `months` calendar months before `today`, oldest first.
///
/// Amount and usage drift upward month over month to mimic a seasonal ramp.
pub fn bill_history<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, months: usize) -> Vec<BillHistoryEntry> {
    let Some(current_month) = today.with_day(1) else {
        return Vec::new();
    };

    (0..months)
        .filter_map(|index| {
            let back = Months::new((months - index) as u32);
            let first_of_month = current_month.checked_sub_months(back)?;
            let step = index as f64;
            Some(BillHistoryEntry {
                month: first_of_month.format("%b").to_string(),
                year: first_of_month.year(),
                amount: 120.0 + (rng.gen::<f64>() - 0.5) * 40.0 + step * 5.0,
                usage_kwh: 800.0 + (rng.gen::<f64>() - 0.5) * 200.0 + step * 30.0,
                efficiency: 70.0 + rng.gen::<f64>() * 25.0,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeatherOutlook {
    HotDay,
    Mild,
}

impl WeatherOutlook {
    pub fn message(&self) -> &'static str {
        match self {
            WeatherOutlook::HotDay => "Hot day expected - AC usage may increase",
            WeatherOutlook::Mild => "Mild weather - good day for energy savings",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpact {
    pub temperature_f: f64,
    pub humidity_percent: f64,
    pub outlook: WeatherOutlook,
    pub forecast: String,
    pub impact: ImpactLevel,
}

pub fn weather_impact<R: Rng + ?Sized>(rng: &mut R) -> WeatherImpact {
    let temperature_f = 78.0 + rng.gen::<f64>() * 20.0;
    let humidity_percent = 45.0 + rng.gen::<f64>() * 30.0;
    let outlook = if rng.gen::<f64>() > 0.5 {
        WeatherOutlook::HotDay
    } else {
        WeatherOutlook::Mild
    };
    // Two independent draws: high first, then medium from what is left
    let impact = if rng.gen::<f64>() > 0.6 {
        ImpactLevel::High
    } else if rng.gen::<f64>() > 0.3 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    };

    WeatherImpact {
        temperature_f,
        humidity_percent,
        outlook,
        forecast: outlook.message().to_string(),
        impact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_history_labels_precede_today() {
        let mut rng = StdRng::seed_from_u64(42);
        let today = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
        let history = bill_history(&mut rng, today, 6);

        let labels: Vec<_> = history.iter().map(|e| e.month.as_str()).collect();
        assert_eq!(labels, ["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);
        assert!(history.iter().all(|e| e.year == 2024));
    }

    #[test]
    fn test_history_crosses_year_boundary() {
        let mut rng = StdRng::seed_from_u64(1);
        let today = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();
        let history = bill_history(&mut rng, today, 3);

        assert_eq!(history[0].month, "Nov");
        assert_eq!(history[0].year, 2024);
        assert_eq!(history[2].month, "Jan");
        assert_eq!(history[2].year, 2025);
    }

    #[test]
    fn test_history_value_ranges() {
        let mut rng = StdRng::seed_from_u64(9);
        let today = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        for (index, entry) in bill_history(&mut rng, today, 6).iter().enumerate() {
            let step = index as f64;
            assert!(entry.amount >= 100.0 + step * 5.0 && entry.amount < 140.0 + step * 5.0);
            assert!(entry.usage_kwh >= 700.0 + step * 30.0 && entry.usage_kwh < 900.0 + step * 30.0);
            assert!((70.0..95.0).contains(&entry.efficiency));
        }
    }

    #[test]
    fn test_weather_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let weather = weather_impact(&mut rng);
            assert!((78.0..98.0).contains(&weather.temperature_f));
            assert!((45.0..75.0).contains(&weather.humidity_percent));
            assert_eq!(weather.forecast, weather.outlook.message());
        }
    }
}
