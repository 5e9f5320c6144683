use chrono::{DateTime, FixedOffset};

use crate::domain::Sample;

/// Sum of usage for samples falling on `now`'s calendar date, in `now`'s offset.
pub fn daily_total(series: &[Sample], now: DateTime<FixedOffset>) -> f64 {
    let today = now.date_naive();
    let offset = *now.offset();
    series
        .iter()
        .filter(|s| s.timestamp.with_timezone(&offset).date_naive() == today)
        .map(|s| s.usage_kw)
        .sum()
}

/// Today's running cost at the flat rate
pub fn todays_cost(daily_total: f64, flat_rate_per_kwh: f64) -> f64 {
    daily_total * flat_rate_per_kwh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplianceBreakdown;
    use chrono::{Duration, TimeZone};

    fn sample(timestamp: DateTime<FixedOffset>, usage_kw: f64) -> Sample {
        Sample {
            timestamp,
            usage_kw,
            cost: 0.0,
            appliances: ApplianceBreakdown::default(),
        }
    }

    #[test]
    fn test_only_today_counts() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 6, 12, 0, 30, 0).unwrap();
        let series = vec![
            sample(now - Duration::minutes(45), 5.0),
            sample(now - Duration::minutes(15), 1.5),
            sample(now, 2.0),
        ];
        assert!((daily_total(&series, now) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_offsets_are_normalized() {
        let local = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = local.with_ymd_and_hms(2024, 6, 12, 1, 0, 0).unwrap();
        // 23:30 UTC on the 11th is 01:30 local on the 12th
        let utc_stamped = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 11, 23, 30, 0)
            .unwrap();
        let series = vec![sample(utc_stamped, 1.25)];
        assert_eq!(daily_total(&series, now), 1.25);
    }

    #[test]
    fn test_empty_series() {
        let now = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 6, 12, 12, 0, 0).unwrap();
        assert_eq!(daily_total(&[], now), 0.0);
        assert_eq!(todays_cost(0.0, 0.12), 0.0);
    }
}
