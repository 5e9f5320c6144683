use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Daily usage assumed when nothing has been measured yet (kWh)
pub const DEFAULT_DAILY_AVERAGE_KWH: f64 = 25.0;

/// Flat price used for bill projections ($/kWh)
pub const FLAT_RATE_PER_KWH: f64 = 0.12;

/// Usage above this during peak hours raises an alert (kW)
pub const PEAK_ALERT_THRESHOLD_KW: f64 = 3.5;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BillingSettings {
    #[validate(range(min = 0.0))]
    pub flat_rate_per_kwh: f64,
    /// Previous month's bill the projection is compared against
    #[validate(range(min = 0.01))]
    pub last_month_bill: f64,
    /// Share of the projected bill presented as achievable savings
    #[validate(range(min = 0.0, max = 1.0))]
    pub savings_fraction: f64,
}

impl Default for BillingSettings {
    fn default() -> Self {
        Self {
            flat_rate_per_kwh: FLAT_RATE_PER_KWH,
            last_month_bill: 142.50,
            savings_fraction: 0.15,
        }
    }
}

/// Daily average actually used for projection: zero or NaN fall back to
/// [`DEFAULT_DAILY_AVERAGE_KWH`].
pub fn effective_daily_average(daily_average: f64) -> f64 {
    if daily_average == 0.0 || daily_average.is_nan() {
        DEFAULT_DAILY_AVERAGE_KWH
    } else {
        daily_average
    }
}

/// `daily_average * days_in_month * rate`, with the empty-state fallback applied.
pub fn monthly_projection(daily_average: f64, days_in_month: u32, rate: f64) -> f64 {
    effective_daily_average(daily_average) * f64::from(days_in_month) * rate
}

/// High usage during the 16:00-21:59 peak.
pub fn peak_alert(current_usage_kw: f64, hour: u32) -> bool {
    (16..=21).contains(&hour) && current_usage_kw > PEAK_ALERT_THRESHOLD_KW
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let Some(first) = date.with_day(1) else {
        return 30;
    };
    first
        .checked_add_months(Months::new(1))
        .map(|next| (next - first).num_days() as u32)
        .unwrap_or(31)
}

/// Month-to-date bill outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillProjection {
    pub days_in_month: u32,
    pub current_day: u32,
    pub days_remaining: u32,
    pub month_progress_percent: f64,
    pub daily_average_kwh: f64,
    pub projected_usage_kwh: f64,
    pub projected_bill: f64,
    pub last_month_bill: f64,
    /// Projected minus last month, in currency
    pub difference: f64,
    pub percent_change: f64,
    pub potential_savings: f64,
    pub peak_alert: bool,
}

impl BillProjection {
    pub fn compute(
        current_usage_kw: f64,
        daily_total: f64,
        now: DateTime<FixedOffset>,
        settings: &BillingSettings,
    ) -> Self {
        let today = now.date_naive();
        let days_in_month = days_in_month(today);
        let current_day = today.day();

        let daily_average_kwh = effective_daily_average(daily_total);
        let projected_usage_kwh = daily_average_kwh * f64::from(days_in_month);
        let projected_bill = monthly_projection(daily_total, days_in_month, settings.flat_rate_per_kwh);
        let difference = projected_bill - settings.last_month_bill;

        Self {
            days_in_month,
            current_day,
            days_remaining: days_in_month.saturating_sub(current_day),
            month_progress_percent: f64::from(current_day) / f64::from(days_in_month) * 100.0,
            daily_average_kwh,
            projected_usage_kwh,
            projected_bill,
            last_month_bill: settings.last_month_bill,
            difference,
            percent_change: difference / settings.last_month_bill * 100.0,
            potential_savings: projected_bill * settings.savings_fraction,
            peak_alert: peak_alert(current_usage_kw, now.hour()),
        }
    }
}
