use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: String,
    #[serde(rename = "energy_consumption_kWh")]
    pub energy_consumption_kwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyStatistics {
    #[serde(rename = "total_consumption_kWh")]
    pub total_consumption_kwh: f64,
    #[serde(rename = "average_daily_consumption_kWh")]
    pub average_daily_consumption_kwh: f64,
    #[serde(rename = "peak_consumption_kWh")]
    pub peak_consumption_kwh: f64,
}

/// Body of `GET /api/energy-data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyDataResponse {
    pub household_id: i64,
    pub timeseries_data: Vec<TimeSeriesPoint>,
    pub statistics: EnergyStatistics,
}

/// Optional `start_date` / `end_date` query bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DateRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Error body the backend returns with non-2xx statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Sign-up form as entered by the user.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    #[validate(length(min = 1))]
    pub password: String,
    #[serde(skip)]
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    #[serde(skip)]
    pub agree_terms: bool,
}
