//! # Synthetic Data Module
//!
//! Procedural stand-ins for a metered household.
//!
//! - **Generator**: 15-minute usage samples with diurnal, weekend and hot-day patterns
//! - **Usage**: the hour-of-day bands shaping the load
//! - **History**: past monthly bills and a weather outlook

pub mod generator;
pub mod history;
pub mod usage;

pub use generator::{
    GeneratorConfig, HotDayMode, SeriesGenerator, ShareAllocation, MIN_USAGE_KW, SLOT_MINUTES,
};
pub use history::{bill_history, weather_impact, BillHistoryEntry, ImpactLevel, WeatherImpact, WeatherOutlook};
pub use usage::UsageBand;
