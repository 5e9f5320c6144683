pub mod analytics;
pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod live;
pub mod session;
pub mod simulation;
pub mod telemetry;
