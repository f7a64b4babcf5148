//! Business logic services for the RootCause Advisory Platform

pub mod auth;
pub mod dashboard;
pub mod farmer;
pub mod prediction;
pub mod weather;

pub use auth::{AuthService, TokenService};
pub use dashboard::DashboardService;
pub use farmer::FarmerService;
pub use prediction::PredictionService;
pub use weather::WeatherService;
