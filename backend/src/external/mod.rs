//! External API integrations

pub mod ml;
pub mod weather;

pub use ml::MlClient;
pub use weather::WeatherClient;
