//! `SacredPath` - pilgrimage trip planning
//!
//! This library provides weather advisability scoring for multi-destination
//! trips, forecast retrieval, and basic itinerary and budget planning.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod weather;

// Re-export core types for public API
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use models::{DateRange, ForecastPoint, ForecastSeries, Location, Trip, TripRequest};
pub use planner::TripPlanner;
pub use weather::{AdvisabilityVerdict, ForecastProvider, OpenWeatherClient, WeatherService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
