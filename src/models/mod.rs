//! Data models for the SacredPath planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and metadata
//! - Forecast: Weather samples, per-location series and trip date ranges
//! - Trip: Trip requests and planned trips
//! - Itinerary: Day plans and budget breakdown

pub mod forecast;
pub mod itinerary;
pub mod location;
pub mod trip;

// Re-export all public types for convenient access
pub use forecast::{DateRange, ForecastPoint, ForecastSeries};
pub use itinerary::{BudgetShares, CostBreakdown, DayPlan, Itinerary};
pub use location::Location;
pub use trip::{AccommodationType, Destination, TravelMode, Trip, TripRequest};
