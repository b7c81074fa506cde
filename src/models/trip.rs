//! Trip request and planned trip models

use super::{DateRange, Itinerary, Location};
use crate::weather::AdvisabilityVerdict;
use crate::{PlannerError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest trip that can be planned, in days
pub const MAX_TRIP_DAYS: i64 = 366;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Train,
    Bus,
    Car,
    Flight,
    Mixed,
}

impl TravelMode {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Train => "Train",
            Self::Bus => "Bus",
            Self::Car => "Car",
            Self::Flight => "Flight",
            Self::Mixed => "Mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccommodationType {
    #[default]
    Budget,
    Dharamshala,
    MidRange,
    Luxury,
}

impl AccommodationType {
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Budget => "Budget Hotel",
            Self::Dharamshala => "Dharamshala",
            Self::MidRange => "Mid-range Hotel",
            Self::Luxury => "Luxury Hotel",
        }
    }
}

fn default_planned_duration_hours() -> u32 {
    24
}

/// A place the pilgrims want to visit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub location: Location,
    /// Planned stay in hours
    #[serde(default = "default_planned_duration_hours")]
    pub planned_duration_hours: u32,
    /// Position in the visiting sequence, 0-based
    #[serde(default)]
    pub visiting_order: u32,
}

impl Destination {
    #[must_use]
    pub fn new(location: Location, visiting_order: u32) -> Self {
        Self {
            location,
            planned_duration_hours: default_planned_duration_hours(),
            visiting_order,
        }
    }
}

/// Everything the user enters before a trip is planned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    /// Total budget for the whole group
    pub budget: f64,
    pub number_of_travelers: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_location: Location,
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub travel_mode: TravelMode,
    #[serde(default)]
    pub accommodation_type: AccommodationType,
}

impl TripRequest {
    /// Check that the request can be planned
    pub fn validate(&self) -> Result<()> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(PlannerError::validation("Budget must be a positive amount"));
        }

        if self.number_of_travelers == 0 {
            return Err(PlannerError::validation(
                "Number of travelers must be at least 1",
            ));
        }

        if self.start_location.name.trim().is_empty() {
            return Err(PlannerError::validation("Start location cannot be empty"));
        }

        if self.destinations.is_empty() {
            return Err(PlannerError::validation(
                "At least one destination is required",
            ));
        }

        if self.start_date > self.end_date {
            return Err(PlannerError::validation(
                "Start date must not be after end date",
            ));
        }

        if self.end_date - self.start_date > Duration::days(MAX_TRIP_DAYS) {
            return Err(PlannerError::validation(format!(
                "Trips cannot be longer than {MAX_TRIP_DAYS} days"
            )));
        }

        if let Some(bad) = self
            .weather_points()
            .into_iter()
            .find(|l| !l.has_valid_coordinates())
        {
            return Err(PlannerError::validation(format!(
                "Invalid coordinates for '{}': {}",
                bad.name,
                bad.format_coordinates()
            )));
        }

        Ok(())
    }

    /// Trip duration as an inclusive range
    pub fn date_range(&self) -> Result<DateRange> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Destinations in visiting order
    #[must_use]
    pub fn ordered_destinations(&self) -> Vec<&Destination> {
        let mut ordered: Vec<&Destination> = self.destinations.iter().collect();
        ordered.sort_by_key(|d| d.visiting_order);
        ordered
    }

    /// Every point whose weather matters: the start followed by the destinations
    #[must_use]
    pub fn weather_points(&self) -> Vec<&Location> {
        std::iter::once(&self.start_location)
            .chain(self.ordered_destinations().into_iter().map(|d| &d.location))
            .collect()
    }

    /// Display name for the trip, based on the first destination
    #[must_use]
    pub fn trip_name(&self) -> String {
        let first = self
            .ordered_destinations()
            .first()
            .map(|d| d.location.name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or("Sacred Places")
            .to_string();
        format!("Pilgrimage to {first}")
    }
}

/// A planned trip with its itinerary and weather verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub name: String,
    pub budget: f64,
    pub number_of_travelers: u32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_location: Location,
    pub destinations: Vec<Destination>,
    pub travel_mode: TravelMode,
    pub accommodation_type: AccommodationType,
    pub itinerary: Option<Itinerary>,
    pub total_cost: f64,
    pub weather_advisability: AdvisabilityVerdict,
}

impl Trip {
    /// Create an unplanned trip from a request
    #[must_use]
    pub fn from_request(request: &TripRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.trip_name(),
            budget: request.budget,
            number_of_travelers: request.number_of_travelers,
            start_date: request.start_date,
            end_date: request.end_date,
            start_location: request.start_location.clone(),
            destinations: request.destinations.clone(),
            travel_mode: request.travel_mode,
            accommodation_type: request.accommodation_type,
            itinerary: None,
            total_cost: 0.0,
            weather_advisability: AdvisabilityVerdict::Unknown,
        }
    }

    /// Budget per traveler
    #[must_use]
    pub fn budget_per_traveler(&self) -> f64 {
        if self.number_of_travelers == 0 {
            return 0.0;
        }
        self.budget / f64::from(self.number_of_travelers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> TripRequest {
        let start = Utc.with_ymd_and_hms(2025, 11, 1, 6, 0, 0).unwrap();
        TripRequest {
            budget: 20_000.0,
            number_of_travelers: 2,
            start_date: start,
            end_date: start + Duration::days(3),
            start_location: Location::new("Delhi", 28.61, 77.21),
            destinations: vec![
                Destination::new(Location::new("Haridwar", 29.95, 78.16), 1),
                Destination::new(Location::new("Rishikesh", 30.09, 78.27), 0),
            ],
            travel_mode: TravelMode::Train,
            accommodation_type: AccommodationType::Dharamshala,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_trip_length_is_capped() {
        let mut r = request();
        r.end_date = r.start_date + Duration::days(MAX_TRIP_DAYS);
        assert!(r.validate().is_ok());

        r.end_date = r.start_date + Duration::days(20_000_000);
        let err = r.validate().unwrap_err();
        assert!(matches!(err, PlannerError::Validation { .. }));
        assert!(err.to_string().contains("366 days"));
    }

    #[test]
    fn test_validation_failures() {
        let mut r = request();
        r.budget = 0.0;
        assert!(r.validate().is_err());

        let mut r = request();
        r.budget = f64::NAN;
        assert!(r.validate().is_err());

        let mut r = request();
        r.number_of_travelers = 0;
        assert!(r.validate().is_err());

        let mut r = request();
        r.start_location.name = "  ".to_string();
        assert!(r.validate().is_err());

        let mut r = request();
        r.destinations.clear();
        assert!(r.validate().is_err());

        let mut r = request();
        r.end_date = r.start_date - Duration::hours(1);
        assert!(r.validate().is_err());
        assert!(r.date_range().is_err());

        let mut r = request();
        r.destinations[0].location.latitude = 123.0;
        let err = r.validate().unwrap_err();
        assert!(err.to_string().contains("Haridwar"));
    }

    #[test]
    fn test_weather_points_follow_visiting_order() {
        let names: Vec<_> = request()
            .weather_points()
            .iter()
            .map(|l| l.name.clone())
            .collect();
        assert_eq!(names, vec!["Delhi", "Rishikesh", "Haridwar"]);
    }

    #[test]
    fn test_trip_name() {
        assert_eq!(request().trip_name(), "Pilgrimage to Rishikesh");

        let mut r = request();
        for d in &mut r.destinations {
            d.location.name.clear();
        }
        assert_eq!(r.trip_name(), "Pilgrimage to Sacred Places");
    }

    #[test]
    fn test_trip_from_request() {
        let trip = Trip::from_request(&request());
        assert_eq!(trip.weather_advisability, AdvisabilityVerdict::Unknown);
        assert!(trip.itinerary.is_none());
        assert_eq!(trip.budget_per_traveler(), 10_000.0);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&AccommodationType::MidRange).unwrap(),
            "\"mid_range\""
        );
        assert_eq!(AccommodationType::MidRange.display_name(), "Mid-range Hotel");
        assert_eq!(TravelMode::Flight.display_name(), "Flight");
    }
}
