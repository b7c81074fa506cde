//! Day-by-day itinerary and budget breakdown

use super::{Location, TripRequest};
use crate::{PlannerError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fraction of the budget assigned to each spending category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetShares {
    pub travel: f64,
    pub accommodation: f64,
    pub food: f64,
    pub activities: f64,
    pub miscellaneous: f64,
}

impl Default for BudgetShares {
    fn default() -> Self {
        Self {
            travel: 0.4,
            accommodation: 0.3,
            food: 0.2,
            activities: 0.05,
            miscellaneous: 0.05,
        }
    }
}

impl BudgetShares {
    fn all(&self) -> [f64; 5] {
        [
            self.travel,
            self.accommodation,
            self.food,
            self.activities,
            self.miscellaneous,
        ]
    }

    /// Shares must be non-negative and add up to the whole budget
    pub fn validate(&self) -> Result<()> {
        if self.all().iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(PlannerError::config(
                "Budget shares must be non-negative numbers",
            ));
        }

        let sum: f64 = self.all().iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(PlannerError::config(format!(
                "Budget shares must add up to 1.0, got {sum:.4}"
            )));
        }

        Ok(())
    }
}

/// Budget split by spending category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub travel: f64,
    pub accommodation: f64,
    pub food: f64,
    pub activities: f64,
    pub miscellaneous: f64,
}

impl CostBreakdown {
    #[must_use]
    pub fn from_budget(budget: f64, shares: &BudgetShares) -> Self {
        Self {
            travel: budget * shares.travel,
            accommodation: budget * shares.accommodation,
            food: budget * shares.food,
            activities: budget * shares.activities,
            miscellaneous: budget * shares.miscellaneous,
        }
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.travel + self.accommodation + self.food + self.activities + self.miscellaneous
    }

    fn percentage_of_total(&self, amount: f64) -> f64 {
        let total = self.total();
        if total > 0.0 {
            amount / total * 100.0
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn travel_percentage(&self) -> f64 {
        self.percentage_of_total(self.travel)
    }

    #[must_use]
    pub fn accommodation_percentage(&self) -> f64 {
        self.percentage_of_total(self.accommodation)
    }

    #[must_use]
    pub fn food_percentage(&self) -> f64 {
        self.percentage_of_total(self.food)
    }

    #[must_use]
    pub fn activities_percentage(&self) -> f64 {
        self.percentage_of_total(self.activities)
    }

    #[must_use]
    pub fn miscellaneous_percentage(&self) -> f64 {
        self.percentage_of_total(self.miscellaneous)
    }
}

/// Plan for one day of the trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based
    pub day_number: u32,
    pub date: DateTime<Utc>,
    pub total_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub trip_id: Uuid,
    pub days: Vec<DayPlan>,
    /// Straight-line distance from the start through all destinations
    pub total_distance_km: f64,
    pub cost_breakdown: CostBreakdown,
}

impl Itinerary {
    /// Build the basic itinerary: one plan per day with an even share of the budget
    #[must_use]
    pub fn build(trip_id: Uuid, request: &TripRequest, shares: &BudgetShares) -> Self {
        let number_of_days = trip_days(request.start_date, request.end_date);

        let daily_cost = request.budget / f64::from(number_of_days);
        let days = (1..=number_of_days)
            .map(|day_number| DayPlan {
                day_number,
                date: request.start_date + Duration::days(i64::from(day_number - 1)),
                total_cost: daily_cost,
                notes: None,
            })
            .collect();

        let route: Vec<&Location> = request.weather_points();

        Self {
            trip_id,
            days,
            total_distance_km: route_distance_km(&route),
            cost_breakdown: CostBreakdown::from_budget(request.budget, shares),
        }
    }

    #[must_use]
    pub fn number_of_days(&self) -> usize {
        self.days.len()
    }
}

/// Whole days elapsed between start and end; a same-day trip still counts as one
fn trip_days(start: DateTime<Utc>, end: DateTime<Utc>) -> u32 {
    let elapsed = (end - start).num_days().max(1);
    u32::try_from(elapsed).unwrap_or(u32::MAX)
}

/// Sum of great-circle legs along the route
fn route_distance_km(route: &[&Location]) -> f64 {
    route
        .windows(2)
        .map(|leg| leg[0].distance_km(leg[1]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccommodationType, Destination, TravelMode};
    use chrono::TimeZone;

    fn request(days: i64) -> TripRequest {
        let start = Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap();
        TripRequest {
            budget: 30_000.0,
            number_of_travelers: 3,
            start_date: start,
            end_date: start + Duration::days(days),
            start_location: Location::new("Mumbai", 19.07, 72.87),
            destinations: vec![
                Destination::new(Location::new("Shirdi", 19.76, 74.47), 0),
                Destination::new(Location::new("Nashik", 19.99, 73.78), 1),
            ],
            travel_mode: TravelMode::Bus,
            accommodation_type: AccommodationType::Budget,
        }
    }

    #[test]
    fn test_default_shares_split() {
        let breakdown = CostBreakdown::from_budget(10_000.0, &BudgetShares::default());
        assert!((breakdown.travel - 4_000.0).abs() < 1e-9);
        assert!((breakdown.accommodation - 3_000.0).abs() < 1e-9);
        assert!((breakdown.food - 2_000.0).abs() < 1e-9);
        assert!((breakdown.activities - 500.0).abs() < 1e-9);
        assert!((breakdown.miscellaneous - 500.0).abs() < 1e-9);
        assert!((breakdown.total() - 10_000.0).abs() < 1e-9);
        assert!((breakdown.travel_percentage() - 40.0).abs() < 1e-9);
        assert!((breakdown.miscellaneous_percentage() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_of_empty_breakdown_are_zero() {
        let breakdown = CostBreakdown::from_budget(0.0, &BudgetShares::default());
        assert_eq!(breakdown.food_percentage(), 0.0);
        assert_eq!(breakdown.accommodation_percentage(), 0.0);
    }

    #[test]
    fn test_share_validation() {
        assert!(BudgetShares::default().validate().is_ok());

        let shares = BudgetShares {
            travel: 0.5,
            ..BudgetShares::default()
        };
        assert!(shares.validate().is_err());

        let shares = BudgetShares {
            travel: 0.5,
            food: 0.1,
            ..BudgetShares::default()
        };
        assert!(shares.validate().is_ok());

        let shares = BudgetShares {
            travel: -0.1,
            food: 0.7,
            ..BudgetShares::default()
        };
        assert!(shares.validate().is_err());
    }

    #[test]
    fn test_itinerary_days() {
        let itinerary = Itinerary::build(Uuid::new_v4(), &request(3), &BudgetShares::default());

        assert_eq!(itinerary.number_of_days(), 3);
        assert_eq!(itinerary.days[0].day_number, 1);
        assert_eq!(itinerary.days[2].day_number, 3);
        assert_eq!(
            itinerary.days[1].date,
            Utc.with_ymd_and_hms(2025, 1, 11, 8, 0, 0).unwrap()
        );
        assert!((itinerary.days[0].total_cost - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_day_trip_has_one_day() {
        let itinerary = Itinerary::build(Uuid::new_v4(), &request(0), &BudgetShares::default());
        assert_eq!(itinerary.number_of_days(), 1);
        assert!((itinerary.days[0].total_cost - 30_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_route_distance_sums_legs() {
        let r = request(2);
        let points = r.weather_points();
        let expected = points[0].distance_km(points[1]) + points[1].distance_km(points[2]);

        let itinerary = Itinerary::build(Uuid::new_v4(), &r, &BudgetShares::default());
        assert!((itinerary.total_distance_km - expected).abs() < 1e-9);
        assert!(itinerary.total_distance_km > 0.0);
    }
}
