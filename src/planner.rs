//! Trip planning
//!
//! Validates a trip request, assesses weather risk for the start point and all
//! destinations, and builds the basic itinerary with its budget breakdown.

use tracing::{info, instrument, warn};

use crate::Result;
use crate::models::{BudgetShares, Itinerary, Trip, TripRequest};
use crate::weather::{AdvisabilityVerdict, ForecastProvider, WeatherService};

pub struct TripPlanner<P> {
    weather: WeatherService<P>,
    shares: BudgetShares,
}

impl<P: ForecastProvider> TripPlanner<P> {
    pub fn new(provider: P, shares: BudgetShares) -> Self {
        Self {
            weather: WeatherService::new(provider),
            shares,
        }
    }

    /// Plan a trip.
    ///
    /// Only an invalid request is an error. A failed forecast retrieval is
    /// recorded as [`AdvisabilityVerdict::Unknown`] so weather outages never
    /// block trip creation.
    #[instrument(skip_all, fields(destinations = request.destinations.len()))]
    pub async fn plan(&self, request: &TripRequest) -> Result<Trip> {
        request.validate()?;
        let range = request.date_range()?;

        let mut trip = Trip::from_request(request);
        info!("Planning '{}' ({})", trip.name, trip.id);

        trip.weather_advisability = match self
            .weather
            .assess(&request.weather_points(), &range)
            .await
        {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!("Weather assessment failed, continuing without it: {}", e);
                AdvisabilityVerdict::Unknown
            }
        };

        let itinerary = Itinerary::build(trip.id, request, &self.shares);
        trip.total_cost = itinerary.cost_breakdown.total();
        info!(
            "Planned {} days, {:.0} km, weather: {}",
            itinerary.number_of_days(),
            itinerary.total_distance_km,
            trip.weather_advisability
        );
        trip.itinerary = Some(itinerary);

        Ok(trip)
    }
}
