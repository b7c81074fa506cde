//! Weather retrieval and trip-wide risk assessment
//!
//! Forecasts for every point of a trip are fetched concurrently through a
//! [`ForecastProvider`] and joined before [`advisability::analyze`] runs, since
//! the verdict needs the complete set of series.

use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, info, instrument};

use crate::Result;
use crate::models::{DateRange, ForecastSeries, Location};

pub mod advisability;
pub mod openweather;

pub use advisability::{AdvisabilityVerdict, SampleRisk, analyze};
pub use openweather::OpenWeatherClient;

/// Source of per-location forecast series
#[async_trait]
pub trait ForecastProvider: Send + Sync {
    async fn fetch_series(&self, location: &Location) -> Result<ForecastSeries>;
}

/// Fetch the forecast for every location concurrently.
///
/// Fails as soon as any single retrieval fails; partial results are dropped.
pub async fn fetch_all<P>(provider: &P, locations: &[&Location]) -> Result<Vec<ForecastSeries>>
where
    P: ForecastProvider + ?Sized,
{
    debug!("Fetching forecasts for {} locations", locations.len());
    try_join_all(locations.iter().map(|l| provider.fetch_series(l))).await
}

/// Combines forecast retrieval with advisability scoring
pub struct WeatherService<P> {
    provider: P,
}

impl<P: ForecastProvider> WeatherService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Assess weather risk across all locations for the trip dates
    #[instrument(skip_all, fields(locations = locations.len()))]
    pub async fn assess(
        &self,
        locations: &[&Location],
        range: &DateRange,
    ) -> Result<AdvisabilityVerdict> {
        let series = fetch_all(&self.provider, locations).await?;
        let verdict = analyze(&series, range);
        info!("Weather advisability: {:?}", verdict);
        Ok(verdict)
    }
}
