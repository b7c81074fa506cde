//! Forecast samples, per-location series and trip date ranges

use super::Location;
use crate::{PlannerError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single timestamped weather sample for one location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastPoint {
    /// Time the sample is valid for
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Primary condition group as reported by the provider ("Rain", "Clear", ...).
    /// Empty when the provider sent none.
    #[serde(default)]
    pub condition: String,
    /// Precipitation over the last hour in mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain_last_hour_mm: Option<f64>,
}

/// Ordered forecast samples for one location
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastSeries {
    /// Location for this forecast
    pub location: Location,
    /// Samples sorted by timestamp
    pub points: Vec<ForecastPoint>,
    /// When this forecast was retrieved
    pub retrieved_at: DateTime<Utc>,
}

impl ForecastSeries {
    /// Create a series, sorting the samples by timestamp
    #[must_use]
    pub fn new(location: Location, mut points: Vec<ForecastPoint>) -> Self {
        points.sort_by_key(|p| p.timestamp);
        Self {
            location,
            points,
            retrieved_at: Utc::now(),
        }
    }

    /// Samples whose timestamp falls inside the range
    pub fn points_within<'a>(
        &'a self,
        range: &'a DateRange,
    ) -> impl Iterator<Item = &'a ForecastPoint> + 'a {
        self.points.iter().filter(|p| range.contains(p.timestamp))
    }

    /// First and last timestamp covered, if the series has samples
    #[must_use]
    pub fn coverage(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.points.first()?.timestamp, self.points.last()?.timestamp))
    }
}

/// Inclusive trip duration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range; fails when `start` is after `end`
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(PlannerError::validation(format!(
                "Date range start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Closed-interval membership, both ends included
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn point_at(timestamp: DateTime<Utc>) -> ForecastPoint {
        ForecastPoint {
            timestamp,
            temperature: 24.0,
            humidity: 60.0,
            wind_speed: 3.0,
            condition: "Clear".to_string(),
            rain_last_hour_mm: None,
        }
    }

    #[test]
    fn test_date_range_rejects_inverted_bounds() {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let end = start - Duration::hours(1);

        let err = DateRange::new(start, end).unwrap_err();
        assert!(matches!(err, PlannerError::Validation { .. }));
        assert!(DateRange::new(start, start).is_ok());
    }

    #[test]
    fn test_date_range_is_closed() {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 3, 12, 0, 0, 0).unwrap();
        let range = DateRange::new(start, end).unwrap();

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(start - Duration::seconds(1)));
        assert!(!range.contains(end + Duration::seconds(1)));
    }

    #[test]
    fn test_series_sorts_and_filters() {
        let base = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let series = ForecastSeries::new(
            Location::new("Puri", 19.81, 85.83),
            vec![
                point_at(base + Duration::hours(6)),
                point_at(base),
                point_at(base + Duration::hours(3)),
            ],
        );

        assert_eq!(series.coverage(), Some((base, base + Duration::hours(6))));

        let range = DateRange::new(base + Duration::hours(3), base + Duration::hours(9)).unwrap();
        assert_eq!(series.points_within(&range).count(), 2);
    }

    #[test]
    fn test_condition_defaults_to_empty() {
        let point: ForecastPoint = serde_json::from_str(
            r#"{"timestamp":"2025-03-10T00:00:00Z","temperature":20.0,"humidity":50.0,"wind_speed":1.0}"#,
        )
        .unwrap();
        assert_eq!(point.condition, "");
        assert!(point.rain_last_hour_mm.is_none());
    }
}
