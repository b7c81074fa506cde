//! Weather advisability scoring
//!
//! Turns forecast series for every point of a trip into a single travel-risk
//! verdict. Each in-range sample gets an integer risk contribution from four
//! independent rule bands (temperature, condition, wind, humidity); the mean
//! contribution over all samples is then classified.

use crate::models::{DateRange, ForecastPoint, ForecastSeries};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Trip-wide weather risk classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AdvisabilityVerdict {
    /// Average risk in [0, 1]
    Recommended,
    /// Average risk in (1, 3]
    Caution,
    /// Average risk above 3
    NotAdvisable,
    /// No forecast sample fell inside the trip dates
    #[default]
    Unknown,
}

impl AdvisabilityVerdict {
    /// Human-readable label for trip summaries
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Recommended => "Recommended to go",
            Self::Caution => "Proceed with caution",
            Self::NotAdvisable => "Not advisable",
            Self::Unknown => "Weather data unavailable",
        }
    }

    /// Display color; `Unknown` is neutral so missing data never reads as "safe"
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::Recommended => "green",
            Self::Caution => "yellow",
            Self::NotAdvisable => "red",
            Self::Unknown => "gray",
        }
    }

    /// Classify an average per-sample risk
    #[must_use]
    pub fn from_average_risk(average: f64) -> Self {
        match average {
            a if a <= 1.0 => Self::Recommended,
            a if a <= 3.0 => Self::Caution,
            _ => Self::NotAdvisable,
        }
    }
}

impl fmt::Display for AdvisabilityVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk contribution of one sample, split by rule band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleRisk {
    pub temperature: u32,
    pub condition: u32,
    pub wind: u32,
    pub humidity: u32,
}

impl SampleRisk {
    /// Score a single forecast sample
    #[must_use]
    pub fn assess(point: &ForecastPoint) -> Self {
        Self {
            temperature: temperature_risk(point.temperature),
            condition: condition_risk(&point.condition, point.rain_last_hour_mm),
            wind: wind_risk(point.wind_speed),
            humidity: humidity_risk(point.humidity),
        }
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.temperature + self.condition + self.wind + self.humidity
    }
}

/// Mean risk over every in-range sample of every series, `None` if there are none
#[must_use]
pub fn average_risk(series: &[ForecastSeries], range: &DateRange) -> Option<f64> {
    let (total, count) = series
        .iter()
        .flat_map(|s| s.points_within(range))
        .fold((0u64, 0u64), |(total, count), point| {
            (total + u64::from(SampleRisk::assess(point).total()), count + 1)
        });

    if count == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let average = total as f64 / count as f64;
    debug!(samples = count, total_risk = total, average, "Aggregated forecast risk");
    Some(average)
}

/// Compute the trip-wide verdict for the given forecasts and trip dates
#[must_use]
pub fn analyze(series: &[ForecastSeries], range: &DateRange) -> AdvisabilityVerdict {
    average_risk(series, range).map_or(
        AdvisabilityVerdict::Unknown,
        AdvisabilityVerdict::from_average_risk,
    )
}

/// Extreme band wins over the mild band; they never add up
fn temperature_risk(celsius: f64) -> u32 {
    match celsius {
        t if t > 40.0 || t < 5.0 => 3,
        t if t > 35.0 || t < 10.0 => 1,
        _ => 0,
    }
}

fn condition_risk(condition: &str, rain_last_hour_mm: Option<f64>) -> u32 {
    match condition.to_lowercase().as_str() {
        "thunderstorm" | "tornado" => 5,
        "rain" | "drizzle" => match rain_last_hour_mm {
            Some(mm) if mm > 10.0 => 3,
            _ => 1,
        },
        "snow" => 4,
        "mist" | "fog" => 1,
        _ => 0,
    }
}

fn wind_risk(speed_ms: f64) -> u32 {
    match speed_ms {
        s if s > 15.0 => 2,
        s if s > 10.0 => 1,
        _ => 0,
    }
}

fn humidity_risk(percent: f64) -> u32 {
    u32::from(percent > 85.0)
}
