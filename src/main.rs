//! SacredPath command line
//!
//! ```bash
//! # Plan a trip described in a JSON file (needs OPENWEATHER_API_KEY)
//! sacredpath plan --trip trip.json
//!
//! # Score previously downloaded forecasts for a date range
//! sacredpath score --forecast series.json --start 2025-06-01T00:00:00Z --end 2025-06-03T00:00:00Z
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;

use sacredpath::{
    DateRange, ForecastSeries, OpenWeatherClient, PlannerConfig, Trip, TripPlanner, TripRequest,
    logging, weather,
};

#[derive(Parser)]
#[command(
    name = "sacredpath",
    version,
    about = "Pilgrimage trip planner with weather advisability",
    long_about = "Plans pilgrimage trips: checks the weather along the route and splits the budget into a day-by-day itinerary."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Plan a trip from a JSON trip request
    Plan {
        /// Trip request file
        #[arg(long)]
        trip: PathBuf,
    },
    /// Compute the weather verdict for saved forecast series
    Score {
        /// JSON array of forecast series
        #[arg(long)]
        forecast: PathBuf,
        /// Trip start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Trip end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlannerConfig::load_from_path(Some(path.clone()))?,
        None => PlannerConfig::load()?,
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::init(&config.logging);
    debug!("Using config: {:?}", cli.config);

    match cli.command {
        Command::Plan { trip } => plan(&config, &trip).await,
        Command::Score {
            forecast,
            start,
            end,
        } => score(&forecast, start, end),
    }
}

async fn plan(config: &PlannerConfig, trip_file: &Path) -> Result<()> {
    let request: TripRequest = read_json(trip_file)?;

    let provider = OpenWeatherClient::new(&config.weather)
        .map_err(|e| anyhow::anyhow!("{} ({e})", e.user_message()))?;
    let planner = TripPlanner::new(provider, config.budget);

    let trip = planner
        .plan(&request)
        .await
        .map_err(|e| anyhow::anyhow!("{} ({e})", e.user_message()))?;

    print_trip(&trip);
    Ok(())
}

fn score(forecast_file: &Path, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
    let series: Vec<ForecastSeries> = read_json(forecast_file)?;
    let range = DateRange::new(start, end)?;

    let verdict = weather::analyze(&series, &range);
    println!("{} ({})", verdict.label(), verdict.color());
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

fn print_trip(trip: &Trip) {
    println!("🛕 {}", trip.name);
    println!(
        "   {} → {}, {} traveler(s), {}",
        trip.start_date.format("%Y-%m-%d"),
        trip.end_date.format("%Y-%m-%d"),
        trip.number_of_travelers,
        trip.travel_mode.display_name()
    );
    println!(
        "   Weather: {} ({})",
        trip.weather_advisability.label(),
        trip.weather_advisability.color()
    );

    let Some(itinerary) = &trip.itinerary else {
        return;
    };

    println!("   Route: {:.0} km", itinerary.total_distance_km);
    for day in &itinerary.days {
        println!(
            "   Day {}: {} - {:.2}",
            day.day_number,
            day.date.format("%a %d %b"),
            day.total_cost
        );
    }

    let costs = &itinerary.cost_breakdown;
    println!("   Budget ({:.2} total):", costs.total());
    println!("     Travel:        {:>10.2} ({:.0}%)", costs.travel, costs.travel_percentage());
    println!(
        "     {:<15}{:>10.2} ({:.0}%)",
        format!("{}:", trip.accommodation_type.display_name()),
        costs.accommodation,
        costs.accommodation_percentage()
    );
    println!("     Food:          {:>10.2} ({:.0}%)", costs.food, costs.food_percentage());
    println!(
        "     Activities:    {:>10.2} ({:.0}%)",
        costs.activities,
        costs.activities_percentage()
    );
    println!(
        "     Miscellaneous: {:>10.2} ({:.0}%)",
        costs.miscellaneous,
        costs.miscellaneous_percentage()
    );
}
