mod cli;

use anyhow::Context;
use clap::Parser;

use aqrun_service::cities::{CITY_REGISTRY, random_nearby_cities};
use aqrun_service::config::Config;
use aqrun_service::ingest::openweather::OpenWeatherClient;
use aqrun_service::logging::{self, LogLevel};
use aqrun_service::report::{self, Location};
use aqrun_service::verify;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let level = if cli.verbose { LogLevel::Debug } else { config.log_level };
    let log_file = cli.log_file.as_deref().or(config.log_file.as_deref());
    logging::init_logger(level, log_file, log_file.is_some())
        .with_context(|| format!("failed to open log file {:?}", log_file))?;
    config.warn_if_incomplete();

    match cli.command {
        Commands::Report { city, lat, lon, nearby, json } => {
            let location = match (city, lat, lon) {
                (Some(name), _, _) => Location::City(name),
                (None, Some(lat), Some(lon)) => Location::Coords { lat, lon },
                _ => anyhow::bail!("either a city or both --lat and --lon are required"),
            };
            let client = OpenWeatherClient::new(&config)?;
            let dashboard = report::build_dashboard(&client, &location, nearby)
                .with_context(|| format!("could not build dashboard for {}", location))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
            } else {
                print!("{}", report::render(&dashboard, &chrono::Local));
            }
        }
        Commands::Nearby { city, count } => {
            let cities = random_nearby_cities(&city, count);
            if cities.is_empty() {
                println!("No nearby cities known for {}", city);
            }
            for c in cities {
                println!("{}, {} ({} km)", c.name, c.country, c.distance_km);
            }
        }
        Commands::Verify => {
            let client = OpenWeatherClient::new(&config)?;
            let report = verify::verify_provider(&client, CITY_REGISTRY);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
