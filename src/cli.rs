use std::path::PathBuf;

use clap::{Parser, Subcommand};

use aqrun_service::cities::DEFAULT_NEARBY_COUNT;

#[derive(Parser)]
#[command(name = "aqrun")]
#[command(version)]
#[command(about = "Air quality and weather advice for outdoor runners")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch weather and air quality and print running advice
    Report {
        /// City name, optionally with a country code ("Paris,FR")
        #[arg(required_unless_present = "lat", conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Number of nearby cities to list
        #[arg(long, default_value_t = DEFAULT_NEARBY_COUNT)]
        nearby: usize,

        /// Print the dashboard as JSON
        #[arg(long)]
        json: bool,
    },

    /// List nearby cities (no network)
    Nearby {
        city: String,

        #[arg(short, long, default_value_t = DEFAULT_NEARBY_COUNT)]
        count: usize,
    },

    /// Check the API key and provider against every registered city
    Verify,
}
