//! Clear-sky energy for one day at one location.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use insolation::energy::{format_energy, integrate};
use insolation::irradiance::{calculate_samples, daily_inputs, Location, TimeBasis};

#[derive(Parser)]
#[command(name = "daily-energy")]
#[command(author, version, about = "Clear-sky solar energy over one day", long_about = None)]
struct Cli {
    /// Latitude in degrees, north positive
    #[arg(long, default_value_t = 40.713, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive
    #[arg(long, default_value_t = -74.006, allow_hyphen_values = true)]
    lon: f64,

    /// Calendar date, YYYY-MM-DD
    #[arg(long, default_value = "2025-03-03")]
    date: NaiveDate,

    /// Seconds between samples
    #[arg(long, default_value_t = 3600)]
    step: u64,

    /// How to read the sample times: `local` (standard time) or `utc`
    #[arg(long, default_value = "local")]
    basis: TimeBasis,

    /// Evaluate samples in parallel
    #[arg(long)]
    parallel: bool,

    /// Print every sample before the total
    #[arg(long)]
    samples: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting tracing subscriber")?;

    let location = Location::new(cli.lat, cli.lon)?;
    let inputs = daily_inputs(&location, cli.date, cli.step, cli.basis, cli.parallel)
        .context("building the sample schedule")?;
    info!(date = %cli.date, lat = cli.lat, lon = cli.lon, "sampling day");

    let samples = calculate_samples(&inputs);
    if cli.samples {
        for sample in &samples {
            println!("{:>6} s  {:>9.3} W/m²", sample.time_offset_seconds, sample.intensity);
        }
    }
    let energy = integrate(&samples).context("integrating samples")?;
    println!("{}", format_energy(energy));
    Ok(())
}
