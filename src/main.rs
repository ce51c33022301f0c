use anyhow::{Context, Result, bail};
use clap::Parser;
use race_weekend::config::RaceConfig;
use race_weekend::race::{Num, Race};
use race_weekend::rng::RngSource;
use race_weekend::track::Track;
use race_weekend::utils::analytics::{print_grid, print_standings};
use race_weekend::utils::input::{read_cars, read_config, read_track};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Simulates a race weekend: qualifying and a race", long_about = None)]
struct Args {
    /// JSON file with the entered cars
    #[arg(short, long)]
    cars: PathBuf,

    /// JSON file with the track
    #[arg(short, long)]
    track: PathBuf,

    /// Number of laps, asked for on stdin when missing
    #[arg(short, long)]
    laps: Option<Num>,

    /// Seed for a reproducible weekend
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding engine tunables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Skip the race duration confirmation
    #[arg(short, long)]
    yes: bool,

    /// Print the result as JSON instead of tables
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let cars = read_cars(&args.cars)
        .with_context(|| format!("failed to load cars from {}", args.cars.display()))?;
    let track = read_track(&args.track)
        .with_context(|| format!("failed to load track from {}", args.track.display()))?;
    let config = match &args.config {
        Some(path) => read_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => RaceConfig::default(),
    };

    let laps = match (args.laps, args.yes) {
        (Some(laps), true) => laps,
        (laps, _) => confirm_laps(&track, laps)?,
    };

    let race = Race::new(track, laps, cars, config)?;
    let weekend = match args.seed {
        Some(seed) => race.run_weekend(&mut RngSource::seeded(seed))?,
        None => race.run_weekend(&mut RngSource::from_os_rng())?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&weekend)?);
    } else {
        print_grid(&weekend.grid);
        print_standings(&weekend.result);
    }
    Ok(())
}

/// Asks for the lap count (unless given) and for confirmation of the
/// estimated race duration, asking again until the user agrees.
/// All prompting happens on stderr.
fn confirm_laps(track: &Track, mut laps: Option<Num>) -> Result<Num> {
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    loop {
        let chosen = match laps.take() {
            Some(l) => l,
            None => read_laps(&mut reader)?,
        };
        let minutes = track.estimated_duration(chosen) / 60.0;
        let answer = prompt(
            &mut reader,
            &format!(
                "The estimated race time is {minutes:.2} minutes long. Continue with {chosen} laps? (yes/no) "
            ),
        )?;
        if answer.to_lowercase().contains("yes") {
            eprintln!("Continuing with {chosen} laps.");
            return Ok(chosen);
        }
    }
}

fn read_laps(reader: &mut impl BufRead) -> Result<Num> {
    loop {
        let answer = prompt(reader, "Please type the number of laps you'd like to race: ")?;
        match answer.parse::<Num>() {
            Ok(laps) => return Ok(laps),
            Err(_) => eprintln!("Please try again. Only insert whole integer numbers."),
        }
    }
}

fn prompt(reader: &mut impl BufRead, message: &str) -> Result<String> {
    // prompts go to stderr so stdout only carries results
    eprint!("{message}");
    io::stderr().flush()?;
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        bail!("stdin closed before an answer was given");
    }
    Ok(line.trim().to_string())
}
