use crate::car::ParkedCar;
use crate::config::RaceConfig;
use crate::error::RaceError;
use crate::track::Track;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads the cars file, a JSON array of car records.
pub fn read_cars(path: &Path) -> Result<Vec<ParkedCar>, RaceError> {
    read_json(path)
}

/// Reads and validates the track file.
pub fn read_track(path: &Path) -> Result<Track, RaceError> {
    read_json(path)
}

/// Reads a config file, any value it leaves out keeps its default.
pub fn read_config(path: &Path) -> Result<RaceConfig, RaceError> {
    let config: RaceConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RaceError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
