use std::io;
use thiserror::Error;

/// Error types for race setup and input loading.
///
/// Crashes, mechanical failures and retirements are not errors, they are
/// recorded as state on the affected car.
#[derive(Debug, Error)]
pub enum RaceError {
    /// A session was started with an empty field
    #[error("no cars entered")]
    NoCars,
    /// The track has no items to drive through
    #[error("track has no items")]
    EmptyTrack,
    /// The race distance is zero laps
    #[error("race needs at least one lap")]
    NoLaps,
    /// Two cars share the same car number
    #[error("duplicate car number {0}")]
    DuplicateCar(String),
    /// Two track items share the same id
    #[error("duplicate track item {0}")]
    DuplicateItem(String),
    /// Reliability rating is used as a divisor, so it must be positive
    #[error("track reliability rating must be positive, got {0}")]
    InvalidTrackRating(f64),
    /// A tunable is out of its allowed range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// IO error while reading an input file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Input file is not valid JSON for the expected record
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
