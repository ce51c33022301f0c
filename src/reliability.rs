use crate::car::Car;
use crate::config::RaceConfig;
use crate::rng::RandomSource;

/// Chance of the car surviving one reliability check on a track of the given
/// difficulty, capped at `max_breakdown_resistance`.
pub fn breakdown_resistance(car: &Car, track_rating: f64, config: &RaceConfig) -> f64 {
    let ratio = config.failure_factor * car.reliability / track_rating;
    ratio.min(config.max_breakdown_resistance)
}

/// Runs one reliability check, `true` means a mechanical failure.
///
/// Draws an integer in `1..=100` and fails when it is strictly above the
/// resistance in percent. Note the crash check uses `0..100` and a strict
/// "below" instead.
pub fn failed<R: RandomSource>(
    car: &Car,
    track_rating: f64,
    config: &RaceConfig,
    rng: &mut R,
) -> bool {
    let resistance = breakdown_resistance(car, track_rating, config);
    let draw = rng.int_inclusive(1, 100);
    f64::from(draw) > resistance * 100.0
}
