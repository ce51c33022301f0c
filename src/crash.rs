use crate::config::RaceConfig;
use crate::rng::RandomSource;

/// Chance that a car running at `time_a` crashes while fighting a car at `time_b`.
/// The closer the two cars, the higher the chance; at `crash_threshold` apart it is zero.
pub fn crash_probability(time_a: f64, time_b: f64, config: &RaceConfig) -> f64 {
    config.crash_base_factor * (1.0 - (time_a - time_b).abs() / config.crash_threshold)
}

/// Decides whether the car at `time_a` crashed.
///
/// Each car in an encounter is checked on its own, so both or neither may crash.
/// Draws an integer in `0..100` and crashes when it is strictly below the
/// probability in percent.
pub fn crashed<R: RandomSource>(time_a: f64, time_b: f64, config: &RaceConfig, rng: &mut R) -> bool {
    let probability = crash_probability(time_a, time_b, config);
    let draw = rng.int_inclusive(0, 99);
    f64::from(draw) < probability * 100.0
}
