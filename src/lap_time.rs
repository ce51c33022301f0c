use crate::car::Car;
use crate::config::RaceConfig;
use crate::rng::RandomSource;
use crate::track::TrackItem;

/// Time in seconds for `car` to get through `item`.
///
/// `base_time + randomness_factor * rating_gap * multiplier`, where the
/// multiplier is drawn with one decimal place from the configured range.
/// Overtaking, defending and incidents are handled elsewhere.
pub fn item_time<R: RandomSource>(
    item: &TrackItem,
    car: &Car,
    config: &RaceConfig,
    rng: &mut R,
) -> f64 {
    let multiplier = draw_multiplier(config, rng);
    item_time_with_multiplier(item, car, config, multiplier)
}

pub fn item_time_with_multiplier(
    item: &TrackItem,
    car: &Car,
    config: &RaceConfig,
    multiplier: f64,
) -> f64 {
    item.base_time + config.randomness_factor * rating_gap(item, car, config) * multiplier
}

/// How far the car falls short of what the item demands.
/// Negative means the car is better than the item and gains time.
pub fn rating_gap(item: &TrackItem, car: &Car, config: &RaceConfig) -> f64 {
    let gap = (item.power - car.power + item.handling - car.handling) / config.rating_weight;
    // matched ratings would pin every car to the base time
    if gap == 0.0 {
        config.zero_gap_floor
    } else {
        gap
    }
}

pub fn draw_multiplier<R: RandomSource>(config: &RaceConfig, rng: &mut R) -> f64 {
    let (low, high) = config.multiplier_tenths();
    f64::from(rng.int_inclusive(low, high)) / 10.0
}
