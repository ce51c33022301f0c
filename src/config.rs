use crate::error::RaceError;
use serde::{Deserialize, Serialize};

/// Tunables of the race engine.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides. Times are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// How far item times spread around the base time
    pub randomness_factor: f64,
    /// Divisor applied to the summed rating difference
    pub rating_weight: f64,
    /// Lower bound of the per-item random multiplier (one decimal place)
    pub multiplier_low: f64,
    /// Upper bound of the per-item random multiplier (one decimal place)
    pub multiplier_high: f64,
    /// Rating gap used when car and item ratings cancel out exactly
    pub zero_gap_floor: f64,
    /// Scales how likely a crash is
    pub crash_base_factor: f64,
    /// Cars closer than this may crash while fighting for position
    pub crash_threshold: f64,
    /// Time advantage needed for a clean pass
    pub pass_threshold: f64,
    /// Gap under which driver skill decides a contest, also the cost of a near miss
    pub skill_threshold: f64,
    /// Time a defender loses by driving defensively
    pub defender_penalty: f64,
    /// Time an attacker loses by failing to pass
    pub attacker_penalty: f64,
    /// Time between grid slots at the start of the race
    pub start_penalty: f64,
    /// Mechanical failures a car survives before it retires
    pub starting_health: u32,
    /// Scales car reliability against track difficulty
    pub failure_factor: f64,
    /// Upper bound on the chance to pass a reliability check
    pub max_breakdown_resistance: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            randomness_factor: 0.1,
            rating_weight: 1.0,
            multiplier_low: 0.8,
            multiplier_high: 1.2,
            zero_gap_floor: 0.1,
            crash_base_factor: 1.0,
            crash_threshold: 0.5,
            pass_threshold: 0.5,
            skill_threshold: 0.1,
            defender_penalty: 0.2,
            attacker_penalty: 0.5,
            start_penalty: 0.25,
            starting_health: 3,
            failure_factor: 1.0,
            max_breakdown_resistance: 0.99,
        }
    }
}

impl RaceConfig {
    pub fn validate(&self) -> Result<(), RaceError> {
        let positive = [
            ("rating_weight", self.rating_weight),
            ("crash_threshold", self.crash_threshold),
            ("pass_threshold", self.pass_threshold),
        ];
        for (name, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("randomness_factor", self.randomness_factor),
            ("crash_base_factor", self.crash_base_factor),
            ("skill_threshold", self.skill_threshold),
            ("defender_penalty", self.defender_penalty),
            ("attacker_penalty", self.attacker_penalty),
            ("start_penalty", self.start_penalty),
            ("failure_factor", self.failure_factor),
            ("max_breakdown_resistance", self.max_breakdown_resistance),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }

        if self.multiplier_low.is_nan()
            || self.multiplier_low < 0.0
            || self.multiplier_high.is_nan()
            || self.multiplier_low > self.multiplier_high
        {
            return Err(invalid(format!(
                "multiplier range {}..={} is empty or negative",
                self.multiplier_low, self.multiplier_high
            )));
        }
        for (name, value) in [
            ("multiplier_low", self.multiplier_low),
            ("multiplier_high", self.multiplier_high),
        ] {
            let tenths = value * 10.0;
            if (tenths - tenths.round()).abs() > 1e-9 {
                return Err(invalid(format!(
                    "{name} must be a whole number of tenths, got {value}"
                )));
            }
        }
        if self.starting_health == 0 {
            return Err(invalid("starting_health must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Multiplier bounds expressed in tenths, the granularity of the draw.
    /// Bounds between two tenths are narrowed inwards, never widened.
    pub fn multiplier_tenths(&self) -> (u32, u32) {
        (
            (self.multiplier_low * 10.0 - 1e-9).ceil() as u32,
            (self.multiplier_high * 10.0 + 1e-9).floor() as u32,
        )
    }
}

fn invalid(message: String) -> RaceError {
    RaceError::InvalidConfig(message)
}
