use crate::config::RaceConfig;
use serde::{Deserialize, Serialize};

/// Struct used for initialization of cars.
/// This struct specifies the static information about a car and its driver,
/// exactly as it is read from the cars file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkedCar {
    pub car_number: String,
    pub driver_name: String,
    pub team_name: String,
    pub power: f64,
    pub handling: f64,
    pub reliability: f64,
    pub driver_skill: f64,
}

impl ParkedCar {
    pub fn new(car_number: &str, driver_name: &str, team_name: &str) -> Self {
        Self {
            car_number: String::from(car_number),
            driver_name: String::from(driver_name),
            team_name: String::from(team_name),
            power: 0.0,
            handling: 0.0,
            reliability: 1.0,
            driver_skill: 0.0,
        }
    }

    pub fn with_ratings(mut self, power: f64, handling: f64) -> Self {
        self.power = power;
        self.handling = handling;
        self
    }

    pub fn with_reliability(mut self, reliability: f64) -> Self {
        self.reliability = reliability;
        self
    }

    pub fn with_driver_skill(mut self, driver_skill: f64) -> Self {
        self.driver_skill = driver_skill;
        self
    }
}

/// Actual car taking part in a session.
///
/// `race_time` is `None` once the car is out of the session (DNF), and that
/// only ever happens together with `health` dropping to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Car {
    pub car_number: String,
    pub driver_name: String,
    pub team_name: String,
    pub power: f64,
    pub handling: f64,
    pub reliability: f64,
    pub driver_skill: f64,
    pub race_time: Option<f64>,
    pub position: usize,
    pub health: u32,
}

impl Car {
    /// Converts a parked car into a car lined up on the grid.
    /// Each session gets fresh state, nothing carries over from a previous one.
    pub fn from_parked_car(car: &ParkedCar, grid_position: usize, config: &RaceConfig) -> Self {
        let slots_behind_pole = grid_position.saturating_sub(1) as f64;
        Self {
            car_number: car.car_number.clone(),
            driver_name: car.driver_name.clone(),
            team_name: car.team_name.clone(),
            power: car.power,
            handling: car.handling,
            reliability: car.reliability,
            driver_skill: car.driver_skill,
            race_time: Some(config.start_penalty * slots_behind_pole),
            position: grid_position,
            health: config.starting_health,
        }
    }

    /// A car running a qualifying lap on its own: no start penalty, alone in P1.
    pub fn for_qualifying(car: &ParkedCar, config: &RaceConfig) -> Self {
        Self::from_parked_car(car, 1, config)
    }

    pub fn is_running(&self) -> bool {
        self.race_time.is_some()
    }

    /// Takes the car out of the session for good.
    pub fn retire(&mut self) {
        self.health = 0;
        self.race_time = None;
    }

    /// Applies one mechanical failure, returns `true` when it ends the car's race.
    pub fn take_damage(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.race_time = None;
            return true;
        }
        false
    }

    /// Adds `seconds` to a running car, retired cars keep no time.
    pub fn add_time(&mut self, seconds: f64) {
        if let Some(time) = self.race_time.as_mut() {
            *time += seconds;
        }
    }
}
