use crate::car::{Car, ParkedCar};
use crate::config::RaceConfig;
use crate::error::RaceError;
use crate::field::Field;
use crate::lap_time::item_time;
use crate::overtake::resolve_passes;
use crate::reliability;
use crate::rng::RandomSource;
use crate::track::{Track, TrackItem};
use crate::utils::analytics::RaceStats;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info};

pub type Num = u64;

/// Struct representing a race weekend: one qualifying session followed by
/// a race over `laps` laps.
pub struct Race {
    track: Track,
    cars: Vec<ParkedCar>,
    laps: Num,
    config: RaceConfig,
}

/// A car's slot on the starting grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridEntry {
    pub car_number: String,
    pub driver_name: String,
    pub team_name: String,
    pub lap_time: f64,
    pub grid_position: usize,
}

/// Starting order produced by qualifying, pole first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    entries: Vec<GridEntry>,
}

impl Grid {
    pub fn entries(&self) -> &[GridEntry] {
        &self.entries
    }

    pub fn position_of(&self, car_number: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|e| e.car_number == car_number)
            .map(|e| e.grid_position)
    }
}

/// Final classification of a race plus what happened along the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceResult {
    pub standings: Vec<Car>,
    pub stats: RaceStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Weekend {
    pub grid: Grid,
    pub result: RaceResult,
}

impl Race {
    pub fn new(
        track: Track,
        laps: Num,
        cars: Vec<ParkedCar>,
        config: RaceConfig,
    ) -> Result<Self, RaceError> {
        if cars.is_empty() {
            return Err(RaceError::NoCars);
        }
        if laps == 0 {
            return Err(RaceError::NoLaps);
        }
        let mut numbers = HashSet::new();
        for car in cars.iter() {
            if !numbers.insert(car.car_number.as_str()) {
                return Err(RaceError::DuplicateCar(car.car_number.clone()));
            }
        }
        config.validate()?;
        Ok(Self {
            track,
            cars,
            laps,
            config,
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn laps(&self) -> Num {
        self.laps
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Runs qualifying, lines the cars up and runs the race.
    pub fn run_weekend<R: RandomSource>(&self, rng: &mut R) -> Result<Weekend, RaceError> {
        let grid = self.run_qualifying(rng)?;
        let result = self.run_race(&grid, rng)?;
        Ok(Weekend { grid, result })
    }

    /// Every car drives one lap on an empty track, the quickest starts on pole.
    /// Mechanical failures are switched off and equal times keep entry order.
    pub fn run_qualifying<R: RandomSource>(&self, rng: &mut R) -> Result<Grid, RaceError> {
        let mut laps = Vec::with_capacity(self.cars.len());
        for parked in self.cars.iter() {
            let lap_time = self.qualifying_lap(parked, rng)?;
            debug!(car = %parked.car_number, lap_time, "qualifying lap");
            laps.push((parked, lap_time));
        }
        laps.sort_by(|a, b| a.1.total_cmp(&b.1));

        let entries = laps
            .into_iter()
            .enumerate()
            .map(|(i, (parked, lap_time))| GridEntry {
                car_number: parked.car_number.clone(),
                driver_name: parked.driver_name.clone(),
                team_name: parked.team_name.clone(),
                lap_time,
                grid_position: i + 1,
            })
            .collect::<Vec<_>>();
        if let Some(pole) = entries.first() {
            info!(car = %pole.car_number, lap_time = pole.lap_time, "pole position");
        }
        Ok(Grid { entries })
    }

    fn qualifying_lap<R: RandomSource>(
        &self,
        parked: &ParkedCar,
        rng: &mut R,
    ) -> Result<f64, RaceError> {
        let mut field = Field::new(vec![Car::for_qualifying(parked, &self.config)])?;
        let mut stats = RaceStats::new();
        for item in self.track.items() {
            run_track_item(&mut field, item, None, &self.config, rng, &mut stats);
        }
        Ok(field.cars()[0].race_time.unwrap_or(f64::INFINITY))
    }

    /// Lines the cars up as the grid says, each slot behind pole starting
    /// `start_penalty` seconds down.
    pub fn starting_field(&self, grid: &Grid) -> Result<Field, RaceError> {
        let cars = self
            .cars
            .iter()
            .enumerate()
            .map(|(i, parked)| {
                let slot = grid
                    .position_of(&parked.car_number)
                    .unwrap_or(grid.entries.len() + i + 1);
                Car::from_parked_car(parked, slot, &self.config)
            })
            .collect();
        Field::new(cars)
    }

    /// Runs the race from the given grid.
    pub fn run_race<R: RandomSource>(
        &self,
        grid: &Grid,
        rng: &mut R,
    ) -> Result<RaceResult, RaceError> {
        let mut field = self.starting_field(grid)?;
        let mut stats = RaceStats::new();
        let rating = self.track.reliability_rating();

        for lap in 1..=self.laps {
            for item in self.track.items() {
                run_track_item(&mut field, item, Some(rating), &self.config, rng, &mut stats);
            }
            // overtakes on the run to the line settle before the next lap
            resolve_passes(&mut field, &self.config, rng, &mut stats);
            debug!(lap, running = field.running(), "lap complete");
        }
        field.reorder(rng);

        if let Some(winner) = field.leader() {
            info!(
                winner = %winner.car_number,
                running = field.running(),
                crashes = stats.crashes,
                retirements = stats.retirements,
                "race finished"
            );
        }
        Ok(RaceResult {
            standings: field.into_cars(),
            stats,
        })
    }
}

/// Drives the whole field through one track item.
///
/// Every running car gets its item time, then one overtaking sweep runs.
/// At a sector or lap end every running car takes a reliability check
/// against `track_rating`; `None` skips the checks (qualifying).
pub fn run_track_item<R: RandomSource>(
    field: &mut Field,
    item: &TrackItem,
    track_rating: Option<f64>,
    config: &RaceConfig,
    rng: &mut R,
    stats: &mut RaceStats,
) {
    for car in field.cars_mut() {
        if car.health > 0 {
            let time = item_time(item, car, config, rng);
            car.add_time(time);
        }
    }

    resolve_passes(field, config, rng, stats);

    if !item.triggers_reliability_check() {
        return;
    }
    if let Some(rating) = track_rating {
        run_reliability_checks(field, rating, config, rng, stats);
    }
}

fn run_reliability_checks<R: RandomSource>(
    field: &mut Field,
    track_rating: f64,
    config: &RaceConfig,
    rng: &mut R,
    stats: &mut RaceStats,
) {
    // positions shift when a car retires, so go by car number
    let running = field
        .cars()
        .iter()
        .filter(|c| c.is_running())
        .map(|c| c.car_number.clone())
        .collect::<Vec<_>>();

    for number in running {
        let Some(index) = field.index_of(&number) else {
            continue;
        };
        if !reliability::failed(&field.cars()[index], track_rating, config, rng) {
            continue;
        }
        let car = field.car_mut(index);
        let retired = car.take_damage();
        debug!(car = %number, health = car.health, "mechanical failure");
        if retired {
            info!(car = %number, "retired with mechanical failure");
            field.reorder(rng);
            stats.record_retirement(index == 0);
        }
    }
}
