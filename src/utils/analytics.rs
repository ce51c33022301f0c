use crate::race::{Grid, RaceResult};
use serde::Serialize;

/// Counters collected over a session. They only ever go up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RaceStats {
    pub successful_passes: u32,
    pub unsuccessful_passes: u32,
    pub lead_changes: u32,
    pub crashes: u32,
    pub retirements: u32,
}

impl RaceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// A completed pass, `for_lead` when the passed car was in P1.
    pub fn record_pass(&mut self, for_lead: bool) {
        self.successful_passes += 1;
        if for_lead {
            self.lead_changes += 1;
        }
    }

    pub fn record_failed_passes(&mut self, attempts: u32) {
        self.unsuccessful_passes += attempts;
    }

    pub fn record_crash(&mut self, leader_involved: bool) {
        self.crashes += 1;
        if leader_involved {
            self.lead_changes += 1;
        }
    }

    pub fn record_retirement(&mut self, was_leader: bool) {
        self.retirements += 1;
        if was_leader {
            self.lead_changes += 1;
        }
    }
}

const RULE: &str =
    "--------------------------------------------------------------------------------------------";

/// Prints the starting grid
pub fn print_grid(grid: &Grid) {
    println!("{RULE}");
    println!(
        "{0: <5} | {1: <8} | {2: <25} | {3: <25} | {4: <12}",
        "Grid", "Car #", "Driver", "Team", "Qualifying"
    );
    println!("{RULE}");
    for entry in grid.entries() {
        println!(
            "{0: <5} | {1: <8} | {2: <25} | {3: <25} | {4: <12.4}",
            entry.grid_position, entry.car_number, entry.driver_name, entry.team_name, entry.lap_time
        );
    }
    println!();
}

/// Prints the final classification followed by the race statistics
pub fn print_standings(result: &RaceResult) {
    println!("{RULE}");
    println!(
        "{0: <5} | {1: <8} | {2: <25} | {3: <25} | {4: <12} | {5: <6}",
        "Pos", "Car #", "Driver", "Team", "Race Time", "Health"
    );
    println!("{RULE}");
    for car in result.standings.iter() {
        let time = match car.race_time {
            Some(t) => format!("{t:.4}"),
            None => String::from("DNF"),
        };
        println!(
            "{0: <5} | {1: <8} | {2: <25} | {3: <25} | {4: <12} | {5: <6}",
            car.position, car.car_number, car.driver_name, car.team_name, time, car.health
        );
    }
    println!("{RULE}");

    let stats = &result.stats;
    println!("Successful passes:   {}", stats.successful_passes);
    println!("Unsuccessful passes: {}", stats.unsuccessful_passes);
    println!("Lead changes:        {}", stats.lead_changes);
    println!("Crashes:             {}", stats.crashes);
    println!("Retirements:         {}", stats.retirements);
}
