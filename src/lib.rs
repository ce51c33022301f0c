pub mod car;
pub mod config;
pub mod crash;
pub mod error;
pub mod field;
pub mod lap_time;
pub mod overtake;
pub mod race;
pub mod reliability;
pub mod rng;
pub mod track;
pub mod utils;
