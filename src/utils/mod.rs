pub mod analytics;
pub mod input;
