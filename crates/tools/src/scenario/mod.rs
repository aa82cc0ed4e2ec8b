pub mod config;
pub mod runner;

pub use config::{PieceSpec, Scenario, Step};
pub use runner::{Encounter, Replay, StepRecord};
