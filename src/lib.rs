//! Two-state cellular automaton simulator
//!
//! A bounded grid evolved by Conway, Seeds, HighLife or Day & Night rules on a
//! fixed timestep that is independent of the caller's frame rate.

pub mod automaton;
pub mod config;
pub mod error;
pub mod runner;
pub mod simulation;
pub mod utils;

pub use automaton::{CellGrid, CellState, RuleType, Rules};
pub use config::Settings;
pub use error::SimError;
pub use runner::{run_headless, RunReport};
pub use simulation::{Command, Controls, Simulator, Stats};
