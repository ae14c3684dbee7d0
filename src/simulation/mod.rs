//! Time stepping, controls and statistics

pub mod controls;
pub mod simulator;
pub mod stats;

pub use controls::{Command, Controls, ScheduledCommand};
pub use simulator::Simulator;
pub use stats::Stats;
