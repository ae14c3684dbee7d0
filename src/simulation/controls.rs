//! User-facing commands routed to a simulator through an explicit context

use super::Simulator;
use crate::automaton::RuleType;
use crate::error::SimError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Actions an input layer can trigger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    TogglePause,
    SetPaused(bool),
    Clear,
    Randomize(f64),
    NextRule,
    SetRule(RuleType),
    SetSpeed(f64),
    ResetGeneration,
}

/// A command to apply at a given frame of a headless run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub frame: u64,
    pub command: Command,
}

/// Owns the random source used by `Randomize` and applies commands.
pub struct Controls {
    rng: ChaCha8Rng,
}

impl Controls {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Apply `command`. Invalid arguments are rejected and leave the
    /// simulator and grid untouched.
    pub fn apply(&mut self, sim: &mut Simulator<'_>, command: Command) -> Result<(), SimError> {
        log::debug!("command: {:?}", command);

        match command {
            Command::TogglePause => sim.toggle_pause(),
            Command::SetPaused(paused) => sim.set_paused(paused),
            Command::Clear => sim.grid_mut().clear(),
            Command::Randomize(probability) => {
                if !(0.0..=1.0).contains(&probability) {
                    return Err(SimError::InvalidProbability(probability));
                }
                sim.grid_mut().randomize(probability, &mut self.rng);
            }
            Command::NextRule => sim.next_rule(),
            Command::SetRule(rule) => sim.set_rule_type(rule),
            Command::SetSpeed(steps_per_second) => sim.set_speed(steps_per_second)?,
            Command::ResetGeneration => sim.reset_generation(),
        }

        Ok(())
    }
}
