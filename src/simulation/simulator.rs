//! Fixed-timestep simulation driver

use crate::automaton::{CellGrid, CellState, RuleType, Rules};
use crate::error::SimError;
use std::time::Duration;

pub const DEFAULT_STEPS_PER_SECOND: f64 = 5.0;
pub const DEFAULT_MAX_STEPS_PER_UPDATE: u32 = 64;

/// Advances a borrowed [`CellGrid`] one generation at a time.
///
/// Elapsed frame time is accumulated and converted into whole steps of
/// `update_interval`, so the long-run step rate does not depend on how often
/// [`Simulator::update`] is called. The simulator starts paused.
pub struct Simulator<'g> {
    grid: &'g mut CellGrid,
    paused: bool,
    update_interval: Duration,
    accumulator: Duration,
    max_steps_per_update: Option<u32>,
    current_rule: RuleType,
    generation: u64,
    scratch: Vec<CellState>,
}

impl<'g> Simulator<'g> {
    pub fn new(grid: &'g mut CellGrid) -> Self {
        let scratch = vec![CellState::Dead; grid.cells().len()];
        Self {
            grid,
            paused: true,
            update_interval: Duration::from_secs_f64(1.0 / DEFAULT_STEPS_PER_SECOND),
            accumulator: Duration::ZERO,
            max_steps_per_update: Some(DEFAULT_MAX_STEPS_PER_UPDATE),
            current_rule: RuleType::default(),
            generation: 0,
            scratch,
        }
    }

    pub fn grid(&self) -> &CellGrid {
        &*self.grid
    }

    /// Mutable access for edits between steps (clear, randomize, drawing)
    pub fn grid_mut(&mut self) -> &mut CellGrid {
        &mut *self.grid
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the simulation rate. Rejects zero, negative and non-finite rates,
    /// and rates fast enough that the step interval rounds to zero.
    pub fn set_speed(&mut self, steps_per_second: f64) -> Result<(), SimError> {
        if !steps_per_second.is_finite() || steps_per_second <= 0.0 {
            return Err(SimError::InvalidSpeed(steps_per_second));
        }

        let interval = Duration::try_from_secs_f64(1.0 / steps_per_second)
            .map_err(|_| SimError::InvalidSpeed(steps_per_second))?;
        if interval.is_zero() {
            return Err(SimError::InvalidSpeed(steps_per_second));
        }

        log::debug!("speed set to {} steps/s ({:?} per step)", steps_per_second, interval);
        self.update_interval = interval;
        Ok(())
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn steps_per_second(&self) -> f64 {
        1.0 / self.update_interval.as_secs_f64()
    }

    /// Limit catch-up steps per [`Simulator::update`] call; `None` removes the cap
    pub fn set_max_steps_per_update(&mut self, max_steps: Option<u32>) {
        self.max_steps_per_update = max_steps;
    }

    pub fn max_steps_per_update(&self) -> Option<u32> {
        self.max_steps_per_update
    }

    pub fn rule_type(&self) -> RuleType {
        self.current_rule
    }

    pub fn set_rule_type(&mut self, rule: RuleType) {
        log::debug!("rule set to {}", rule);
        self.current_rule = rule;
    }

    pub fn next_rule(&mut self) {
        self.set_rule_type(self.current_rule.next());
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reset_generation(&mut self) {
        self.generation = 0;
    }

    /// Time carried over toward the next step
    pub fn accumulator(&self) -> Duration {
        self.accumulator
    }

    /// Feed elapsed time and run as many whole steps as it pays for.
    /// Returns the number of steps executed; always 0 while paused.
    pub fn update(&mut self, delta: Duration) -> usize {
        if self.paused {
            return 0;
        }

        self.accumulator = self.accumulator.saturating_add(delta);

        let mut steps = 0usize;
        while self.accumulator >= self.update_interval {
            if self.max_steps_per_update.is_some_and(|max| steps >= max as usize) {
                let dropped = self.accumulator.as_nanos() / self.update_interval.as_nanos();
                log::warn!(
                    "catch-up limit of {} steps reached, dropping {} pending steps",
                    steps,
                    dropped
                );
                self.accumulator = remainder(self.accumulator, self.update_interval);
                break;
            }

            self.step();
            self.accumulator -= self.update_interval;
            steps += 1;
        }

        steps
    }

    /// Compute one full generation from the committed grid, then commit it.
    ///
    /// Every cell is evaluated against the current generation only; results go
    /// into the scratch buffer, which is swapped into the grid afterwards and
    /// reused on the next call.
    pub fn step(&mut self) {
        let width = self.grid.width();
        let rule = self.current_rule;

        if self.scratch.len() != self.grid.cells().len() {
            self.scratch.resize(self.grid.cells().len(), CellState::Dead);
        }

        for (idx, next) in self.scratch.iter_mut().enumerate() {
            let (x, y) = ((idx % width) as isize, (idx / width) as isize);
            let neighbors = self.grid.count_alive_neighbors(x, y);
            *next = Rules::apply(rule, self.grid.get_cell(x, y), neighbors);
        }

        self.grid.swap_cells(&mut self.scratch);
        self.generation += 1;
    }
}

/// `time mod interval`; the result is below `interval` so it always fits a Duration
fn remainder(time: Duration, interval: Duration) -> Duration {
    const NANOS_PER_SEC: u128 = 1_000_000_000;
    let nanos = time.as_nanos() % interval.as_nanos();
    Duration::new((nanos / NANOS_PER_SEC) as u64, (nanos % NANOS_PER_SEC) as u32)
}
