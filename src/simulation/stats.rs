//! Population and frame-rate sampling

use crate::automaton::CellGrid;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Read-only observer of the grid and frame cadence.
///
/// Population is rescanned on every update. FPS is a stepped estimate that
/// changes at most once per one-second window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    population: usize,
    peak_population: usize,
    fps: f64,
    #[serde(skip)]
    frame_count: u32,
    #[serde(skip)]
    time_accumulator: Duration,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame
    pub fn update(&mut self, grid: &CellGrid, delta: Duration) {
        self.population = grid.population();
        self.peak_population = self.peak_population.max(self.population);

        self.frame_count = self.frame_count.saturating_add(1);
        self.time_accumulator = self.time_accumulator.saturating_add(delta);

        if self.time_accumulator >= SAMPLE_WINDOW {
            self.fps = self.frame_count as f64 / self.time_accumulator.as_secs_f64();
            self.frame_count = 0;
            self.time_accumulator = Duration::ZERO;
        }
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Highest population observed since construction
    pub fn peak_population(&self) -> usize {
        self.peak_population
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Population: {:4} | FPS: {:.1}", self.population, self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::CellState;

    #[test]
    fn test_population_tracks_grid() {
        let mut grid = CellGrid::new(4, 4).unwrap();
        let mut stats = Stats::new();

        grid.set_cell(0, 0, CellState::Alive);
        grid.set_cell(3, 3, CellState::Alive);
        stats.update(&grid, Duration::from_millis(16));
        assert_eq!(stats.population(), 2);

        grid.clear();
        stats.update(&grid, Duration::from_millis(16));
        assert_eq!(stats.population(), 0);
        assert_eq!(stats.peak_population(), 2);
    }

    #[test]
    fn test_fps_updates_once_per_window() {
        let grid = CellGrid::new(2, 2).unwrap();
        let mut stats = Stats::new();

        for _ in 0..9 {
            stats.update(&grid, Duration::from_millis(100));
        }
        // 0.9 s observed, window not complete yet
        assert_eq!(stats.fps(), 0.0);

        stats.update(&grid, Duration::from_millis(100));
        assert!((stats.fps() - 10.0).abs() < 1e-6);

        // Next window starts from zero; value holds until it completes
        stats.update(&grid, Duration::from_millis(500));
        assert!((stats.fps() - 10.0).abs() < 1e-6);
        stats.update(&grid, Duration::from_millis(500));
        assert!((stats.fps() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_long_frame_closes_window() {
        let grid = CellGrid::new(2, 2).unwrap();
        let mut stats = Stats::new();

        stats.update(&grid, Duration::from_secs(4));
        assert!((stats.fps() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_huge_frame_time_saturates() {
        let grid = CellGrid::new(2, 2).unwrap();
        let mut stats = Stats::new();

        stats.update(&grid, Duration::from_millis(500));
        stats.update(&grid, Duration::MAX);

        assert!(stats.fps() > 0.0 && stats.fps() < 1e-9);
        assert_eq!(stats.population(), 0);
    }

    #[test]
    fn test_display() {
        let mut grid = CellGrid::new(3, 3).unwrap();
        grid.set_cell(1, 1, CellState::Alive);
        let mut stats = Stats::new();
        stats.update(&grid, Duration::from_secs(1));

        assert_eq!(stats.to_string(), "Population:    1 | FPS: 1.0");
    }
}
