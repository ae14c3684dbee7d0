//! Bounded 2-D cell grid with Moore-neighborhood queries

use crate::error::SimError;
use itertools::iproduct;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    #[inline]
    pub fn from_alive(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

/// Display color for a cell, each channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const DEAD: Rgb = Rgb { r: 0.1, g: 0.1, b: 0.15 };
}

/// Fixed-size, non-toroidal grid of cells stored row-major.
///
/// Every coordinate outside `[0, width) x [0, height)` reads as [`CellState::Dead`]
/// and ignores writes, so neighbor counting at the edges needs no special casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl CellGrid {
    /// Create an all-dead grid
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or(SimError::EmptyGrid { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![CellState::Dead; len],
        })
    }

    /// Create a grid from rows of booleans (`true` = alive)
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, SimError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(SimError::EmptyGrid { width, height });
        }

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(SimError::InvalidPattern(format!(
                "row {} has length {}, expected {}",
                i,
                row.len(),
                width
            )));
        }

        let cells = rows
            .into_iter()
            .flatten()
            .map(CellState::from_alive)
            .collect();

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Map in-range coordinates to their slot in `cells`
    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Cell state at `(x, y)`, `Dead` when out of range
    pub fn get_cell(&self, x: isize, y: isize) -> CellState {
        self.index(x, y)
            .map_or(CellState::Dead, |idx| self.cells[idx])
    }

    /// Set the cell at `(x, y)`; out-of-range coordinates are ignored
    pub fn set_cell(&mut self, x: isize, y: isize, state: CellState) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = state;
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Fill the grid at random: each cell is alive when a uniform draw in
    /// `[0, 1)` falls below `probability`.
    pub fn randomize<R: Rng + ?Sized>(&mut self, probability: f64, rng: &mut R) {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };

        for cell in &mut self.cells {
            *cell = CellState::from_alive(rng.gen::<f64>() < probability);
        }
    }

    /// Number of alive cells among the 8 Moore neighbors of `(x, y)`
    pub fn count_alive_neighbors(&self, x: isize, y: isize) -> u8 {
        iproduct!(-1isize..=1, -1isize..=1)
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter(|&(dx, dy)| match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(nx), Some(ny)) => self.get_cell(nx, ny).is_alive(),
                _ => false,
            })
            .count() as u8
    }

    /// Display color derived from a cell's state and neighbor count.
    ///
    /// Dead cells are near-black. Alive cells brighten with neighbor count and
    /// shift from blue (sparse) through cyan and green to yellow/red (crowded).
    pub fn cell_color(&self, x: isize, y: isize) -> Rgb {
        if !self.get_cell(x, y).is_alive() {
            return Rgb::DEAD;
        }

        let n = self.count_alive_neighbors(x, y) as f32;
        let intensity = 0.3 + (n / 8.0) * 0.7;

        if n <= 2.0 {
            Rgb { r: 0.0, g: n / 2.0 * 0.5, b: intensity }
        } else if n <= 4.0 {
            Rgb { r: 0.0, g: intensity, b: (4.0 - n) / 2.0 * intensity }
        } else if n <= 6.0 {
            Rgb { r: (n - 4.0) / 2.0 * intensity, g: intensity, b: 0.0 }
        } else {
            Rgb { r: intensity, g: (8.0 - n) / 2.0 * 0.5, b: 0.0 }
        }
    }

    /// Count of alive cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Coordinates `(x, y)` of every alive cell in row-major order
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| (idx % self.width, idx / self.width))
            .collect()
    }

    /// Copy the alive cells of `pattern` into this grid with its top-left
    /// corner at `(x0, y0)`. Cells landing outside the grid are dropped.
    pub fn stamp(&mut self, pattern: &CellGrid, x0: isize, y0: isize) {
        for (px, py) in pattern.living_cells() {
            self.set_cell(x0 + px as isize, y0 + py as isize, CellState::Alive);
        }
    }

    /// Exchange the cell storage with a buffer of identical length.
    /// Used to commit a whole generation at once.
    pub(crate) fn swap_cells(&mut self, next: &mut Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::swap(&mut self.cells, next);
    }
}

impl fmt::Display for CellGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let symbol = if cell.is_alive() { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_from(rows: &[&str]) -> CellGrid {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.chars().map(|c| c == '1').collect())
            .collect();
        CellGrid::from_rows(rows).unwrap()
    }

    #[test]
    fn test_display_rows() {
        let grid = grid_from(&["010", "001"]);
        assert_eq!(grid.to_string(), "⬜⬛⬜\n⬜⬜⬛\n");
    }

    #[test]
    fn test_grid_creation() {
        let grid = CellGrid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 12);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(matches!(CellGrid::new(0, 5), Err(SimError::EmptyGrid { .. })));
        assert!(matches!(CellGrid::new(5, 0), Err(SimError::EmptyGrid { .. })));
        assert!(CellGrid::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(matches!(CellGrid::from_rows(rows), Err(SimError::InvalidPattern(_))));
        assert!(CellGrid::from_rows(vec![]).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let mut grid = CellGrid::new(3, 2).unwrap();
        grid.set_cell(2, 1, CellState::Alive);
        assert_eq!(grid.cells()[3 + 2], CellState::Alive);
        assert_eq!(grid.living_cells(), vec![(2, 1)]);
    }

    #[test]
    fn test_out_of_range_reads_dead() {
        let mut grid = CellGrid::new(3, 3).unwrap();
        grid.randomize(1.0, &mut ChaCha8Rng::seed_from_u64(1));

        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3), (isize::MIN, isize::MAX)] {
            assert_eq!(grid.get_cell(x, y), CellState::Dead);
        }
    }

    #[test]
    fn test_out_of_range_writes_ignored() {
        let mut grid = CellGrid::new(3, 3).unwrap();
        let before = grid.clone();

        for (x, y) in [(-1, -1), (3, 1), (1, 3), (100, 100), (isize::MAX, 0)] {
            grid.set_cell(x, y, CellState::Alive);
        }

        assert_eq!(grid, before);
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = grid_from(&["111", "101", "111"]);

        assert_eq!(grid.count_alive_neighbors(1, 1), 8);
        // Corner sees two edge neighbors; the center is dead
        assert_eq!(grid.count_alive_neighbors(0, 0), 2);
        assert_eq!(grid.count_alive_neighbors(1, 0), 4);
    }

    #[test]
    fn test_no_wraparound() {
        let grid = grid_from(&["100", "000", "001"]);

        // Opposite corners would be neighbors on a torus
        assert_eq!(grid.count_alive_neighbors(0, 0), 0);
        assert_eq!(grid.count_alive_neighbors(2, 2), 0);
        assert_eq!(grid.count_alive_neighbors(1, 1), 2);
    }

    #[test]
    fn test_neighbor_count_outside_grid() {
        let grid = grid_from(&["11", "11"]);
        assert_eq!(grid.count_alive_neighbors(-1, -1), 1);
        assert_eq!(grid.count_alive_neighbors(2, 0), 2);
        assert_eq!(grid.count_alive_neighbors(isize::MAX, isize::MAX), 0);
    }

    #[test]
    fn test_randomize_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut grid = CellGrid::new(16, 16).unwrap();

        grid.randomize(0.0, &mut rng);
        assert!(grid.is_empty());

        grid.randomize(1.0, &mut rng);
        assert_eq!(grid.population(), 256);
    }

    #[test]
    fn test_randomize_is_reproducible() {
        let mut a = CellGrid::new(20, 20).unwrap();
        let mut b = CellGrid::new(20, 20).unwrap();

        a.randomize(0.3, &mut ChaCha8Rng::seed_from_u64(42));
        b.randomize(0.3, &mut ChaCha8Rng::seed_from_u64(42));

        assert_eq!(a, b);
        assert!(a.population() > 0 && a.population() < 400);
    }

    #[test]
    fn test_clear() {
        let mut grid = CellGrid::new(5, 5).unwrap();
        grid.randomize(1.0, &mut ChaCha8Rng::seed_from_u64(3));
        grid.clear();
        assert!(grid.is_empty());
    }

    #[test]
    fn test_cell_color() {
        let grid = grid_from(&["110", "000", "000"]);

        assert_eq!(grid.cell_color(2, 2), Rgb::DEAD);

        // One neighbor: blue band
        let color = grid.cell_color(0, 0);
        assert_eq!(color.r, 0.0);
        assert!(color.b > color.g);

        let full = grid_from(&["111", "111", "111"]);
        let center = full.cell_color(1, 1);
        assert!((center.r - 1.0).abs() < 1e-6);
        assert_eq!(center.b, 0.0);
    }

    #[test]
    fn test_stamp_clips_at_edges() {
        let pattern = grid_from(&["11", "11"]);
        let mut grid = CellGrid::new(3, 3).unwrap();

        grid.stamp(&pattern, 2, 2);
        assert_eq!(grid.living_cells(), vec![(2, 2)]);

        grid.stamp(&pattern, -1, -1);
        assert_eq!(grid.population(), 2);
    }
}
