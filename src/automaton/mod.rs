//! Cell grid, rule sets and pattern files

pub mod grid;
pub mod io;
pub mod rules;

pub use grid::{CellGrid, CellState, Rgb};
pub use io::{create_example_patterns, load_pattern_from_file, save_pattern_to_file};
pub use rules::{RuleType, Rules};
