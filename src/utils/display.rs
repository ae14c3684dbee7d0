//! Display and output formatting utilities

use crate::automaton::{CellGrid, RuleType, Rules};
use crate::runner::RunReport;
use crate::simulation::Stats;
use itertools::Itertools;

/// Format grids and run results for the console
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &CellGrid) -> String {
        grid.cells()
            .chunks(grid.width())
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_alive() { '█' } else { '·' })
                    .collect::<String>()
            })
            .map(|row| row + "\n")
            .collect()
    }

    /// Format a grid with column and row numbers
    pub fn format_grid_with_coords(grid: &CellGrid) -> String {
        let mut output = String::from("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for cell in row {
                output.push_str(if cell.is_alive() { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Summary of a headless run
    pub fn format_report(report: &RunReport, show_grid: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("Rule: {} ({})\n", report.rule_name, report.rule.notation()));
        output.push_str(&format!(
            "Frames: {} ({:.2}s simulated)\n",
            report.frames, report.simulated_seconds
        ));
        output.push_str(&format!("Generation: {}\n", report.generation));
        output.push_str(&format!(
            "Population: {} (peak {})\n",
            report.stats.population(),
            report.stats.peak_population()
        ));
        output.push_str(&format!("FPS: {:.1}\n", report.stats.fps()));
        output.push_str(&format!("State: {}\n", if report.paused { "paused" } else { "running" }));

        if show_grid {
            output.push_str(&format!(
                "\nFinal grid ({}x{}):\n",
                report.grid.width(),
                report.grid.height()
            ));
            output.push_str(&Self::format_grid_compact(&report.grid));
        }

        output
    }

    /// One line per rule: name and B/S notation
    pub fn format_rule_list() -> String {
        RuleType::ALL
            .iter()
            .map(|&rule| format!("{:<24} {}", Rules::name(rule), rule.notation()))
            .join("\n")
    }
}

/// Status line shown once per HUD interval
pub fn format_hud_line(rule: RuleType, generation: u64, stats: &Stats) -> String {
    format!("{} | Gen: {} | {}", Rules::name(rule), generation, stats)
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::CellState;
    use std::time::Duration;

    fn sample_grid() -> CellGrid {
        CellGrid::from_rows(vec![
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let grid = sample_grid();

        assert_eq!(GridFormatter::format_grid_compact(&grid), "█·█\n·█·\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_hud_line() {
        let mut grid = CellGrid::new(4, 4).unwrap();
        grid.set_cell(1, 1, CellState::Alive);
        let mut stats = Stats::new();
        stats.update(&grid, Duration::from_millis(500));

        assert_eq!(
            format_hud_line(RuleType::HighLife, 12, &stats),
            "HighLife | Gen: 12 | Population:    1 | FPS: 0.0"
        );
    }

    #[test]
    fn test_rule_list() {
        let list = GridFormatter::format_rule_list();
        assert_eq!(list.lines().count(), 4);
        assert!(list.contains("B3678/S34678"));
        assert!(list.starts_with("Conway's Game of Life"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Either colored or plain depending on the terminal
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
