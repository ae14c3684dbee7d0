//! Pattern file I/O

use super::CellGrid;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a pattern from a text file.
/// Format: one row per line, `1`, `#` or `O` for alive cells and `0` or `.` for dead ones.
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<CellGrid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a pattern from its text representation
pub fn parse_pattern_from_string(content: &str) -> Result<CellGrid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].chars().count();
    let mut rows = Vec::with_capacity(lines.len());

    for (row_idx, line) in lines.iter().enumerate() {
        let len = line.chars().count();
        if len != width {
            anyhow::bail!(
                "Row {} has length {}, expected {} (all rows must have the same length)",
                row_idx,
                len,
                width
            );
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col_idx, ch)| match ch {
                '1' | '#' | 'O' => Ok(true),
                '0' | '.' => Ok(false),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {})",
                    ch,
                    row_idx,
                    col_idx
                ),
            })
            .collect::<Result<Vec<bool>>>()?;
        rows.push(row);
    }

    Ok(CellGrid::from_rows(rows)?)
}

/// Save a pattern to a text file, creating parent directories
pub fn save_pattern_to_file<P: AsRef<Path>>(grid: &CellGrid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, pattern_to_string(grid))
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))
}

/// Text representation using `1`/`0`
pub fn pattern_to_string(grid: &CellGrid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for row in grid.cells().chunks(grid.width()) {
        result.extend(row.iter().map(|cell| if cell.is_alive() { '1' } else { '0' }));
        result.push('\n');
    }

    result
}

/// Write a handful of well-known patterns into `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        // Spaceship
        ("glider.txt", "00100\n10100\n01100\n00000\n00000\n"),
        // Period-2 oscillator
        ("blinker.txt", "000\n111\n000\n"),
        // Still life
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        // Period-2 oscillator
        ("beacon.txt", "110000\n110000\n001100\n001100\n"),
        // HighLife replicator
        ("replicator.txt", "00111\n01001\n10001\n10010\n11100\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
