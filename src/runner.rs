//! Headless frame loop standing in for a windowed front end

use crate::automaton::{load_pattern_from_file, CellGrid, RuleType, Rules};
use crate::config::Settings;
use crate::simulation::{Controls, Simulator, Stats};
use crate::utils::format_hud_line;
use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

/// Final state of a headless run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub frames: u64,
    pub simulated_seconds: f64,
    pub generation: u64,
    pub rule: RuleType,
    pub rule_name: String,
    pub paused: bool,
    pub stats: Stats,
    pub grid: CellGrid,
}

/// Build the starting grid: the configured pattern centered on an empty grid,
/// or a random fill at `initial_density`.
pub fn build_grid(settings: &Settings, controls: &mut Controls) -> Result<CellGrid> {
    let mut grid = CellGrid::new(settings.grid.width, settings.grid.height)
        .context("Failed to create grid")?;

    match settings.grid.pattern_file {
        Some(ref path) => {
            let pattern = load_pattern_from_file(path)?;
            if pattern.width() > grid.width() || pattern.height() > grid.height() {
                log::warn!(
                    "pattern {}x{} is larger than the {}x{} grid and will be clipped",
                    pattern.width(),
                    pattern.height(),
                    grid.width(),
                    grid.height()
                );
            }
            let x0 = (grid.width() as isize - pattern.width() as isize) / 2;
            let y0 = (grid.height() as isize - pattern.height() as isize) / 2;
            grid.stamp(&pattern, x0, y0);
        }
        None => grid.randomize(settings.grid.initial_density, controls.rng_mut()),
    }

    Ok(grid)
}

/// Drive a simulation at a fixed frame rate for the configured duration.
///
/// Each frame applies any commands scheduled for it, advances the simulator by
/// one frame's worth of time, then samples stats. A HUD line is logged at
/// `info` level every `hud_interval_seconds`.
pub fn run_headless(settings: &Settings) -> Result<RunReport> {
    settings.validate().context("Configuration validation failed")?;

    let mut controls = match settings.grid.seed {
        Some(seed) => Controls::new(seed),
        None => Controls::from_entropy(),
    };
    let mut grid = build_grid(settings, &mut controls)?;

    let frame_delta = Duration::try_from_secs_f64(1.0 / settings.driver.frame_rate)
        .context("Frame rate out of range")?;
    let hud_interval = Duration::try_from_secs_f64(settings.driver.hud_interval_seconds)
        .context("HUD interval out of range")?;
    let total_frames = (settings.driver.duration_seconds * settings.driver.frame_rate).round() as u64;

    let mut scheduled = settings.driver.commands.clone();
    scheduled.sort_by_key(|scheduled| scheduled.frame);
    let mut scheduled = scheduled.into_iter().peekable();

    let mut sim = Simulator::new(&mut grid);
    sim.set_speed(settings.simulation.steps_per_second)?;
    sim.set_rule_type(settings.simulation.rule);
    sim.set_max_steps_per_update(settings.simulation.max_steps_per_update);
    sim.set_paused(settings.simulation.start_paused);

    let mut stats = Stats::new();
    let mut hud_timer = Duration::ZERO;

    log::info!(
        "running {}x{} grid with {} for {} frames",
        sim.grid().width(),
        sim.grid().height(),
        sim.rule_type(),
        total_frames
    );

    for frame in 0..total_frames {
        while let Some(entry) = scheduled.next_if(|entry| entry.frame <= frame) {
            if let Err(e) = controls.apply(&mut sim, entry.command) {
                log::warn!("frame {}: ignoring {:?}: {}", frame, entry.command, e);
            }
        }

        sim.update(frame_delta);
        stats.update(sim.grid(), frame_delta);

        hud_timer += frame_delta;
        if hud_timer >= hud_interval {
            log::info!("{}", format_hud_line(sim.rule_type(), sim.generation(), &stats));
            hud_timer = Duration::ZERO;
        }
    }

    Ok(RunReport {
        frames: total_frames,
        simulated_seconds: frame_delta.as_secs_f64() * total_frames as f64,
        generation: sim.generation(),
        rule: sim.rule_type(),
        rule_name: Rules::name(sim.rule_type()).to_string(),
        paused: sim.is_paused(),
        stats,
        grid: sim.grid().clone(),
    })
}
