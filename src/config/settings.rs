//! Configuration settings for the cellular automaton simulator

use crate::automaton::RuleType;
use crate::simulation::simulator::{DEFAULT_MAX_STEPS_PER_UPDATE, DEFAULT_STEPS_PER_SECOND};
use crate::simulation::ScheduledCommand;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub simulation: SimulationConfig,
    pub driver: DriverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub initial_density: f64,
    /// Fixed seed for reproducible grids; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Pattern stamped at the grid center instead of a random fill
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub rule: RuleType,
    pub steps_per_second: f64,
    pub start_paused: bool,
    /// `null` lets a single update catch up without limit
    pub max_steps_per_update: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverConfig {
    pub frame_rate: f64,
    pub duration_seconds: f64,
    pub hud_interval_seconds: f64,
    #[serde(default)]
    pub commands: Vec<ScheduledCommand>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_final_grid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 20,
                height: 20,
                initial_density: 0.3,
                seed: None,
                pattern_file: None,
            },
            simulation: SimulationConfig {
                rule: RuleType::Conway,
                steps_per_second: DEFAULT_STEPS_PER_SECOND,
                start_paused: false,
                max_steps_per_update: Some(DEFAULT_MAX_STEPS_PER_UPDATE),
            },
            driver: DriverConfig {
                frame_rate: 60.0,
                duration_seconds: 10.0,
                hud_interval_seconds: 1.0,
                commands: Vec::new(),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_final_grid: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    ///
    /// A relative `pattern_file` is resolved against the directory holding the
    /// config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(base) = path.parent() {
            settings.grid.pattern_file = settings
                .grid
                .pattern_file
                .take()
                .map(|pattern| if pattern.is_relative() { base.join(pattern) } else { pattern });
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if !(0.0..=1.0).contains(&self.grid.initial_density) {
            anyhow::bail!(
                "Initial density must be within [0, 1], got {}",
                self.grid.initial_density
            );
        }

        if let Some(ref pattern) = self.grid.pattern_file {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        if !self.simulation.steps_per_second.is_finite() || self.simulation.steps_per_second <= 0.0 {
            anyhow::bail!(
                "Steps per second must be positive, got {}",
                self.simulation.steps_per_second
            );
        }

        if self.simulation.max_steps_per_update == Some(0) {
            anyhow::bail!("Maximum steps per update must be positive (use null for no limit)");
        }

        if !self.driver.frame_rate.is_finite() || self.driver.frame_rate <= 0.0 {
            anyhow::bail!("Frame rate must be positive, got {}", self.driver.frame_rate);
        }

        if !self.driver.duration_seconds.is_finite() || self.driver.duration_seconds < 0.0 {
            anyhow::bail!(
                "Duration must be a non-negative number of seconds, got {}",
                self.driver.duration_seconds
            );
        }

        if !self.driver.hud_interval_seconds.is_finite() || self.driver.hud_interval_seconds <= 0.0 {
            anyhow::bail!(
                "HUD interval must be positive, got {}",
                self.driver.hud_interval_seconds
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(density) = cli_overrides.density {
            self.grid.initial_density = density;
        }
        if let Some(seed) = cli_overrides.seed {
            self.grid.seed = Some(seed);
        }
        if let Some(ref pattern) = cli_overrides.pattern_file {
            self.grid.pattern_file = Some(pattern.clone());
        }
        if let Some(rule) = cli_overrides.rule {
            self.simulation.rule = rule;
        }
        if let Some(speed) = cli_overrides.steps_per_second {
            self.simulation.steps_per_second = speed;
        }
        if let Some(duration) = cli_overrides.duration_seconds {
            self.driver.duration_seconds = duration;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub density: Option<f64>,
    pub seed: Option<u64>,
    pub pattern_file: Option<PathBuf>,
    pub rule: Option<RuleType>,
    pub steps_per_second: Option<f64>,
    pub duration_seconds: Option<f64>,
    pub format: Option<OutputFormat>,
}
