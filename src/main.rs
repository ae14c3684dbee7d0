//! Command line front end for the cellular automaton simulator

use anyhow::{Context, Result};
use cellular_sim::{
    automaton::{create_example_patterns, load_pattern_from_file, RuleType},
    config::{CliOverrides, OutputFormat, Settings},
    run_headless,
    simulation::{Command, ScheduledCommand, Simulator},
    utils::{ColorOutput, GridFormatter},
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cellular_sim")]
#[command(about = "Two-state cellular automaton simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation at a fixed frame rate
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid width (overrides config)
        #[arg(long)]
        width: Option<usize>,

        /// Grid height (overrides config)
        #[arg(long)]
        height: Option<usize>,

        /// Initial fill probability (overrides config)
        #[arg(long)]
        density: Option<f64>,

        /// Random seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Pattern file to start from instead of a random fill
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Rule set: conway, seeds, highlife or day_night
        #[arg(short, long)]
        rule: Option<RuleType>,

        /// Steps per second (overrides config)
        #[arg(short, long)]
        speed: Option<f64>,

        /// Run length in seconds (overrides config)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Advance a pattern a number of generations
    Step {
        /// Pattern file
        pattern: PathBuf,

        /// Rule set: conway, seeds, highlife or day_night
        #[arg(short, long, default_value = "conway")]
        rule: RuleType,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Print every intermediate generation
        #[arg(long)]
        show_evolution: bool,
    },

    /// List the available rule sets
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Run { verbose: true, .. });
    init_logging(verbose);

    match cli.command {
        Commands::Run {
            config,
            width,
            height,
            density,
            seed,
            pattern,
            rule,
            speed,
            duration,
            json,
            verbose,
        } => {
            let overrides = CliOverrides {
                width,
                height,
                density,
                seed,
                pattern_file: pattern,
                rule,
                steps_per_second: speed,
                duration_seconds: duration,
                format: json.then_some(OutputFormat::Json),
            };
            run_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Step { pattern, rule, generations, show_evolution } => {
            step_command(pattern, rule, generations, show_evolution)
        }
        Commands::Rules => {
            println!("{}", GridFormatter::format_rule_list());
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .try_init();
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        log::warn!("config file {} not found, using defaults", config_path.display());
        Ok(Settings::default())
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&overrides);

    if verbose {
        println!("Configuration:");
        println!("  Grid: {}x{}", settings.grid.width, settings.grid.height);
        println!("  Rule: {}", settings.simulation.rule);
        println!("  Speed: {} steps/s", settings.simulation.steps_per_second);
        println!("  Duration: {}s at {} fps", settings.driver.duration_seconds, settings.driver.frame_rate);
        println!();
    }

    let report = run_headless(&settings).context("Simulation run failed")?;

    match settings.output.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("{}", ColorOutput::success("Simulation finished"));
            println!("{}", GridFormatter::format_report(&report, settings.output.show_final_grid));
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    for dir in [&config_dir, &pattern_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir).context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    // Pattern paths are resolved relative to the config file that names them
    let example_pattern = |name: &str| PathBuf::from("../../patterns").join(name);

    // Blinker on a small grid, seeded and short
    let mut blinker = Settings::default();
    blinker.grid.width = 7;
    blinker.grid.height = 7;
    blinker.grid.pattern_file = Some(example_pattern("blinker.txt"));
    blinker.driver.duration_seconds = 2.0;
    blinker.to_file(examples_dir.join("blinker.yaml"))?;

    // Replicator under HighLife
    let mut replicator = Settings::default();
    replicator.grid.width = 48;
    replicator.grid.height = 48;
    replicator.grid.pattern_file = Some(example_pattern("replicator.txt"));
    replicator.simulation.rule = RuleType::HighLife;
    replicator.simulation.steps_per_second = 10.0;
    replicator.to_file(examples_dir.join("replicator.yaml"))?;

    // Random soup that cycles through every rule
    let mut soup = Settings::default();
    soup.grid.width = 64;
    soup.grid.height = 48;
    soup.grid.seed = Some(42);
    soup.driver.duration_seconds = 20.0;
    soup.driver.commands = (1..RuleType::ALL.len() as u64)
        .map(|i| ScheduledCommand { frame: i * 300, command: Command::NextRule })
        .collect();
    soup.to_file(examples_dir.join("rule_cycle.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());
    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your own patterns to {}", pattern_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn step_command(pattern_path: PathBuf, rule: RuleType, generations: u64, show_evolution: bool) -> Result<()> {
    let mut grid = load_pattern_from_file(&pattern_path)
        .with_context(|| format!("Failed to load pattern from {}", pattern_path.display()))?;

    let mut sim = Simulator::new(&mut grid);
    sim.set_rule_type(rule);

    println!("{} ({})", ColorOutput::info(&rule.to_string()), rule.notation());
    println!("Generation 0 (Living: {}):", sim.grid().population());
    println!("{}", GridFormatter::format_grid_with_coords(sim.grid()));

    for _ in 0..generations {
        sim.step();
        if show_evolution {
            println!("Generation {} (Living: {}):", sim.generation(), sim.grid().population());
            println!("{}", sim.grid());
        }
    }

    if !show_evolution {
        println!("Generation {} (Living: {}):", sim.generation(), sim.grid().population());
        println!("{}", GridFormatter::format_grid_with_coords(sim.grid()));
    }

    if sim.grid().is_empty() {
        println!("{}", ColorOutput::warning("Pattern died out"));
    }

    Ok(())
}
