//! Roam CLI - headless host for autonomous roaming agents.
//!
//! Single binary that provides:
//! - `roam run` - simulate agents in a walled arena and print a summary
//! - `roam config` - print the default configuration as YAML
//! - `roam check` - validate a configuration file

mod config;
mod sim;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::SimulationConfig;
use crate::sim::{Simulation, SimulationSummary, Team};

#[derive(Parser)]
#[command(name = "roam")]
#[command(about = "Headless host for autonomous roaming agents", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fixed number of simulation ticks
    Run {
        /// Configuration file (YAML, or JSON with a .json extension)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of ticks to simulate
        #[arg(long, default_value_t = 3000)]
        ticks: u64,

        /// Override the configured agent count
        #[arg(long)]
        agents: Option<usize>,

        /// Override the configured seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the default configuration
    Config,

    /// Validate a configuration file
    Check {
        /// Configuration file to validate
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            agents,
            seed,
            json,
        } => run(config.as_deref(), ticks, agents, seed, json),
        Commands::Config => {
            print!("{}", SimulationConfig::default().to_yaml()?);
            Ok(())
        }
        Commands::Check { path } => check(&path),
    }
}

fn run(
    config_path: Option<&Path>,
    ticks: u64,
    agents: Option<usize>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let mut config = SimulationConfig::load_or_default(config_path)?;
    if let Some(agents) = agents {
        config.agents = agents;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }

    tracing::info!(
        agents = config.agents,
        seed = config.seed,
        ticks,
        tick_seconds = config.tick_seconds,
        "Starting simulation"
    );

    let mut simulation = Simulation::new(config)?;
    simulation.run(ticks)?;
    let summary = simulation.finish();
    tracing::info!(
        ticks = summary.ticks,
        elapsed_seconds = summary.elapsed_seconds,
        "Simulation finished"
    );

    if json {
        let out = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{out}");
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn check(path: &Path) -> Result<()> {
    let config = SimulationConfig::load(path)?;
    println!(
        "{}: ok ({} agents, seed {}, tick {}s)",
        path.display(),
        config.agents,
        config.seed,
        config.tick_seconds
    );
    Ok(())
}

fn print_summary(summary: &SimulationSummary) {
    println!("Roam Simulation Summary");
    println!("=======================");
    println!();
    println!(
        "Ticks: {} ({:.2}s simulated)",
        summary.ticks, summary.elapsed_seconds
    );
    println!();
    println!(
        "{:>4}  {:>6}  {:>13}  {:>9}  {:>9}  {:>7}  {:>11}  {:>5}  {:>6}  {:>9}",
        "id", "team", "behavior", "x", "z", "yaw", "activations", "walls", "agents", "destroyed"
    );
    for agent in &summary.agents {
        let team = match agent.team {
            Team::Player => "player",
            Team::Enemy => "enemy",
        };
        let behavior = match (agent.active, agent.behavior) {
            (false, _) => "destroyed",
            (true, Some(name)) => name,
            (true, None) => "-",
        };
        println!(
            "{:>4}  {:>6}  {:>13}  {:>9.2}  {:>9.2}  {:>7.1}  {:>11}  {:>5}  {:>6}  {:>9}",
            agent.id,
            team,
            behavior,
            agent.position[0],
            agent.position[2],
            agent.yaw_degrees,
            agent.activations,
            agent.wall_hits,
            agent.agent_hits,
            agent.destroyed
        );
    }
}
