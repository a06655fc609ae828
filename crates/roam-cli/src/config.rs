//! Simulation configuration loading and validation.

use std::path::Path;

use anyhow::{ensure, Context, Result};
use roam_agent::{BehaviorConfig, BodyConfig};
use serde::{Deserialize, Serialize};

/// Full simulation configuration, loaded from a YAML or JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents spawned in the arena
    pub agents: usize,

    /// Agents `0..players` are on the player team, the rest are enemies.
    /// A player agent touching an enemy is destroyed.
    pub players: usize,

    /// Delay before a destroyed agent respawns, in seconds
    pub respawn_seconds: f64,

    /// Global seed; each agent derives its own random streams from it
    pub seed: u64,

    /// Fixed simulation step, in seconds
    pub tick_seconds: f64,

    /// Arena bounds and agent size
    pub arena: ArenaConfig,

    /// Kinematic body tuning shared by all agents
    pub body: BodyConfig,

    /// Behavior durations and turn-direction policy
    pub behavior: BehaviorConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agents: 7,
            players: 1,
            respawn_seconds: 3.0,
            seed: 0,
            tick_seconds: 0.02,
            arena: ArenaConfig::default(),
            body: BodyConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

/// Rectangular arena centered on the origin, walls on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub half_width: f32,
    pub half_depth: f32,
    pub agent_radius: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_width: 20.0,
            half_depth: 20.0,
            agent_radius: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Load and validate; `.json` files are parsed as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.tick_seconds.is_finite() && self.tick_seconds > 0.0,
            "tick_seconds must be positive, got {}",
            self.tick_seconds
        );

        ensure!(
            self.players <= self.agents,
            "players ({}) cannot exceed agents ({})",
            self.players,
            self.agents
        );
        ensure!(
            self.respawn_seconds.is_finite() && self.respawn_seconds >= 0.0,
            "respawn_seconds must be non-negative, got {}",
            self.respawn_seconds
        );

        let arena = &self.arena;
        ensure!(
            arena.half_width.is_finite() && arena.half_depth.is_finite(),
            "arena half extents must be finite, got {} x {}",
            arena.half_width,
            arena.half_depth
        );
        ensure!(
            arena.agent_radius.is_finite() && arena.agent_radius > 0.0,
            "arena.agent_radius must be positive, got {}",
            arena.agent_radius
        );
        ensure!(
            arena.half_width > arena.agent_radius && arena.half_depth > arena.agent_radius,
            "arena ({} x {}) is too small for agents of radius {}",
            arena.half_width,
            arena.half_depth,
            arena.agent_radius
        );

        ensure!(
            self.body.move_speed.is_finite() && self.body.move_speed >= 0.0,
            "body.move_speed must be non-negative, got {}",
            self.body.move_speed
        );
        ensure!(
            self.body.rotation_speed.is_finite(),
            "body.rotation_speed must be finite"
        );

        self.behavior.validate().context("Invalid behavior config")?;
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid_and_round_trips_through_yaml() {
        let config = SimulationConfig::default();
        config.validate().unwrap();

        let yaml = config.to_yaml().unwrap();
        let parsed: SimulationConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "agents: 3\nbehavior:\n  sign_bias: skewed\n  durations:\n    idle: {{ min: 0.0, max: 0.5 }}"
        )
        .unwrap();

        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.agents, 3);
        assert_eq!(config.behavior.durations.idle.max, 0.5);
        assert_eq!(config.behavior.durations.forward_move.min, 1.0);
        assert_eq!(config.tick_seconds, 0.02);
    }

    #[test]
    fn json_files_are_parsed_as_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{ "seed": 42, "arena": {{ "half_width": 10.0 }} }}"#).unwrap();

        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.arena.half_width, 10.0);
        assert_eq!(config.arena.half_depth, 20.0);
    }

    #[test]
    fn inverted_duration_is_rejected_at_load() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "behavior:\n  durations:\n    rotation: {{ min: 3.0, max: 1.0 }}"
        )
        .unwrap();

        let err = SimulationConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("rotate"), "{err:#}");
    }

    #[test]
    fn unbounded_arena_is_rejected() {
        let mut config = SimulationConfig::default();
        config.arena.half_width = f32::INFINITY;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("finite"), "{err}");

        let mut config = SimulationConfig::default();
        config.arena.half_depth = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn team_and_respawn_settings_are_checked() {
        let config = SimulationConfig {
            agents: 2,
            players: 3,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());

        let config = SimulationConfig {
            respawn_seconds: -1.0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = SimulationConfig::load(Path::new("/nonexistent/roam.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/roam.yaml"));
    }
}
