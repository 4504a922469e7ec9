use serde::{Deserialize, Serialize};

use crate::error::ScenarioError;

/// Belief targeted by the default intervention.
pub const DEFAULT_INTERVENTION_BELIEF: &str = "Cycling is dangerous";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    pub output: OutputConfig,
    pub seed: SeedConfig,
    pub population: PopulationConfig,
    pub network: NetworkConfig,
    pub deltas: DeltasConfig,
    pub activations: ActivationsConfig,
    pub intervention: InterventionConfig,
    pub beliefs: BeliefsConfig,
    pub container: ContainerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct OutputConfig {
    pub dir: String,
    pub behaviours_file: String,
    pub beliefs_file: String,
    pub prs_file: String,
    pub agents_file: String,
    pub manifest_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct SeedConfig {
    /// Added to the scenario id to seed the generator.
    pub base: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct PopulationConfig {
    pub agents: usize,
    pub uuid_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct NetworkConfig {
    /// Lattice degree before rewiring (k).
    pub neighbours: usize,
    pub rewire_probability: f64,
    pub self_friendship_probability: f64,
    pub weight_mean: f64,
    pub weight_sd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct DeltasConfig {
    pub mean: f64,
    pub sd: f64,
    pub floor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ActivationsConfig {
    pub zero_probability: f64,
    pub sd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct InterventionConfig {
    pub enabled: bool,
    pub belief: String,
    pub probability: f64,
    pub mean: f64,
    pub sd: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields, default)]
pub struct BeliefsConfig {
    /// Belief sentences left out of the scenario.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct ContainerConfig {
    pub builder_image: String,
    pub runtime_image: String,
    pub binary_name: String,
    pub app_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            seed: SeedConfig::default(),
            population: PopulationConfig::default(),
            network: NetworkConfig::default(),
            deltas: DeltasConfig::default(),
            activations: ActivationsConfig::default(),
            intervention: InterventionConfig::default(),
            beliefs: BeliefsConfig::default(),
            container: ContainerConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
            behaviours_file: "behaviours.json".to_string(),
            beliefs_file: "beliefs.json".to_string(),
            prs_file: "prs.json".to_string(),
            agents_file: "agents.json.zst".to_string(),
            manifest_file: "manifest.json".to_string(),
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { base: 543_879 }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            agents: 5000,
            uuid_prefix: "agent_20221019v1_".to_string(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            neighbours: 10,
            rewire_probability: 0.3,
            self_friendship_probability: 0.8,
            weight_mean: 0.5,
            weight_sd: 0.15,
        }
    }
}

impl Default for DeltasConfig {
    fn default() -> Self {
        Self {
            mean: 1.0 - 0.001,
            sd: 0.1,
            floor: 0.0001,
        }
    }
}

impl Default for ActivationsConfig {
    fn default() -> Self {
        Self {
            zero_probability: 0.5,
            sd: 0.1,
        }
    }
}

impl Default for InterventionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            belief: DEFAULT_INTERVENTION_BELIEF.to_string(),
            probability: 0.4,
            mean: -0.5,
            sd: 0.15,
        }
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            builder_image: "rust:1.79-slim".to_string(),
            runtime_image: "debian:bookworm-slim".to_string(),
            binary_name: "generate-config".to_string(),
            app_dir: "/app".to_string(),
        }
    }
}

fn check_probability(field: &str, value: f64) -> Result<(), ScenarioError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ScenarioError::InvalidConfig {
            reason: format!("{field} must be within [0, 1], got {value}"),
        })
    }
}

fn check_finite(field: &str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScenarioError::InvalidConfig {
            reason: format!("{field} must be finite, got {value}"),
        })
    }
}

fn check_sd(field: &str, value: f64) -> Result<(), ScenarioError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScenarioError::InvalidConfig {
            reason: format!("{field} must be a positive number, got {value}"),
        })
    }
}

impl Config {
    /// Checks numeric ranges and output file names. Belief names need the
    /// catalogue and are checked by `scenario_generator::resolve_beliefs`,
    /// which `run_scenario` calls before touching the output directory.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.population.agents == 0 {
            return Err(ScenarioError::InvalidConfig {
                reason: "population.agents must be at least 1".to_string(),
            });
        }
        if self.network.neighbours >= self.population.agents {
            return Err(ScenarioError::InvalidConfig {
                reason: format!(
                    "network.neighbours ({}) must be smaller than population.agents ({})",
                    self.network.neighbours, self.population.agents
                ),
            });
        }

        check_probability("network.rewire_probability", self.network.rewire_probability)?;
        check_probability(
            "network.self_friendship_probability",
            self.network.self_friendship_probability,
        )?;
        check_probability("activations.zero_probability", self.activations.zero_probability)?;
        check_probability("intervention.probability", self.intervention.probability)?;

        check_sd("network.weight_sd", self.network.weight_sd)?;
        check_sd("deltas.sd", self.deltas.sd)?;
        check_sd("activations.sd", self.activations.sd)?;
        check_sd("intervention.sd", self.intervention.sd)?;

        check_finite("network.weight_mean", self.network.weight_mean)?;
        check_finite("deltas.mean", self.deltas.mean)?;
        check_finite("intervention.mean", self.intervention.mean)?;

        if !(self.deltas.floor.is_finite() && self.deltas.floor > 0.0) {
            return Err(ScenarioError::InvalidConfig {
                reason: "deltas.floor must be positive so every delta stays above zero"
                    .to_string(),
            });
        }

        let files = [
            ("output.behaviours_file", &self.output.behaviours_file),
            ("output.beliefs_file", &self.output.beliefs_file),
            ("output.prs_file", &self.output.prs_file),
            ("output.agents_file", &self.output.agents_file),
            ("output.manifest_file", &self.output.manifest_file),
        ];
        for (i, (field, name)) in files.iter().enumerate() {
            if name.is_empty()
                || name.as_str() == "."
                || name.as_str() == ".."
                || name.contains('/')
                || name.contains('\\')
            {
                return Err(ScenarioError::InvalidConfig {
                    reason: format!("{field} must be a plain file name, got {name:?}"),
                });
            }
            if let Some((other, _)) = files[..i].iter().find(|(_, prior)| prior == name) {
                return Err(ScenarioError::InvalidConfig {
                    reason: format!("{field} and {other} both name {name:?}"),
                });
            }
        }

        Ok(())
    }
}
