use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Simulation time step. Serialized as a JSON object key ("0").
pub type TimeStep = u32;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BehaviourRecord {
    pub name: String,
    pub uuid: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BeliefRecord {
    pub name: String,
    pub uuid: Uuid,
    /// Behaviour uuid -> perception.
    pub perceptions: BTreeMap<Uuid, f64>,
    /// Belief uuid -> relationship strength.
    pub relationships: BTreeMap<Uuid, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PrsRecord {
    pub belief_uuid: Uuid,
    pub behaviour_uuid: Uuid,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AgentRecord {
    pub uuid: Uuid,
    /// Friend uuid -> edge weight.
    pub friends: BTreeMap<Uuid, f64>,
    pub deltas: BTreeMap<Uuid, f64>,
    pub activations: BTreeMap<TimeStep, BTreeMap<Uuid, f64>>,
    pub actions: BTreeMap<TimeStep, Uuid>,
}

impl AgentRecord {
    pub fn initial_action(&self) -> Option<Uuid> {
        self.actions.get(&0).copied()
    }

    pub fn initial_activations(&self) -> Option<&BTreeMap<Uuid, f64>> {
        self.activations.get(&0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub file: String,
    pub sha256: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub scenario_id: u64,
    pub seed: u64,
    pub generated_at: DateTime<Utc>,
    pub agents: usize,
    pub beliefs: usize,
    pub behaviours: usize,
    pub files: Vec<ManifestEntry>,
}
