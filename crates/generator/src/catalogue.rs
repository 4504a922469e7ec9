//! Fixed behaviour and belief tables of the commuting concept model.
//!
//! Rows are indexed by belief, columns by behaviour (perceptions, PRS) or by
//! belief (relationships), both in catalogue order.

use uuid::Uuid;

use crate::distribution::TruncatedNormal;
use crate::ids::{behaviour_uuid, belief_uuid};
use scenario_models::{BehaviourRecord, ScenarioError};

pub const BEHAVIOURS: [&str; 4] = ["Walk", "Cycle", "PT", "Drive"];

pub const BELIEFS: [&str; 20] = [
    "I care about the environment",
    "I want to get to work quickly",
    "I care about the social importance of the car",
    "I want to keep fit",
    "I do not want to perform exercise on my commute",
    "Cycling is hard work",
    "I'm not fit enough to walk",
    "I don't think cycling is cool / fun",
    "Car driving is more convenient",
    "I'm scared of getting hit by a car",
    "My bike might get stolen",
    "Cycling is dangerous",
    "I get to see the environment when I cycle",
    "Walking allows me to experience the environment",
    "I feel unsafe walking",
    "Driving / PT allows me to get to work not sweaty",
    "The traffic is too bad to drive",
    "Driving lets me get to work on time",
    "PT is unreliable",
    "My car is bad",
];

pub const N_BEHAVIOURS: usize = BEHAVIOURS.len();
pub const N_BELIEFS: usize = BELIEFS.len();

const W: f64 = 0.1 / 3.0;
const N: f64 = 0.05 / 3.0;

/// (mean, sd) of each belief's perception of each behaviour.
/// The PRS table reuses these parameters with independent draws.
pub const PERCEPTIONS: [[(f64, f64); N_BEHAVIOURS]; N_BELIEFS] = [
    [(0.6, W), (0.7, W), (0.4, W), (-0.9, W)],
    [(-0.3, W), (0.0, W), (0.1, W), (0.5, W)],
    [(0.0, W), (0.0, W), (-0.3, W), (0.8, W)],
    [(0.4, W), (0.8, W), (0.0, W), (-0.3, W)],
    [(-0.3, W), (-0.6, W), (0.1, N), (0.1, N)],
    [(0.0, N), (-0.8, W), (0.0, N), (0.0, N)],
    [(-0.8, W), (-0.8, W), (0.1, N), (0.1, N)],
    [(0.0, N), (-0.2, W), (0.0, N), (0.0, N)],
    [(0.0, N), (0.0, N), (-0.1, N), (0.5, W)],
    [(-0.2, W), (-0.7, W), (0.0, N), (0.0, N)],
    [(0.0, N), (-0.5, W), (0.0, N), (0.0, N)],
    [(0.0, N), (-0.5, W), (0.2, W), (0.2, W)],
    [(0.2, W), (0.7, W), (-0.1, W), (-0.1, W)],
    [(0.7, W), (0.2, W), (-0.1, W), (-0.1, W)],
    [(-0.5, W), (-0.1, W), (0.1, W), (0.1, W)],
    [(-0.1, W), (-0.5, W), (0.3, W), (0.3, W)],
    [(0.4, W), (0.4, W), (-0.3, W), (-0.9, W)],
    [(0.0, N), (0.0, N), (-0.1, W), (0.6, W)],
    [(0.3, W), (0.3, W), (-0.9, W), (0.4, W)],
    [(0.2, W), (0.2, W), (0.2, W), (-0.3, W)],
];

/// Mean influence of belief (row) on belief (column); every sd is `0.1 / 3`.
pub const RELATIONSHIPS: [[f64; N_BELIEFS]; N_BELIEFS] = [
    [0.0, -0.2, -0.2, 0.0, -0.1, -0.1, 0.0, -0.2, -0.1, 0.2,
     0.0, 0.0, 0.4, 0.4, 0.0, -0.1, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.2, 0.0, 0.1, -0.1, 0.1, 0.3, 0.5, 0.0,
     0.1, 0.1, 0.0, 0.0, 0.0, 0.4, 0.0, 0.4, 0.2, 0.0],
    [-0.3, 0.2, 0.0, 0.0, 0.2, 0.1, 0.0, 0.5, 0.3, 0.0,
     -0.1, -0.1, -0.1, -0.1, 0.0, 0.3, -0.5, 0.3, 0.3, -0.2],
    [0.0, -0.1, -0.1, 0.0, -0.5, -0.4, -0.3, -0.2, -0.1, -0.1,
     0.0, -0.2, 0.2, 0.2, -0.2, -0.4, 0.0, 0.0, 0.0, 0.0],
    [-0.1, 0.2, 0.1, -0.5, 0.0, 0.4, 0.3, 0.3, 0.3, 0.1,
     0.1, 0.3, -0.2, -0.2, 0.1, 0.5, 0.0, 0.3, 0.0, 0.0],
    [-0.2, 0.2, 0.2, -0.2, 0.2, 0.0, 0.1, 0.2, 0.3, 0.0,
     0.1, 0.2, -0.1, 0.0, 0.0, 0.5, 0.0, 0.2, 0.0, 0.0],
    [0.0, 0.1, 0.1, 0.0, 0.5, 0.5, 0.0, 0.0, 0.2, 0.0,
     0.0, 0.0, 0.0, -0.1, -0.1, 0.2, 0.0, 0.1, 0.0, 0.0],
    [-0.2, 0.2, 0.2, -0.1, 0.1, 0.5, 0.0, 0.0, 0.4, 0.3,
     0.3, 0.4, -0.5, 0.0, 0.0, 0.4, 0.0, 0.3, 0.0, 0.0],
    [-0.2, 0.4, 0.3, -0.1, 0.2, 0.2, 0.1, 0.2, 0.0, 0.0,
     0.1, 0.1, -0.2, -0.2, 0.1, 0.4, 0.0, 0.5, -0.3, -0.3],
    [0.0, 0.1, 0.0, 0.0, 0.1, 0.0, 0.0, 0.1, 0.3, 0.0,
     0.1, 0.6, -0.2, -0.2, 0.6, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.1, 0.1, 0.0, 0.1, 0.0, 0.0, 0.1, 0.2, 0.0,
     0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.3, 0.1, 0.6,
     0.0, 0.0, -0.3, 0.0, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.5, -0.2, -0.3, 0.1, -0.1, -0.5, 0.0, -0.5, -0.1, -0.2,
     -0.1, -0.2, 0.0, 0.4, -0.1, -0.1, 0.0, -0.1, 0.0, 0.0],
    [0.5, -0.3, -0.3, 0.1, -0.1, -0.1, -0.3, -0.1, -0.2, -0.2,
     0.0, 0.0, 0.4, 0.0, -0.5, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.1, 0.0, 0.0, 0.2, 0.0, 0.0, 0.3, 0.3, 0.6,
     0.0, 0.5, -0.2, -0.4, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [-0.3, 0.4, 0.4, -0.3, 0.6, 0.4, 0.2, 0.4, 0.5, 0.0,
     0.0, 0.0, -0.3, -0.3, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.3, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
     0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.1],
    [-0.3, 0.6, 0.3, -0.2, 0.4, 0.3, 0.1, 0.3, 0.6, 0.0,
     0.1, 0.1, -0.3, -0.3, 0.0, 0.4, -0.5, 0.0, 0.4, -0.2],
    [-0.1, 0.6, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.4, 0.0,
     0.0, 0.0, 0.1, 0.1, 0.0, 0.0, 0.1, 0.4, 0.0, 0.0],
    [0.0, 0.2, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, -0.1, 0.0,
     0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

pub const RELATIONSHIP_SD: f64 = W;

/// Behaviours paired with their ids, in catalogue order.
pub fn behaviours() -> Vec<BehaviourRecord> {
    BEHAVIOURS
        .iter()
        .map(|name| BehaviourRecord {
            name: (*name).to_string(),
            uuid: behaviour_uuid(name),
        })
        .collect()
}

pub fn belief_index(sentence: &str) -> Option<usize> {
    BELIEFS.iter().position(|b| *b == sentence)
}

/// A belief that takes part in the scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct IncludedBelief {
    /// Position in [`BELIEFS`].
    pub index: usize,
    pub name: &'static str,
    pub uuid: Uuid,
}

/// Resolves the exclusion list against the catalogue, keeping catalogue order.
pub fn included_beliefs(exclude: &[String]) -> Result<Vec<IncludedBelief>, ScenarioError> {
    for name in exclude {
        if belief_index(name).is_none() {
            return Err(ScenarioError::UnknownBelief { name: name.clone() });
        }
    }

    let included: Vec<IncludedBelief> = BELIEFS
        .iter()
        .enumerate()
        .filter(|(_, name)| !exclude.iter().any(|e| e.as_str() == **name))
        .map(|(index, name)| IncludedBelief {
            index,
            name: *name,
            uuid: belief_uuid(name),
        })
        .collect();

    if included.is_empty() {
        return Err(ScenarioError::InvalidConfig {
            reason: "every belief was excluded".to_string(),
        });
    }
    Ok(included)
}

pub fn perception_distribution(
    belief: usize,
    behaviour: usize,
) -> Result<TruncatedNormal, ScenarioError> {
    let (mean, sd) = PERCEPTIONS[belief][behaviour];
    TruncatedNormal::unit(mean, sd)
}

pub fn relationship_distribution(from: usize, to: usize) -> Result<TruncatedNormal, ScenarioError> {
    TruncatedNormal::unit(RELATIONSHIPS[from][to], RELATIONSHIP_SD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_is_a_valid_distribution() {
        for belief in 0..N_BELIEFS {
            for behaviour in 0..N_BEHAVIOURS {
                assert!(perception_distribution(belief, behaviour).is_ok());
            }
            for other in 0..N_BELIEFS {
                assert!(relationship_distribution(belief, other).is_ok());
            }
        }
    }

    #[test]
    fn cycling_is_dangerous_sits_at_index_eleven() {
        assert_eq!(belief_index("Cycling is dangerous"), Some(11));
        assert_eq!(belief_index("Cycling is fun"), None);
    }

    #[test]
    fn exclusion_keeps_catalogue_order() {
        let included = included_beliefs(&["I want to keep fit".to_string()]).unwrap();
        assert_eq!(included.len(), N_BELIEFS - 1);
        assert_eq!(included[2].index, 2);
        assert_eq!(included[3].index, 4);
    }

    #[test]
    fn exclusion_rejects_unknown_and_total_exclusion() {
        let err = included_beliefs(&["Skating is cool".to_string()]).unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownBelief { .. }));

        let everything: Vec<String> = BELIEFS.iter().map(|b| b.to_string()).collect();
        assert!(included_beliefs(&everything).is_err());
    }

    #[test]
    fn behaviours_have_stable_ids() {
        let records = behaviours();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].name, "Walk");
        assert_eq!(
            records[3].uuid.to_string(),
            "8fa1784a-14e9-5d5d-81a5-ba5831f73c84"
        );
    }
}
