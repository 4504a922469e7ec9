use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Normal};
use uuid::Uuid;

use crate::catalogue::IncludedBelief;
use crate::distribution::TruncatedNormal;
use scenario_models::{
    ActivationsConfig, AgentRecord, DeltasConfig, InterventionConfig, ScenarioError,
};

/// Per-agent belief deltas: `|N(mean, sd)| + floor`, one row per agent.
pub fn sample_deltas<R: Rng + ?Sized>(
    rng: &mut R,
    agents: usize,
    beliefs: usize,
    config: &DeltasConfig,
) -> Result<Vec<Vec<f64>>, ScenarioError> {
    let normal =
        Normal::new(config.mean, config.sd).map_err(|e| ScenarioError::InvalidDistribution {
            reason: e.to_string(),
        })?;

    Ok((0..agents)
        .map(|_| {
            (0..beliefs)
                .map(|_| normal.sample(rng).abs() + config.floor)
                .collect()
        })
        .collect())
}

/// Initial activations: zero with `zero_probability`, otherwise a draw from
/// N(0, sd) truncated on [-1, 1].
pub fn sample_activations<R: Rng + ?Sized>(
    rng: &mut R,
    agents: usize,
    beliefs: usize,
    config: &ActivationsConfig,
) -> Result<Vec<Vec<f64>>, ScenarioError> {
    let dist = TruncatedNormal::unit(0.0, config.sd)?;

    Ok((0..agents)
        .map(|_| {
            (0..beliefs)
                .map(|_| {
                    if rng.gen::<f64>() <= config.zero_probability {
                        0.0
                    } else {
                        dist.sample(rng)
                    }
                })
                .collect()
        })
        .collect())
}

/// Overwrites one belief's activation for a random subset of agents.
/// `column` is the belief's position among the included beliefs.
pub fn apply_intervention<R: Rng + ?Sized>(
    rng: &mut R,
    activations: &mut [Vec<f64>],
    column: usize,
    config: &InterventionConfig,
) -> Result<usize, ScenarioError> {
    let dist = TruncatedNormal::unit(config.mean, config.sd)?;
    let mut affected = 0;
    for row in activations.iter_mut() {
        if rng.gen::<f64>() <= config.probability {
            row[column] = dist.sample(rng);
            affected += 1;
        }
    }
    Ok(affected)
}

/// Index of the behaviour maximising `activations . prs`; the first maximum
/// wins.
pub fn choose_action(activations: &[f64], prs: &[Vec<f64>]) -> usize {
    let behaviours = prs.first().map_or(0, Vec::len);
    let mut best = 0;
    let mut best_score = f64::NEG_INFINITY;
    for b in 0..behaviours {
        let score: f64 = activations
            .iter()
            .zip(prs)
            .map(|(a, row)| a * row[b])
            .sum();
        if score > best_score {
            best = b;
            best_score = score;
        }
    }
    best
}

/// Column-aligned inputs for assembling agent records.
pub struct AgentColumns<'a> {
    pub uuids: &'a [Uuid],
    pub friends: Vec<BTreeMap<Uuid, f64>>,
    pub deltas: Vec<Vec<f64>>,
    pub activations: Vec<Vec<f64>>,
    pub actions: Vec<usize>,
}

pub fn assemble_agents(
    columns: AgentColumns<'_>,
    beliefs: &[IncludedBelief],
    behaviour_uuids: &[Uuid],
) -> Vec<AgentRecord> {
    let AgentColumns {
        uuids,
        friends,
        deltas,
        activations,
        actions,
    } = columns;

    uuids
        .iter()
        .zip(friends)
        .zip(deltas)
        .zip(activations)
        .zip(actions)
        .map(|((((uuid, friends), deltas), activations), action)| {
            let by_belief = |values: Vec<f64>| -> BTreeMap<Uuid, f64> {
                beliefs.iter().map(|b| b.uuid).zip(values).collect()
            };
            AgentRecord {
                uuid: *uuid,
                friends,
                deltas: by_belief(deltas),
                activations: [(0, by_belief(activations))].into_iter().collect(),
                actions: [(0, behaviour_uuids[action])].into_iter().collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn deltas_are_strictly_positive() {
        let mut rng = StdRng::seed_from_u64(12);
        let config = DeltasConfig {
            mean: 0.0,
            sd: 1.0,
            floor: 0.0001,
        };
        let deltas = sample_deltas(&mut rng, 100, 20, &config).unwrap();

        assert_eq!(deltas.len(), 100);
        assert!(deltas.iter().flatten().all(|d| *d >= 0.0001));
    }

    #[test]
    fn activations_are_zero_or_bounded() {
        let mut rng = StdRng::seed_from_u64(13);
        let activations =
            sample_activations(&mut rng, 200, 20, &ActivationsConfig::default()).unwrap();

        let values: Vec<f64> = activations.into_iter().flatten().collect();
        let zeros = values.iter().filter(|v| **v == 0.0).count();
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
        // Roughly half of 4000 draws.
        assert!((1700..2300).contains(&zeros), "{zeros} zeros");
    }

    #[test]
    fn always_zero_when_probability_is_one() {
        let mut rng = StdRng::seed_from_u64(14);
        let config = ActivationsConfig {
            zero_probability: 1.0,
            sd: 0.1,
        };
        let activations = sample_activations(&mut rng, 10, 5, &config).unwrap();
        assert!(activations.iter().flatten().all(|v| *v == 0.0));
    }

    #[test]
    fn intervention_touches_only_its_column() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut activations = vec![vec![0.0; 3]; 50];
        let config = InterventionConfig {
            probability: 1.0,
            ..InterventionConfig::default()
        };

        let affected = apply_intervention(&mut rng, &mut activations, 1, &config).unwrap();
        assert_eq!(affected, 50);
        for row in &activations {
            assert_eq!(row[0], 0.0);
            assert_eq!(row[2], 0.0);
            assert!(row[1] < 0.0 && row[1] >= -1.0);
        }
    }

    #[test]
    fn choose_action_takes_argmax_of_weighted_sum() {
        let prs = vec![vec![0.1, 0.9, 0.0, -0.5], vec![0.8, -0.2, 0.0, 0.3]];
        assert_eq!(choose_action(&[1.0, 0.0], &prs), 1);
        assert_eq!(choose_action(&[0.0, 1.0], &prs), 0);
        assert_eq!(choose_action(&[-1.0, 0.0], &prs), 3);
    }

    #[test]
    fn choose_action_breaks_ties_towards_first() {
        let prs = vec![vec![0.5, 0.5, 0.5, 0.5]];
        assert_eq!(choose_action(&[0.0], &prs), 0);
    }
}
