use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::Distribution;
use uuid::Uuid;

use crate::catalogue::{
    perception_distribution, relationship_distribution, IncludedBelief, N_BEHAVIOURS,
};
use scenario_models::{BeliefRecord, PrsRecord, ScenarioError};

/// Samples the belief records. All perceptions are drawn before any
/// relationship so the draw order matches the persisted column order.
pub fn sample_beliefs<R: Rng + ?Sized>(
    rng: &mut R,
    beliefs: &[IncludedBelief],
    behaviour_uuids: &[Uuid],
) -> Result<Vec<BeliefRecord>, ScenarioError> {
    debug_assert_eq!(behaviour_uuids.len(), N_BEHAVIOURS);

    let mut perceptions = Vec::with_capacity(beliefs.len());
    for belief in beliefs {
        let mut row = BTreeMap::new();
        for (behaviour, uuid) in behaviour_uuids.iter().enumerate() {
            let dist = perception_distribution(belief.index, behaviour)?;
            row.insert(*uuid, dist.sample(rng));
        }
        perceptions.push(row);
    }

    let mut relationships = Vec::with_capacity(beliefs.len());
    for from in beliefs {
        let mut row = BTreeMap::new();
        for to in beliefs {
            let dist = relationship_distribution(from.index, to.index)?;
            row.insert(to.uuid, dist.sample(rng));
        }
        relationships.push(row);
    }

    Ok(beliefs
        .iter()
        .zip(perceptions)
        .zip(relationships)
        .map(|((belief, perceptions), relationships)| BeliefRecord {
            name: belief.name.to_string(),
            uuid: belief.uuid,
            perceptions,
            relationships,
        })
        .collect())
}

/// Perceived relational strengths, belief-major.
pub fn sample_prs<R: Rng + ?Sized>(
    rng: &mut R,
    beliefs: &[IncludedBelief],
    behaviour_uuids: &[Uuid],
) -> Result<Vec<PrsRecord>, ScenarioError> {
    let mut records = Vec::with_capacity(beliefs.len() * behaviour_uuids.len());
    for belief in beliefs {
        for (behaviour, uuid) in behaviour_uuids.iter().enumerate() {
            let dist = perception_distribution(belief.index, behaviour)?;
            records.push(PrsRecord {
                belief_uuid: belief.uuid,
                behaviour_uuid: *uuid,
                value: dist.sample(rng),
            });
        }
    }
    Ok(records)
}

/// Dense belief x behaviour view of the PRS records, rows in `beliefs` order.
pub fn prs_matrix(
    prs: &[PrsRecord],
    beliefs: &[IncludedBelief],
    behaviour_uuids: &[Uuid],
) -> Vec<Vec<f64>> {
    let mut matrix = vec![vec![0.0; behaviour_uuids.len()]; beliefs.len()];
    for record in prs {
        let row = beliefs.iter().position(|b| b.uuid == record.belief_uuid);
        let col = behaviour_uuids.iter().position(|u| *u == record.behaviour_uuid);
        if let (Some(row), Some(col)) = (row, col) {
            matrix[row][col] = record.value;
        }
    }
    matrix
}
