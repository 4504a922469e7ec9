use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, info_span};
use uuid::Uuid;

use crate::agents::{
    apply_intervention, assemble_agents, choose_action, sample_activations, sample_deltas,
    AgentColumns,
};
use crate::beliefs::{prs_matrix, sample_beliefs, sample_prs};
use crate::catalogue::{behaviours, included_beliefs, IncludedBelief};
use crate::ids::agent_uuid;
use crate::network::build_network;
use scenario_models::{
    AgentRecord, BehaviourRecord, BeliefRecord, Config, PrsRecord, ScenarioError,
};

/// Everything written for one scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub scenario_id: u64,
    pub seed: u64,
    pub behaviours: Vec<BehaviourRecord>,
    pub beliefs: Vec<BeliefRecord>,
    pub prs: Vec<PrsRecord>,
    pub agents: Vec<AgentRecord>,
}

pub fn scenario_seed(config: &Config, scenario_id: u64) -> u64 {
    config.seed.base.wrapping_add(scenario_id)
}

/// Resolves the belief set and the intervention column, rejecting names the
/// catalogue does not know.
pub fn resolve_beliefs(config: &Config) -> Result<(Vec<IncludedBelief>, Option<usize>), ScenarioError> {
    let beliefs = included_beliefs(&config.beliefs.exclude)?;

    let column = if config.intervention.enabled {
        let name = &config.intervention.belief;
        if crate::catalogue::belief_index(name).is_none() {
            return Err(ScenarioError::UnknownBelief { name: name.clone() });
        }
        let column = beliefs.iter().position(|b| b.name == name.as_str()).ok_or_else(|| {
            ScenarioError::InvalidConfig {
                reason: format!("intervention targets excluded belief {name:?}"),
            }
        })?;
        Some(column)
    } else {
        None
    };

    Ok((beliefs, column))
}

/// Generates a full scenario. The same `config` and `scenario_id` always
/// produce the same records.
pub fn generate(config: &Config, scenario_id: u64) -> Result<Scenario, ScenarioError> {
    config.validate()?;
    let seed = scenario_seed(config, scenario_id);
    let span = info_span!("generate", scenario_id, seed);
    let _guard = span.enter();

    let (beliefs, intervention_column) = resolve_beliefs(config)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let behaviours = behaviours();
    let behaviour_uuids: Vec<Uuid> = behaviours.iter().map(|b| b.uuid).collect();

    let belief_records = sample_beliefs(&mut rng, &beliefs, &behaviour_uuids)?;
    let prs = sample_prs(&mut rng, &beliefs, &behaviour_uuids)?;
    info!(
        beliefs = belief_records.len(),
        prs = prs.len(),
        "Sampled beliefs"
    );

    let n = config.population.agents;
    let agent_uuids: Vec<Uuid> = (0..n)
        .map(|i| agent_uuid(&config.population.uuid_prefix, i))
        .collect();

    let network = build_network(&mut rng, n, &config.network)?;
    let friends = network.friend_maps(&agent_uuids);

    let deltas = sample_deltas(&mut rng, n, beliefs.len(), &config.deltas)?;
    let mut activations = sample_activations(&mut rng, n, beliefs.len(), &config.activations)?;
    if let Some(column) = intervention_column {
        let affected =
            apply_intervention(&mut rng, &mut activations, column, &config.intervention)?;
        info!(
            belief = %config.intervention.belief,
            affected,
            "Applied intervention"
        );
    }

    let matrix = prs_matrix(&prs, &beliefs, &behaviour_uuids);
    let actions: Vec<usize> = activations
        .iter()
        .map(|row| choose_action(row, &matrix))
        .collect();

    let agents = assemble_agents(
        AgentColumns {
            uuids: &agent_uuids,
            friends,
            deltas,
            activations,
            actions,
        },
        &beliefs,
        &behaviour_uuids,
    );
    info!(agents = agents.len(), "Generated agents");

    Ok(Scenario {
        scenario_id,
        seed,
        behaviours,
        beliefs: belief_records,
        prs,
        agents,
    })
}
