use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use rand_distr::Distribution;
use tracing::debug;
use uuid::Uuid;

use crate::distribution::TruncatedNormal;
use scenario_models::{NetworkConfig, ScenarioError};

/// Undirected friendship graph over agent indices. Self-loops are allowed.
#[derive(Debug, Clone)]
pub struct FriendshipNetwork {
    adjacency: Vec<BTreeSet<usize>>,
    weights: BTreeMap<(usize, usize), f64>,
}

fn key(u: usize, v: usize) -> (usize, usize) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

impl FriendshipNetwork {
    pub fn empty(n: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); n],
            weights: BTreeMap::new(),
        }
    }

    /// Small-world graph: a ring lattice of degree `k` (rounded down to even)
    /// whose edges are each rewired with probability `p`.
    pub fn watts_strogatz<R: Rng + ?Sized>(
        rng: &mut R,
        n: usize,
        k: usize,
        p: f64,
    ) -> Result<Self, ScenarioError> {
        if k >= n {
            return Err(ScenarioError::InvalidNetwork {
                reason: format!("lattice degree {k} must be smaller than node count {n}"),
            });
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(ScenarioError::InvalidNetwork {
                reason: format!("rewire probability {p} outside [0, 1]"),
            });
        }

        let mut graph = Self::empty(n);
        let half = k / 2;
        for j in 1..=half {
            for u in 0..n {
                graph.add_edge(u, (u + j) % n);
            }
        }

        let mut rewired = 0usize;
        for j in 1..=half {
            for u in 0..n {
                if rng.gen::<f64>() >= p {
                    continue;
                }
                let v = (u + j) % n;
                if graph.degree(u) >= n - 1 {
                    continue;
                }
                loop {
                    let w = rng.gen_range(0..n);
                    if w != u && !graph.has_edge(u, w) {
                        graph.remove_edge(u, v);
                        graph.add_edge(u, w);
                        rewired += 1;
                        break;
                    }
                }
            }
        }

        debug!(nodes = n, lattice_degree = k, rewired, "Built small-world network");
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn add_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
    }

    pub fn remove_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u].remove(&v);
        self.adjacency[v].remove(&u);
        self.weights.remove(&key(u, v));
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency[u].contains(&v)
    }

    /// Distinct neighbours, counting a self-loop once.
    pub fn degree(&self, u: usize) -> usize {
        self.adjacency[u].len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Each undirected edge once, as `(u, v)` with `u <= v`, in index order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, nbrs)| nbrs.range(u..).map(move |&v| (u, v)))
    }

    /// Each agent befriends itself with the given probability.
    pub fn add_self_loops<R: Rng + ?Sized>(&mut self, rng: &mut R, probability: f64) -> usize {
        let mut added = 0;
        for u in 0..self.len() {
            if rng.gen::<f64>() <= probability {
                self.add_edge(u, u);
                added += 1;
            }
        }
        added
    }

    pub fn assign_weights<R: Rng + ?Sized>(&mut self, rng: &mut R, dist: &TruncatedNormal) {
        let edges: Vec<(usize, usize)> = self.edges().collect();
        for edge in edges {
            self.weights.insert(edge, dist.sample(rng));
        }
    }

    pub fn weight(&self, u: usize, v: usize) -> Option<f64> {
        self.weights.get(&key(u, v)).copied()
    }

    /// Per-agent friend maps. An edge is recorded only on its lower-indexed
    /// endpoint; unweighted edges are skipped.
    pub fn friend_maps(&self, agent_uuids: &[Uuid]) -> Vec<BTreeMap<Uuid, f64>> {
        let mut friends = vec![BTreeMap::new(); self.len()];
        for (u, v) in self.edges() {
            if let Some(weight) = self.weight(u, v) {
                friends[u].insert(agent_uuids[v], weight);
            }
        }
        friends
    }
}

/// Builds the weighted friendship network described by `config`.
pub fn build_network<R: Rng + ?Sized>(
    rng: &mut R,
    agents: usize,
    config: &NetworkConfig,
) -> Result<FriendshipNetwork, ScenarioError> {
    let mut network =
        FriendshipNetwork::watts_strogatz(rng, agents, config.neighbours, config.rewire_probability)?;
    let self_loops = network.add_self_loops(rng, config.self_friendship_probability);

    let weights = TruncatedNormal::new(config.weight_mean, config.weight_sd, 0.0, 1.0)?;
    network.assign_weights(rng, &weights);

    debug!(
        agents,
        edges = network.edge_count(),
        self_loops,
        "Weighted friendship network"
    );
    Ok(network)
}
