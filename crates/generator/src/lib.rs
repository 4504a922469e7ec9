pub mod agents;
pub mod beliefs;
pub mod catalogue;
pub mod distribution;
pub mod ids;
pub mod network;
pub mod scenario;
pub mod writer;

pub use distribution::TruncatedNormal;
pub use network::FriendshipNetwork;
pub use scenario::{generate, resolve_beliefs, scenario_seed, Scenario};
pub use writer::{scenario_dir, write_behaviours, Encoding};

use std::path::Path;

use scenario_models::{Config, Manifest, ScenarioError};
use tracing::info;

/// Generates scenario `scenario_id` and writes it under
/// `{base}/scenario/{scenario_id}/`.
pub async fn run_scenario(
    config: &Config,
    scenario_id: u64,
    base: &Path,
    force: bool,
) -> Result<Manifest, ScenarioError> {
    config.validate()?;
    resolve_beliefs(config)?;
    let dir = scenario_dir(base, scenario_id);
    writer::prepare_dir(&dir, force).await?;
    info!(scenario_id, dir = %dir.display(), "Generating scenario");

    let (scenario, files) = {
        let config = config.clone();
        let dir = dir.clone();
        tokio::task::spawn_blocking(move || {
            let scenario = generate(&config, scenario_id)?;
            let files = writer::encode_scenario(&scenario, &config.output, &dir)?;
            Ok::<_, ScenarioError>((scenario, files))
        })
        .await
        .map_err(|e| ScenarioError::Task {
            reason: e.to_string(),
        })??
    };

    writer::write_scenario(&scenario, config, files, &dir).await
}
