use anyhow::{Context, Result};
use scenario_models::{
    AgentRecord, BehaviourRecord, BeliefRecord, Config, Manifest, OutputConfig, PrsRecord,
};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tempfile::TempDir;

/// Fresh temporary output directory
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("scenario-")
        .tempdir()
        .expect("create temp dir")
}

/// Small, fast configuration for integration tests
pub fn small_config(agents: usize) -> Config {
    let mut config = Config::default();
    config.population.agents = agents;
    config.network.neighbours = 4.min(agents.saturating_sub(1));
    config
}

/// Read raw bytes and undo any compression implied by the extension
pub fn read_decoded(path: &Path) -> Result<Vec<u8>> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("zst") => Ok(zstd::stream::decode_all(raw.as_slice())?),
        Some("gz") => {
            let mut out = Vec::new();
            flate2::read::GzDecoder::new(raw.as_slice()).read_to_end(&mut out)?;
            Ok(out)
        }
        _ => Ok(raw),
    }
}

/// Parse a JSON output file, compressed or not
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_decoded(path)?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Every file of one written scenario
#[derive(Debug)]
pub struct LoadedScenario {
    pub behaviours: Vec<BehaviourRecord>,
    pub beliefs: Vec<BeliefRecord>,
    pub prs: Vec<PrsRecord>,
    pub agents: Vec<AgentRecord>,
    pub manifest: Manifest,
}

pub fn load_scenario(dir: &Path, output: &OutputConfig) -> Result<LoadedScenario> {
    Ok(LoadedScenario {
        behaviours: read_json(&dir.join(&output.behaviours_file))?,
        beliefs: read_json(&dir.join(&output.beliefs_file))?,
        prs: read_json(&dir.join(&output.prs_file))?,
        agents: read_json(&dir.join(&output.agents_file))?,
        manifest: read_json(&dir.join(&output.manifest_file))?,
    })
}

/// Check every file listed in the manifest has the recorded size
pub fn manifest_sizes_match(dir: &Path, manifest: &Manifest) -> Result<bool> {
    for entry in &manifest.files {
        let len = std::fs::metadata(dir.join(&entry.file))?.len();
        if len != entry.bytes {
            return Ok(false);
        }
    }
    Ok(true)
}
