use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use flate2::write::GzEncoder;
use futures::future::try_join_all;
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

use crate::catalogue;
use crate::scenario::Scenario;
use scenario_models::{Config, Manifest, ManifestEntry, OutputConfig, ScenarioError};

const ZSTD_LEVEL: i32 = 3;

/// On-disk encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Gzip,
    Zstd,
}

impl Encoding {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("zst") => Encoding::Zstd,
            Some("gz") => Encoding::Gzip,
            _ => Encoding::Json,
        }
    }
}

/// Serializes `records` as JSON and compresses according to `path`.
pub fn encode<T: Serialize + ?Sized>(records: &T, path: &Path) -> Result<Vec<u8>, ScenarioError> {
    let json = serde_json::to_vec(records)?;
    let write_err = |e: std::io::Error| ScenarioError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    match Encoding::from_path(path) {
        Encoding::Json => Ok(json),
        Encoding::Zstd => zstd::stream::encode_all(json.as_slice(), ZSTD_LEVEL).map_err(write_err),
        Encoding::Gzip => {
            let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(&json).map_err(write_err)?;
            encoder.finish().map_err(write_err)
        }
    }
}

/// A file that has been encoded but not yet written.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new<T: Serialize + ?Sized>(dir: &Path, name: &str, records: &T) -> Result<Self, ScenarioError> {
        let path = dir.join(name);
        let bytes = encode(records, &path)?;
        Ok(Self { path, bytes })
    }

    fn manifest_entry(&self) -> ManifestEntry {
        let digest = Sha256::digest(&self.bytes);
        ManifestEntry {
            file: self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            sha256: format!("{digest:x}"),
            bytes: self.bytes.len() as u64,
        }
    }
}

pub fn scenario_dir(base: &Path, scenario_id: u64) -> PathBuf {
    base.join("scenario").join(scenario_id.to_string())
}

/// Encodes every scenario file. CPU-bound; run off the async executor.
pub fn encode_scenario(
    scenario: &Scenario,
    output: &OutputConfig,
    dir: &Path,
) -> Result<Vec<PendingFile>, ScenarioError> {
    Ok(vec![
        PendingFile::new(dir, &output.behaviours_file, &scenario.behaviours)?,
        PendingFile::new(dir, &output.beliefs_file, &scenario.beliefs)?,
        PendingFile::new(dir, &output.prs_file, &scenario.prs)?,
        PendingFile::new(dir, &output.agents_file, &scenario.agents)?,
    ])
}

async fn write_all(files: &[PendingFile]) -> Result<(), ScenarioError> {
    try_join_all(files.iter().map(|file| async move {
        tokio::fs::write(&file.path, &file.bytes)
            .await
            .map_err(|e| ScenarioError::io(&file.path, e))
    }))
    .await?;
    Ok(())
}

/// Prepares `dir` for a fresh scenario. An existing directory is an error
/// unless `force` is set, in which case it is removed with everything in it.
pub async fn prepare_dir(dir: &Path, force: bool) -> Result<(), ScenarioError> {
    if tokio::fs::try_exists(dir)
        .await
        .map_err(|e| ScenarioError::io(dir, e))?
    {
        if !force {
            return Err(ScenarioError::OutputExists {
                path: dir.to_path_buf(),
            });
        }
        warn!(dir = %dir.display(), "Replacing existing scenario directory");
        tokio::fs::remove_dir_all(dir)
            .await
            .map_err(|e| ScenarioError::io(dir, e))?;
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| ScenarioError::io(dir, e))
}

/// Writes the scenario files concurrently, then the manifest describing them.
#[instrument(skip(scenario, config, files), fields(scenario_id = scenario.scenario_id))]
pub async fn write_scenario(
    scenario: &Scenario,
    config: &Config,
    files: Vec<PendingFile>,
    dir: &Path,
) -> Result<Manifest, ScenarioError> {
    write_all(&files).await?;

    let manifest = Manifest {
        scenario_id: scenario.scenario_id,
        seed: scenario.seed,
        generated_at: Utc::now(),
        agents: scenario.agents.len(),
        beliefs: scenario.beliefs.len(),
        behaviours: scenario.behaviours.len(),
        files: files.iter().map(PendingFile::manifest_entry).collect(),
    };
    let manifest_path = dir.join(&config.output.manifest_file);
    let bytes = serde_json::to_vec_pretty(&manifest)?;
    tokio::fs::write(&manifest_path, bytes)
        .await
        .map_err(|e| ScenarioError::io(&manifest_path, e))?;

    info!(
        dir = %dir.display(),
        files = manifest.files.len(),
        "Wrote scenario"
    );
    Ok(manifest)
}

/// Writes only the behaviour table to `{base}/{behaviours_file}`.
pub async fn write_behaviours(base: &Path, output: &OutputConfig) -> Result<PathBuf, ScenarioError> {
    tokio::fs::create_dir_all(base)
        .await
        .map_err(|e| ScenarioError::io(base, e))?;

    let file = PendingFile::new(base, &output.behaviours_file, &catalogue::behaviours())?;
    write_all(std::slice::from_ref(&file)).await?;

    info!(path = %file.path.display(), "Wrote behaviours");
    Ok(file.path)
}
