use std::path::{Path, PathBuf};

use scenario_models::ScenarioError;
use tracing::{info, instrument};

use crate::recipe::ContainerRecipe;

/// Files written into a build context directory.
#[derive(Debug, Clone)]
pub struct BuildContext {
    pub dockerfile: PathBuf,
    pub dockerignore: PathBuf,
}

/// Writes `Dockerfile` and `.dockerignore` into `dir`, creating it if needed.
#[instrument(skip(recipe))]
pub fn write_build_context(dir: &Path, recipe: &ContainerRecipe) -> Result<BuildContext, ScenarioError> {
    recipe.validate()?;
    std::fs::create_dir_all(dir).map_err(|e| ScenarioError::io(dir, e))?;

    let dockerfile = dir.join("Dockerfile");
    std::fs::write(&dockerfile, recipe.dockerfile()).map_err(|e| ScenarioError::io(&dockerfile, e))?;

    let dockerignore = dir.join(".dockerignore");
    std::fs::write(&dockerignore, recipe.dockerignore())
        .map_err(|e| ScenarioError::io(&dockerignore, e))?;

    info!(
        dockerfile = %dockerfile.display(),
        entrypoint = %recipe.entrypoint(),
        "Wrote container build context"
    );
    Ok(BuildContext {
        dockerfile,
        dockerignore,
    })
}
