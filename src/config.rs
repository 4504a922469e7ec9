use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use scenario_models::Config;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "generate-config.toml";
pub const ENV_PREFIX: &str = "GENCONFIG_";

/// Defaults, then the TOML file, then `GENCONFIG_*` variables
/// (`__` separates sections, e.g. `GENCONFIG_POPULATION__AGENTS`).
pub fn figment(path: Option<&Path>) -> Figment {
    let file: PathBuf = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
    }

    let config: Config = figment(path).extract()?;
    config.validate()?;
    debug!(?config, "Configuration loaded");
    Ok(config)
}
