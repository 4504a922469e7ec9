use scenario_models::{ContainerConfig, ScenarioError};

/// Build recipe for the generator image: compile in a Rust builder stage,
/// run the single binary as the entrypoint of a slim runtime image.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerRecipe {
    pub builder_image: String,
    pub runtime_image: String,
    pub binary_name: String,
    pub app_dir: String,
}

impl Default for ContainerRecipe {
    fn default() -> Self {
        Self::from(&ContainerConfig::default())
    }
}

impl From<&ContainerConfig> for ContainerRecipe {
    fn from(config: &ContainerConfig) -> Self {
        Self {
            builder_image: config.builder_image.clone(),
            runtime_image: config.runtime_image.clone(),
            binary_name: config.binary_name.clone(),
            app_dir: config.app_dir.trim_end_matches('/').to_string(),
        }
    }
}

impl ContainerRecipe {
    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (field, value) in [
            ("container.builder_image", &self.builder_image),
            ("container.runtime_image", &self.runtime_image),
            ("container.binary_name", &self.binary_name),
        ] {
            if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
                return Err(ScenarioError::InvalidConfig {
                    reason: format!("{field} must be a single non-empty token, got {value:?}"),
                });
            }
        }
        if self.binary_name.contains('/') {
            return Err(ScenarioError::InvalidConfig {
                reason: format!("container.binary_name must not contain '/', got {:?}", self.binary_name),
            });
        }
        if !self.app_dir.starts_with('/') {
            return Err(ScenarioError::InvalidConfig {
                reason: format!("container.app_dir must be absolute, got {:?}", self.app_dir),
            });
        }
        Ok(())
    }

    /// Absolute path of the binary inside the runtime image.
    pub fn entrypoint(&self) -> String {
        format!("{}/{}", self.app_dir, self.binary_name)
    }

    pub fn dockerfile(&self) -> String {
        format!(
            r#"# Build stage: fetching or compiling dependencies fails the image build.
FROM {builder} AS builder

WORKDIR /build

# Dependency manifest first so the dependency layer caches across source edits
COPY Cargo.toml Cargo.lock* ./
COPY crates ./crates
COPY src ./src

RUN cargo build --release --bin {bin}

# Runtime stage
FROM {runtime}

WORKDIR {app}

COPY --from=builder /build/target/release/{bin} {entry}

# No baked-in arguments: `docker run <image> scenario 3` runs `{bin} scenario 3`
ENTRYPOINT ["{entry}"]
"#,
            builder = self.builder_image,
            runtime = self.runtime_image,
            bin = self.binary_name,
            app = self.app_dir,
            entry = self.entrypoint(),
        )
    }

    pub fn dockerignore(&self) -> String {
        ["target", "output", "examples", ".git", "*.md"].join("\n") + "\n"
    }
}
