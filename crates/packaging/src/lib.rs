pub mod context;
pub mod recipe;

pub use context::*;
pub use recipe::*;

#[cfg(test)]
mod tests {
    use super::*;
    use scenario_models::ContainerConfig;
    use tempfile::tempdir;

    #[test]
    fn test_default_entrypoint_has_no_arguments() {
        let recipe = ContainerRecipe::default();
        let dockerfile = recipe.dockerfile();

        assert_eq!(recipe.entrypoint(), "/app/generate-config");
        assert!(dockerfile.contains(r#"ENTRYPOINT ["/app/generate-config"]"#));
        assert!(!dockerfile.contains("CMD"));
        assert!(dockerfile.contains("WORKDIR /app"));
    }

    #[test]
    fn test_manifest_copied_before_build() {
        let dockerfile = ContainerRecipe::default().dockerfile();

        let manifest = dockerfile.find("COPY Cargo.toml Cargo.lock* ./").unwrap();
        let build = dockerfile.find("RUN cargo build --release").unwrap();
        assert!(manifest < build);
    }

    #[test]
    fn test_recipe_follows_config() {
        let config = ContainerConfig {
            builder_image: "rust:1.80".to_string(),
            runtime_image: "gcr.io/distroless/cc".to_string(),
            binary_name: "gen".to_string(),
            app_dir: "/opt/gen/".to_string(),
        };
        let recipe = ContainerRecipe::from(&config);

        assert_eq!(recipe.entrypoint(), "/opt/gen/gen");
        let dockerfile = recipe.dockerfile();
        assert!(dockerfile.starts_with("# Build stage"));
        assert!(dockerfile.contains("FROM rust:1.80 AS builder"));
        assert!(dockerfile.contains("FROM gcr.io/distroless/cc\n"));
        assert!(dockerfile.contains("--bin gen\n"));
    }

    #[test]
    fn test_validate_rejects_bad_recipes() {
        let mut recipe = ContainerRecipe::default();
        recipe.app_dir = "app".to_string();
        assert!(recipe.validate().is_err());

        let mut recipe = ContainerRecipe::default();
        recipe.binary_name = "bin/gen".to_string();
        assert!(recipe.validate().is_err());

        let mut recipe = ContainerRecipe::default();
        recipe.runtime_image = "debian slim".to_string();
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn test_write_build_context() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("ctx");

        let context = write_build_context(&target, &ContainerRecipe::default()).unwrap();
        let dockerfile = std::fs::read_to_string(&context.dockerfile).unwrap();
        let ignore = std::fs::read_to_string(&context.dockerignore).unwrap();

        assert!(dockerfile.contains("ENTRYPOINT"));
        assert!(ignore.lines().any(|l| l == "target"));
    }

    #[test]
    fn test_checked_in_dockerfile_is_current() {
        let checked_in = include_str!("../../../Dockerfile");
        assert_eq!(checked_in, ContainerRecipe::default().dockerfile());
    }
}
