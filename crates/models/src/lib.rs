pub mod config;
pub mod error;
pub mod scenario;

pub use config::*;
pub use error::*;
pub use scenario::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;
    use std::collections::BTreeMap;
    use uuid::Uuid;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.agents, 5000);
        assert_eq!(config.seed.base, 543_879);
        assert_eq!(config.output.agents_file, "agents.json.zst");
    }

    #[test]
    fn test_config_deny_unknown_fields() {
        let json = r#"{"population": {"agents": 10, "colour": "blue"}}"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("unknown field"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let json = r#"{"network": {"neighbours": 4}}"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.network.neighbours, 4);
        assert_eq!(config.network.rewire_probability, 0.3);
        assert_eq!(config.population.uuid_prefix, "agent_20221019v1_");
    }

    #[test]
    fn test_validate_rejects_bad_probability() {
        let mut config = Config::default();
        config.network.rewire_probability = 1.5;

        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("network.rewire_probability"));
    }

    #[test]
    fn test_validate_rejects_lattice_wider_than_population() {
        let mut config = Config::default();
        config.population.agents = 10;
        config.network.neighbours = 10;

        assert!(matches!(
            config.validate(),
            Err(ScenarioError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nested_file_names() {
        let mut config = Config::default();
        config.output.prs_file = "../prs.json".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_dot_file_names() {
        for name in [".", ".."] {
            let mut config = Config::default();
            config.output.agents_file = name.to_string();

            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("output.agents_file"));
        }
    }

    #[test]
    fn test_validate_rejects_colliding_file_names() {
        let mut config = Config::default();
        config.output.agents_file = "prs.json".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("output.prs_file"));

        let mut config = Config::default();
        config.output.manifest_file = config.output.beliefs_file.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_means() {
        let mut config = Config::default();
        config.network.weight_mean = f64::NAN;
        assert!(config.validate().unwrap_err().to_string().contains("network.weight_mean"));

        let mut config = Config::default();
        config.deltas.mean = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.intervention.mean = f64::NEG_INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prs_record_uses_camel_case() {
        let record = PrsRecord {
            belief_uuid: Uuid::nil(),
            behaviour_uuid: Uuid::nil(),
            value: 0.25,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("beliefUuid").is_some());
        assert!(json.get("behaviourUuid").is_some());
        assert_eq!(json["value"], 0.25);
    }

    #[test]
    fn test_agent_time_steps_serialize_as_string_keys() {
        let belief = Uuid::nil();
        let mut activations = BTreeMap::new();
        activations.insert(belief, 0.0);

        let agent = AgentRecord {
            uuid: Uuid::nil(),
            friends: BTreeMap::new(),
            deltas: BTreeMap::new(),
            activations: [(0, activations)].into_iter().collect(),
            actions: [(0, belief)].into_iter().collect(),
        };

        let json = serde_json::to_value(&agent).unwrap();
        assert!(json["activations"].get("0").is_some());
        assert_eq!(json["actions"]["0"], belief.to_string());
        assert_eq!(agent.initial_action(), Some(belief));
    }
}
