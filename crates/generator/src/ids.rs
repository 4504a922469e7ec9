use uuid::{uuid, Uuid};

pub const BEHAVIOUR_NAMESPACE: Uuid = uuid!("24875ff2-c3ee-449a-85ad-c271bd369caf");
pub const BELIEF_NAMESPACE: Uuid = uuid!("034d3135-f1f0-441b-a476-9fac37cafc92");
pub const AGENT_NAMESPACE: Uuid = uuid!("1a9e3ee9-a068-41f8-9f46-a5f684f0101e");

pub fn behaviour_uuid(name: &str) -> Uuid {
    Uuid::new_v5(&BEHAVIOUR_NAMESPACE, name.as_bytes())
}

pub fn belief_uuid(sentence: &str) -> Uuid {
    Uuid::new_v5(&BELIEF_NAMESPACE, sentence.as_bytes())
}

pub fn agent_uuid(prefix: &str, index: usize) -> Uuid {
    Uuid::new_v5(&AGENT_NAMESPACE, format!("{prefix}{index}").as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn behaviour_ids_match_published_values() {
        assert_eq!(
            behaviour_uuid("Walk").to_string(),
            "0be0eccb-4563-532f-a61c-95b9d0905e79"
        );
        assert_eq!(
            behaviour_uuid("Cycle").to_string(),
            "7c76b2a6-e1d0-57b7-8990-7fce4e2a363d"
        );
        assert_eq!(
            behaviour_uuid("PT").to_string(),
            "e25ecfbb-4568-5951-a114-9608d9bd93d3"
        );
        assert_eq!(
            behaviour_uuid("Drive").to_string(),
            "8fa1784a-14e9-5d5d-81a5-ba5831f73c84"
        );
    }

    #[test]
    fn belief_and_agent_ids_are_name_based() {
        assert_eq!(
            belief_uuid("Cycling is dangerous").to_string(),
            "13915a68-5927-5ee8-aafd-f6dd1d356887"
        );
        assert_eq!(
            agent_uuid("agent_20221019v1_", 0).to_string(),
            "89135df5-af0f-533a-a91b-69056c219a8c"
        );
        assert_ne!(
            agent_uuid("agent_20221019v1_", 1),
            agent_uuid("agent_20221019v1_", 0)
        );
    }
}
