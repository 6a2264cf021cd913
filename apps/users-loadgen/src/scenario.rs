//! Request payloads sent by the generator.

use serde_json::{Value, json};

/// One kind of create request. Requests cycle through [`Scenario::ALL`] in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scenario {
    Valid,
    MalformedEmail,
    EmptyEmail,
    ShortUsername,
    /// Same email and username on every send; only the first can succeed
    Duplicate,
}

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::Valid,
        Scenario::MalformedEmail,
        Scenario::EmptyEmail,
        Scenario::ShortUsername,
        Scenario::Duplicate,
    ];

    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn name(self) -> &'static str {
        match self {
            Scenario::Valid => "valid",
            Scenario::MalformedEmail => "malformed-email",
            Scenario::EmptyEmail => "empty-email",
            Scenario::ShortUsername => "short-username",
            Scenario::Duplicate => "duplicate",
        }
    }

    /// Statuses a correct server may answer with
    pub fn expected_statuses(self) -> &'static [u16] {
        match self {
            Scenario::Valid => &[201],
            Scenario::MalformedEmail | Scenario::EmptyEmail | Scenario::ShortUsername => &[422],
            Scenario::Duplicate => &[201, 400],
        }
    }

    /// JSON body for request number `index` of run `run_id`
    pub fn payload(self, run_id: &str, index: usize) -> Value {
        match self {
            Scenario::Valid => json!({
                "email": format!("load-{}-{}@example.com", run_id, index),
                "username": format!("load_{}_{}", run_id, index),
                "full_name": format!("Load User {}", index),
            }),
            Scenario::MalformedEmail => json!({
                "email": format!("load-{}-{}", run_id, index),
                "username": format!("load_{}_{}", run_id, index),
            }),
            Scenario::EmptyEmail => json!({
                "email": "",
                "username": format!("load_{}_{}", run_id, index),
            }),
            Scenario::ShortUsername => json!({
                "email": format!("load-{}-{}@example.com", run_id, index),
                "username": "ab",
            }),
            Scenario::Duplicate => json!({
                "email": format!("load-{}-dup@example.com", run_id),
                "username": format!("load_{}_dup", run_id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenarios_rotate() {
        let names: Vec<_> = (0..7).map(|i| Scenario::for_index(i).name()).collect();
        assert_eq!(
            names,
            [
                "valid",
                "malformed-email",
                "empty-email",
                "short-username",
                "duplicate",
                "valid",
                "malformed-email"
            ]
        );
    }

    #[test]
    fn test_valid_payloads_are_distinct() {
        let a = Scenario::Valid.payload("r1", 0);
        let b = Scenario::Valid.payload("r1", 5);
        assert_ne!(a["email"], b["email"]);
        assert_ne!(a["username"], b["username"]);
    }

    #[test]
    fn test_duplicate_payload_ignores_index() {
        assert_eq!(
            Scenario::Duplicate.payload("r1", 4),
            Scenario::Duplicate.payload("r1", 9)
        );
    }

    #[test]
    fn test_invalid_payloads() {
        let malformed = Scenario::MalformedEmail.payload("r1", 1);
        assert!(!malformed["email"].as_str().unwrap().contains('@'));
        assert_eq!(Scenario::EmptyEmail.payload("r1", 2)["email"], "");
        assert_eq!(Scenario::ShortUsername.payload("r1", 3)["username"], "ab");
    }
}
