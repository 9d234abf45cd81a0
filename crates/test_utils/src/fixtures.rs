//! Pre-built Test Fixtures
//!
//! Provides ready-to-use participants and request bodies. Values are
//! consistent and predictable so assertions can name them directly.

use serde_json::{json, Value};

use domain_registration::ParticipantRecord;

/// Fixture for participant test data
pub struct ParticipantFixtures;

impl ParticipantFixtures {
    /// A complete, valid participant
    pub fn alice() -> ParticipantRecord {
        ParticipantRecord::new("Durand", "Alice", "alice@example.com", "Acme")
    }

    /// A second valid participant
    pub fn bob() -> ParticipantRecord {
        ParticipantRecord::new("Martin", "Bob", "bob@example.com", "Globex")
    }

    /// A valid participant numbered `n`, with a unique e-mail
    pub fn numbered(n: usize) -> ParticipantRecord {
        ParticipantRecord::new(
            format!("Nom{n}"),
            format!("Prenom{n}"),
            format!("participant{n}@example.com"),
            "Acme",
        )
    }

    /// A participant whose e-mail has no top-level domain
    pub fn with_bad_email() -> ParticipantRecord {
        ParticipantRecord::new("Petit", "Chloé", "chloe@example", "Initech")
    }

    /// A participant with a blank company
    pub fn with_blank_company() -> ParticipantRecord {
        ParticipantRecord::new("Leroy", "David", "david@example.com", "   ")
    }
}

/// Fixture for identifiers shared by a test run
pub struct GroupFixtures;

impl GroupFixtures {
    pub fn group_id() -> &'static str {
        "1a2b3c4d-0000-4000-8000-000000000001"
    }

    pub fn group_name() -> &'static str {
        "Atelier Rust"
    }

    pub fn organizer() -> &'static str {
        "organisateur@example.com"
    }
}

/// Fixture for raw request bodies as the form sends them
pub struct RequestFixtures;

impl RequestFixtures {
    /// A submission body for the given participants
    pub fn submit_body(participants: &[ParticipantRecord]) -> Value {
        json!({
            "groupId": GroupFixtures::group_id(),
            "groupName": GroupFixtures::group_name(),
            "submittedBy": GroupFixtures::organizer(),
            "participants": participants
                .iter()
                .map(|p| json!({
                    "nom": p.last_name,
                    "prenom": p.first_name,
                    "email": p.email,
                    "entreprise": p.company,
                }))
                .collect::<Vec<_>>(),
        })
    }
}
