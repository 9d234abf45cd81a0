//! Property-Based Test Generators
//!
//! Provides proptest strategies for participants that pass or fail
//! validation in known ways.

use proptest::prelude::*;

use domain_registration::{ParticipantField, ParticipantRecord};

/// Strategy for non-blank names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-zÀ-ÿ][A-Za-zÀ-ÿ' -]{0,20}"
}

/// Strategy for e-mails accepted by the validator
pub fn valid_email_strategy() -> impl Strategy<Value = String> {
    ("[a-z0-9._+-]{1,16}", "[a-z0-9-]{1,12}", "[a-z]{2,6}")
        .prop_map(|(local, domain, tld)| format!("{local}@{domain}.{tld}"))
}

/// Strategy for valid participants
pub fn valid_participant_strategy() -> impl Strategy<Value = ParticipantRecord> {
    (name_strategy(), name_strategy(), valid_email_strategy(), name_strategy())
        .prop_map(|(last, first, email, company)| ParticipantRecord::new(last, first, email, company))
}

/// Strategy for participant fields
pub fn field_strategy() -> impl Strategy<Value = ParticipantField> {
    prop_oneof![
        Just(ParticipantField::LastName),
        Just(ParticipantField::FirstName),
        Just(ParticipantField::Email),
        Just(ParticipantField::Company),
    ]
}

/// Strategy for batches of 1 to `max` valid participants
pub fn valid_participants_strategy(max: usize) -> impl Strategy<Value = Vec<ParticipantRecord>> {
    prop::collection::vec(valid_participant_strategy(), 1..=max)
}
