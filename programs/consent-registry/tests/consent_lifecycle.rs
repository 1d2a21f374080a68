//! Lifecycle and property tests for the consent record state machine

use anchor_lang::prelude::*;
use proptest::prelude::*;

use consent_registry::errors::ConsentRegistryError;
use consent_registry::state::{
    AuthorizationPolicy, ConsentRecord, TransitionOutcome, MAX_FINGERPRINT_LEN,
};

const DEPLOYED_AT: i64 = 1_700_000_000;

fn deploy(policy: AuthorizationPolicy) -> (ConsentRecord, Pubkey) {
    let authority = Pubkey::new_unique();
    let mut record = ConsentRecord::default();
    record.initialize(authority, policy, 254, DEPLOYED_AT);
    (record, authority)
}

fn error_code(err: anchor_lang::error::Error) -> u32 {
    match err {
        anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
        other => panic!("unexpected error: {:?}", other),
    }
}

fn fingerprint() -> impl Strategy<Value = String> {
    "[!-~]{1,128}"
}

fn malformed_fingerprint() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[!-~]{0,20} [!-~]{0,20}",
        "[!-~]{0,20}\t",
        "[!-~]{129,160}",
    ]
}

#[test]
fn documented_scenario() {
    let (mut record, _) = deploy(AuthorizationPolicy::Open);
    let caller = Pubkey::new_unique();

    assert!(!record.is_active());

    let created = record
        .create_consent(caller, "0xabc".to_string(), DEPLOYED_AT + 1)
        .unwrap();
    assert!(created.is_applied());
    assert!(record.is_active());

    let revoked = record.revoke_consent(caller, DEPLOYED_AT + 2).unwrap();
    assert!(revoked.is_applied());
    assert!(!record.is_active());

    let anchored = record
        .anchor_audit_hash(caller, "0xdef".to_string(), DEPLOYED_AT + 3)
        .unwrap();
    assert!(anchored.is_applied());
    assert!(!record.is_active());
    assert_eq!(record.audit_anchor.as_deref(), Some("0xdef"));
    assert_eq!(record.consent_hash.as_deref(), Some("0xabc"));

    assert!(!record.is_active());
}

#[test]
fn revoke_is_idempotent() {
    let (mut record, _) = deploy(AuthorizationPolicy::Open);
    let caller = Pubkey::new_unique();
    record.create_consent(caller, "0xabc".to_string(), DEPLOYED_AT + 1).unwrap();

    let first = record.revoke_consent(caller, DEPLOYED_AT + 2).unwrap();
    let second = record.revoke_consent(caller, DEPLOYED_AT + 3).unwrap();

    assert_eq!(first.outcome, TransitionOutcome::Applied);
    assert_eq!(second.outcome, TransitionOutcome::Unchanged);
    assert!(!record.is_active());
    assert_eq!(record.updated_at, DEPLOYED_AT + 2);
}

#[test]
fn recreate_after_revoke_reactivates() {
    let (mut record, _) = deploy(AuthorizationPolicy::Open);
    let caller = Pubkey::new_unique();

    record.create_consent(caller, "0x01".to_string(), DEPLOYED_AT + 1).unwrap();
    record.revoke_consent(caller, DEPLOYED_AT + 2).unwrap();
    record.create_consent(caller, "0x02".to_string(), DEPLOYED_AT + 3).unwrap();

    assert!(record.is_active());
    assert_eq!(record.consent_hash.as_deref(), Some("0x02"));
    assert_eq!(record.create_count, 2);
}

#[test]
fn open_policy_lets_anyone_mutate() {
    let (mut record, _) = deploy(AuthorizationPolicy::Open);
    let subject = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();

    record.create_consent(subject, "0xabc".to_string(), DEPLOYED_AT + 1).unwrap();
    record.revoke_consent(stranger, DEPLOYED_AT + 2).unwrap();
    assert!(!record.is_active());

    record.create_consent(stranger, "0xfff".to_string(), DEPLOYED_AT + 3).unwrap();
    assert_eq!(record.creator, Some(stranger));
}

#[test]
fn switching_to_creator_only_protects_revocation() {
    let (mut record, authority) = deploy(AuthorizationPolicy::Open);
    let subject = Pubkey::new_unique();
    let stranger = Pubkey::new_unique();

    record.create_consent(subject, "0xabc".to_string(), DEPLOYED_AT + 1).unwrap();
    record
        .set_policy(authority, AuthorizationPolicy::CreatorOnly, DEPLOYED_AT + 2)
        .unwrap();

    let err = record.revoke_consent(stranger, DEPLOYED_AT + 3).unwrap_err();
    assert_eq!(error_code(err), u32::from(ConsentRegistryError::Unauthorized));
    assert!(record.is_active());

    record.revoke_consent(subject, DEPLOYED_AT + 4).unwrap();
    assert!(!record.is_active());
}

#[test]
fn strict_snapshot_before_create_fails() {
    let (mut record, _) = deploy(AuthorizationPolicy::Open);
    record
        .anchor_audit_hash(Pubkey::new_unique(), "0xdef".to_string(), DEPLOYED_AT + 1)
        .unwrap();

    let err = record.snapshot().unwrap_err();
    assert_eq!(error_code(err), u32::from(ConsentRegistryError::NotInitialized));
    assert!(!record.is_active());
}

#[test]
fn account_space_fits_longest_fingerprints() {
    let longest = "f".repeat(MAX_FINGERPRINT_LEN);
    let (mut record, _) = deploy(AuthorizationPolicy::Open);
    let caller = Pubkey::new_unique();
    record.create_consent(caller, longest.clone(), DEPLOYED_AT + 1).unwrap();
    record.anchor_audit_hash(caller, longest, DEPLOYED_AT + 2).unwrap();

    let mut data = Vec::new();
    record.try_serialize(&mut data).unwrap();
    assert!(data.len() <= 8 + ConsentRecord::INIT_SPACE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// create(h) activates consent and stores h
    #[test]
    fn prop_create_stores_hash(hash in fingerprint()) {
        let (mut record, _) = deploy(AuthorizationPolicy::Open);
        record.create_consent(Pubkey::new_unique(), hash.clone(), DEPLOYED_AT + 1).unwrap();

        prop_assert!(record.is_active());
        prop_assert_eq!(record.consent_hash, Some(hash));
    }

    /// Anchoring never changes the active flag
    #[test]
    fn prop_anchor_preserves_status(
        hash in fingerprint(),
        audit in fingerprint(),
        revoke_first in any::<bool>(),
    ) {
        let (mut record, _) = deploy(AuthorizationPolicy::Open);
        let caller = Pubkey::new_unique();
        record.create_consent(caller, hash, DEPLOYED_AT + 1).unwrap();
        if revoke_first {
            record.revoke_consent(caller, DEPLOYED_AT + 2).unwrap();
        }

        let before = record.is_active();
        record.anchor_audit_hash(caller, audit.clone(), DEPLOYED_AT + 3).unwrap();

        prop_assert_eq!(record.is_active(), before);
        prop_assert_eq!(record.audit_anchor, Some(audit));
    }

    /// create(h1); anchor(a1); create(h2) keeps a1 and ends on h2
    #[test]
    fn prop_last_create_wins_anchor_survives(
        h1 in fingerprint(),
        a1 in fingerprint(),
        h2 in fingerprint(),
    ) {
        let (mut record, _) = deploy(AuthorizationPolicy::Open);
        let caller = Pubkey::new_unique();

        record.create_consent(caller, h1, DEPLOYED_AT + 1).unwrap();
        record.anchor_audit_hash(caller, a1.clone(), DEPLOYED_AT + 2).unwrap();
        record.create_consent(caller, h2.clone(), DEPLOYED_AT + 3).unwrap();

        prop_assert_eq!(record.consent_hash, Some(h2));
        prop_assert_eq!(record.audit_anchor, Some(a1));
        prop_assert!(record.consent_active);
    }

    /// Malformed fingerprints are refused and change nothing
    #[test]
    fn prop_malformed_fingerprint_rejected(bad in malformed_fingerprint()) {
        let (mut record, _) = deploy(AuthorizationPolicy::Open);
        let caller = Pubkey::new_unique();

        prop_assert!(record.create_consent(caller, bad.clone(), DEPLOYED_AT + 1).is_err());
        prop_assert!(record.anchor_audit_hash(caller, bad, DEPLOYED_AT + 1).is_err());

        prop_assert!(!record.is_active());
        prop_assert_eq!(record.consent_hash, None);
        prop_assert_eq!(record.audit_anchor, None);
        prop_assert_eq!(record.updated_at, DEPLOYED_AT);
    }
}
