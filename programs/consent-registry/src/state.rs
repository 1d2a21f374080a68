//! Account structures for the consent registry
//!
//! The transition methods on [`ConsentRecord`] take the caller and the ledger
//! time as arguments. Instruction handlers read both from the runtime and
//! delegate here, so the record's state machine has no runtime dependency.

use anchor_lang::prelude::*;
use crate::errors::ConsentRegistryError;

/// Maximum length for a fingerprint (consent terms hash or audit hash)
pub const MAX_FINGERPRINT_LEN: usize = 128;

/// Who may mutate the record.
///
/// `Open` matches a registry with no access control at all and is the default.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default, InitSpace)]
pub enum AuthorizationPolicy {
    /// Any signer may create, revoke or anchor
    #[default]
    Open,
    /// Once consent exists, only its creator may create, revoke or anchor
    CreatorOnly,
    /// Only the record authority may mutate
    AuthorityOnly,
}

/// Consent record (one per deployed registry)
#[account]
#[derive(InitSpace, Default)]
pub struct ConsentRecord {
    /// Key that initialized the record; may change the policy
    pub authority: Pubkey,

    /// Mutation policy
    pub policy: AuthorizationPolicy,

    /// Fingerprint of the consent terms, unset until the first create
    #[max_len(MAX_FINGERPRINT_LEN)]
    pub consent_hash: Option<String>,

    /// Whether consent is currently in force
    pub consent_active: bool,

    /// Fingerprint of the last anchored audit event
    #[max_len(MAX_FINGERPRINT_LEN)]
    pub audit_anchor: Option<String>,

    /// Caller of the latest successful create
    pub creator: Option<Pubkey>,

    /// Number of creates, supersessions included
    pub create_count: u64,

    /// Unix timestamp of record initialization
    pub initialized_at: i64,

    /// Unix timestamp of the latest create
    pub consented_at: Option<i64>,

    /// Unix timestamp of the latest anchor
    pub anchored_at: Option<i64>,

    /// Unix timestamp of the latest state change
    pub updated_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

/// Whether a successful transition changed the record
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome {
    Applied,
    Unchanged,
}

/// Return value of every mutating instruction.
///
/// Failures are reported through the instruction error instead, so holding a
/// `TransitionStatus` always means the call succeeded.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransitionStatus {
    pub outcome: TransitionOutcome,
    pub message: String,
}

impl TransitionStatus {
    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            outcome: TransitionOutcome::Applied,
            message: message.into(),
        }
    }

    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            outcome: TransitionOutcome::Unchanged,
            message: message.into(),
        }
    }

    pub fn is_applied(&self) -> bool {
        self.outcome == TransitionOutcome::Applied
    }
}

/// Full view of a created record, returned by `get_consent`
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct ConsentSnapshot {
    pub consent_hash: String,
    pub consent_active: bool,
    pub audit_anchor: Option<String>,
    pub creator: Pubkey,
    pub policy: AuthorizationPolicy,
    pub create_count: u64,
    pub consented_at: i64,
    pub anchored_at: Option<i64>,
    pub updated_at: i64,
}

/// Check that a value is a well-formed fingerprint: 1 to
/// [`MAX_FINGERPRINT_LEN`] bytes of printable ASCII, no whitespace.
pub fn validate_fingerprint(value: &str) -> Result<()> {
    require!(
        value.len() <= MAX_FINGERPRINT_LEN,
        ConsentRegistryError::FingerprintTooLong
    );
    require!(
        !value.is_empty() && value.bytes().all(|b| b.is_ascii_graphic()),
        ConsentRegistryError::InvalidFingerprint
    );
    Ok(())
}

impl ConsentRecord {
    pub const SEED: &'static [u8] = b"consent_record";

    /// Put a freshly allocated account into the uninitialized consent state
    pub fn initialize(&mut self, authority: Pubkey, policy: AuthorizationPolicy, bump: u8, now: i64) {
        self.authority = authority;
        self.policy = policy;
        self.consent_hash = None;
        self.consent_active = false;
        self.audit_anchor = None;
        self.creator = None;
        self.create_count = 0;
        self.initialized_at = now;
        self.consented_at = None;
        self.anchored_at = None;
        self.updated_at = now;
        self.bump = bump;
    }

    /// Current consent status. `false` until the first create.
    pub fn is_active(&self) -> bool {
        self.consent_active
    }

    pub fn is_created(&self) -> bool {
        self.consent_hash.is_some()
    }

    /// Record new consent terms and activate consent.
    ///
    /// Replaces any previous terms; the superseded hash is not kept.
    pub fn create_consent(
        &mut self,
        caller: Pubkey,
        consent_hash: String,
        now: i64,
    ) -> Result<TransitionStatus> {
        validate_fingerprint(&consent_hash)?;
        self.authorize(&caller)?;

        self.create_count = self
            .create_count
            .checked_add(1)
            .ok_or(ConsentRegistryError::ArithmeticOverflow)?;

        let message = match self.consent_hash.as_deref() {
            Some(previous) => format!("Consent terms superseded: {} -> {}", previous, consent_hash),
            None => format!("Consent granted: {}", consent_hash),
        };

        self.consent_hash = Some(consent_hash);
        self.consent_active = true;
        self.creator = Some(caller);
        self.consented_at = Some(now);
        self.updated_at = now;

        Ok(TransitionStatus::applied(message))
    }

    /// Deactivate consent. Revoking an inactive record succeeds without change.
    pub fn revoke_consent(&mut self, caller: Pubkey, now: i64) -> Result<TransitionStatus> {
        self.authorize(&caller)?;

        if !self.consent_active {
            return Ok(TransitionStatus::unchanged("Consent already inactive"));
        }

        self.consent_active = false;
        self.updated_at = now;

        Ok(TransitionStatus::applied("Consent revoked"))
    }

    /// Anchor an audit fingerprint, whatever the consent status.
    ///
    /// No relation to `consent_hash` is checked.
    pub fn anchor_audit_hash(
        &mut self,
        caller: Pubkey,
        audit_hash: String,
        now: i64,
    ) -> Result<TransitionStatus> {
        validate_fingerprint(&audit_hash)?;
        self.authorize(&caller)?;

        let message = format!("Audit hash anchored: {}", audit_hash);

        self.audit_anchor = Some(audit_hash);
        self.anchored_at = Some(now);
        self.updated_at = now;

        Ok(TransitionStatus::applied(message))
    }

    /// Change the mutation policy. Authority only.
    pub fn set_policy(
        &mut self,
        caller: Pubkey,
        policy: AuthorizationPolicy,
        now: i64,
    ) -> Result<TransitionStatus> {
        require_keys_eq!(caller, self.authority, ConsentRegistryError::Unauthorized);

        if self.policy == policy {
            return Ok(TransitionStatus::unchanged(format!("Policy already {:?}", policy)));
        }

        let previous = self.policy;
        self.policy = policy;
        self.updated_at = now;

        Ok(TransitionStatus::applied(format!(
            "Policy changed: {:?} -> {:?}",
            previous, policy
        )))
    }

    /// Everything about the record, or `NotInitialized` before the first create
    pub fn snapshot(&self) -> Result<ConsentSnapshot> {
        let (consent_hash, creator, consented_at) =
            match (&self.consent_hash, self.creator, self.consented_at) {
                (Some(hash), Some(creator), Some(at)) => (hash.clone(), creator, at),
                _ => return err!(ConsentRegistryError::NotInitialized),
            };

        Ok(ConsentSnapshot {
            consent_hash,
            consent_active: self.consent_active,
            audit_anchor: self.audit_anchor.clone(),
            creator,
            policy: self.policy,
            create_count: self.create_count,
            consented_at,
            anchored_at: self.anchored_at,
            updated_at: self.updated_at,
        })
    }

    fn authorize(&self, caller: &Pubkey) -> Result<()> {
        match self.policy {
            AuthorizationPolicy::Open => Ok(()),
            AuthorizationPolicy::CreatorOnly => match self.creator {
                Some(creator) if creator != *caller => err!(ConsentRegistryError::Unauthorized),
                _ => Ok(()),
            },
            AuthorizationPolicy::AuthorityOnly => {
                require_keys_eq!(*caller, self.authority, ConsentRegistryError::Unauthorized);
                Ok(())
            }
        }
    }
}
