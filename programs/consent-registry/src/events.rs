//! Events emitted on every record transition
//!
//! The record keeps only the latest values; these events are the history.

use anchor_lang::prelude::*;
use crate::state::AuthorizationPolicy;

#[event]
pub struct RecordInitialized {
    pub record: Pubkey,
    pub authority: Pubkey,
    pub policy: AuthorizationPolicy,
    pub timestamp: i64,
}

#[event]
pub struct ConsentCreated {
    pub record: Pubkey,
    pub creator: Pubkey,
    pub consent_hash: String,
    pub superseded: bool,
    pub timestamp: i64,
}

#[event]
pub struct ConsentRevoked {
    pub record: Pubkey,
    pub revoked_by: Pubkey,
    pub consent_hash: Option<String>,
    pub timestamp: i64,
}

#[event]
pub struct AuditHashAnchored {
    pub record: Pubkey,
    pub anchored_by: Pubkey,
    pub audit_hash: String,
    pub consent_active: bool,
    pub timestamp: i64,
}

#[event]
pub struct PolicyChanged {
    pub record: Pubkey,
    pub previous: AuthorizationPolicy,
    pub policy: AuthorizationPolicy,
    pub timestamp: i64,
}
