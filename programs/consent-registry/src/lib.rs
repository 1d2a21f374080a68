//! Consent Registry Program
//!
//! A single on-chain record per deployment tracking whether a data subject's
//! consent is in force, the fingerprint of the consent terms, and the
//! fingerprint of the latest anchored audit event. Consent content itself never
//! touches the chain.

use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;

use instructions::*;
use state::*;

declare_id!("2zbLYjYj3PgZnsyhvHPUmKfdqpKREcz4bD2H5gjteocT");

#[program]
pub mod consent_registry {
    use super::*;

    /// Allocate the consent record in its uninitialized state
    pub fn initialize_record(
        ctx: Context<InitializeRecord>,
        policy: AuthorizationPolicy,
    ) -> Result<()> {
        instructions::initialize_record::handler(ctx, policy)
    }

    /// Record consent terms and activate consent
    pub fn create_consent(
        ctx: Context<CreateConsent>,
        consent_hash: String,
    ) -> Result<TransitionStatus> {
        instructions::create_consent::handler(ctx, consent_hash)
    }

    /// Deactivate consent
    pub fn revoke_consent(ctx: Context<RevokeConsent>) -> Result<TransitionStatus> {
        instructions::revoke_consent::handler(ctx)
    }

    /// Anchor the fingerprint of an off-chain audit event
    pub fn anchor_audit_hash(
        ctx: Context<AnchorAuditHash>,
        audit_hash: String,
    ) -> Result<TransitionStatus> {
        instructions::anchor_audit_hash::handler(ctx, audit_hash)
    }

    /// Change who may mutate the record (authority only)
    pub fn set_policy(
        ctx: Context<SetPolicy>,
        policy: AuthorizationPolicy,
    ) -> Result<TransitionStatus> {
        instructions::set_policy::handler(ctx, policy)
    }

    /// Whether consent is currently active
    pub fn get_consent_status(ctx: Context<ReadRecord>) -> Result<bool> {
        instructions::query::status_handler(ctx)
    }

    /// All record fields at once
    pub fn get_consent(ctx: Context<ReadRecord>) -> Result<ConsentSnapshot> {
        instructions::query::snapshot_handler(ctx)
    }
}
