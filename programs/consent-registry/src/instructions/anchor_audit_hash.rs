//! Anchor Audit Hash Instruction
//!
//! Stores the fingerprint of an off-chain audit event on the consent record.
//! Allowed whether consent is active or revoked.

use anchor_lang::prelude::*;

use crate::events::AuditHashAnchored;
use crate::state::{ConsentRecord, TransitionStatus};

pub fn handler(ctx: Context<AnchorAuditHash>, audit_hash: String) -> Result<TransitionStatus> {
    let now = Clock::get()?.unix_timestamp;
    let caller = ctx.accounts.caller.key();
    let record_key = ctx.accounts.record.key();

    let record = &mut ctx.accounts.record;
    let status = record.anchor_audit_hash(caller, audit_hash.clone(), now)?;

    msg!(
        "{} (by: {}, consent active: {})",
        status.message,
        caller,
        record.consent_active
    );

    emit!(AuditHashAnchored {
        record: record_key,
        anchored_by: caller,
        audit_hash,
        consent_active: record.consent_active,
        timestamp: now,
    });

    Ok(status)
}

#[derive(Accounts)]
pub struct AnchorAuditHash<'info> {
    #[account(
        mut,
        seeds = [ConsentRecord::SEED],
        bump = record.bump
    )]
    pub record: Account<'info, ConsentRecord>,

    pub caller: Signer<'info>,
}
