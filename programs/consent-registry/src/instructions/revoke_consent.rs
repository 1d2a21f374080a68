//! Revoke consent (status flip, nothing is erased)

use anchor_lang::prelude::*;
use crate::events::ConsentRevoked;
use crate::state::{ConsentRecord, TransitionStatus};

#[derive(Accounts)]
pub struct RevokeConsent<'info> {
    #[account(
        mut,
        seeds = [ConsentRecord::SEED],
        bump = record.bump
    )]
    pub record: Account<'info, ConsentRecord>,

    pub caller: Signer<'info>,
}

pub fn handler(ctx: Context<RevokeConsent>) -> Result<TransitionStatus> {
    let now = Clock::get()?.unix_timestamp;
    let caller = ctx.accounts.caller.key();
    let record_key = ctx.accounts.record.key();

    let record = &mut ctx.accounts.record;
    let status = record.revoke_consent(caller, now)?;

    msg!("{} (by: {})", status.message, caller);

    // Idempotent revokes leave no event behind
    if status.is_applied() {
        emit!(ConsentRevoked {
            record: record_key,
            revoked_by: caller,
            consent_hash: record.consent_hash.clone(),
            timestamp: now,
        });
    }

    Ok(status)
}
