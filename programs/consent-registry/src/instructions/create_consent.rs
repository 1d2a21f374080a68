//! Create (or supersede) consent

use anchor_lang::prelude::*;
use crate::events::ConsentCreated;
use crate::state::{ConsentRecord, TransitionStatus};

#[derive(Accounts)]
pub struct CreateConsent<'info> {
    #[account(
        mut,
        seeds = [ConsentRecord::SEED],
        bump = record.bump
    )]
    pub record: Account<'info, ConsentRecord>,

    pub caller: Signer<'info>,
}

pub fn handler(ctx: Context<CreateConsent>, consent_hash: String) -> Result<TransitionStatus> {
    let now = Clock::get()?.unix_timestamp;
    let caller = ctx.accounts.caller.key();
    let record_key = ctx.accounts.record.key();

    let record = &mut ctx.accounts.record;
    let superseded = record.is_created();
    let status = record.create_consent(caller, consent_hash.clone(), now)?;

    msg!(
        "{} (by: {}, creates: {})",
        status.message,
        caller,
        record.create_count
    );

    emit!(ConsentCreated {
        record: record_key,
        creator: caller,
        consent_hash,
        superseded,
        timestamp: now,
    });

    Ok(status)
}
