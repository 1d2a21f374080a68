//! Change who may mutate the consent record

use anchor_lang::prelude::*;
use crate::events::PolicyChanged;
use crate::state::{AuthorizationPolicy, ConsentRecord, TransitionStatus};

#[derive(Accounts)]
pub struct SetPolicy<'info> {
    #[account(
        mut,
        seeds = [ConsentRecord::SEED],
        bump = record.bump
    )]
    pub record: Account<'info, ConsentRecord>,

    pub authority: Signer<'info>,
}

pub fn handler(ctx: Context<SetPolicy>, policy: AuthorizationPolicy) -> Result<TransitionStatus> {
    let now = Clock::get()?.unix_timestamp;
    let authority = ctx.accounts.authority.key();
    let record_key = ctx.accounts.record.key();

    let record = &mut ctx.accounts.record;
    let previous = record.policy;
    let status = record.set_policy(authority, policy, now)?;

    msg!("{} (by: {})", status.message, authority);

    if status.is_applied() {
        emit!(PolicyChanged {
            record: record_key,
            previous,
            policy,
            timestamp: now,
        });
    }

    Ok(status)
}
