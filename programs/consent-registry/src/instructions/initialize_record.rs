//! Initialize the consent record at deployment

use anchor_lang::prelude::*;
use crate::events::RecordInitialized;
use crate::state::{AuthorizationPolicy, ConsentRecord};

#[derive(Accounts)]
pub struct InitializeRecord<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + ConsentRecord::INIT_SPACE,
        seeds = [ConsentRecord::SEED],
        bump
    )]
    pub record: Account<'info, ConsentRecord>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeRecord>, policy: AuthorizationPolicy) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let authority = ctx.accounts.authority.key();
    let record_key = ctx.accounts.record.key();

    let record = &mut ctx.accounts.record;
    record.initialize(authority, policy, ctx.bumps.record, now);

    msg!(
        "Consent record {} initialized with authority: {} (policy: {:?})",
        record_key,
        authority,
        policy
    );

    emit!(RecordInitialized {
        record: record_key,
        authority,
        policy,
        timestamp: now,
    });

    Ok(())
}
