//! Read-only queries on the consent record

use anchor_lang::prelude::*;
use crate::state::{ConsentRecord, ConsentSnapshot};

#[derive(Accounts)]
pub struct ReadRecord<'info> {
    #[account(
        seeds = [ConsentRecord::SEED],
        bump = record.bump
    )]
    pub record: Account<'info, ConsentRecord>,
}

/// Active flag; `false` before the first create
pub fn status_handler(ctx: Context<ReadRecord>) -> Result<bool> {
    Ok(ctx.accounts.record.is_active())
}

/// Full snapshot; fails with `NotInitialized` before the first create
pub fn snapshot_handler(ctx: Context<ReadRecord>) -> Result<ConsentSnapshot> {
    ctx.accounts.record.snapshot()
}
