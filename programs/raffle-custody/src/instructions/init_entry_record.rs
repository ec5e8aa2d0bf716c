use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{EntryRecord, Raffle, RaffleState, ENTRY_RECORD_ACCOUNT_SIZE},
};

/// Initializes the per-address entry counter for a raffle.
/// PDA-derived using ["entry_record", raffle_pubkey, user_pubkey].
///
/// # Access Control
/// - Anyone can initialize their own entry record
/// - One entry record per address per raffle
pub fn init_entry_record(ctx: Context<InitEntryRecord>) -> Result<()> {
    require!(
        ctx.accounts.raffle.raffle_state != RaffleState::Complete,
        RaffleError::RaffleComplete
    );

    let entry_record = &mut ctx.accounts.entry_record;
    entry_record.owner = ctx.accounts.signer.key();
    entry_record.entries = 0;
    entry_record.bump = ctx.bumps.entry_record;

    Ok(())
}

#[derive(Accounts)]
pub struct InitEntryRecord<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = ENTRY_RECORD_ACCOUNT_SIZE,
        seeds = [
            b"entry_record",
            raffle.key().as_ref(),
            signer.key().as_ref(),
        ],
        bump,
    )]
    pub entry_record: Account<'info, EntryRecord>,

    pub raffle: Account<'info, Raffle>,
    pub system_program: Program<'info, System>,
}
