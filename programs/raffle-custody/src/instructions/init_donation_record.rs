use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{DonationRecord, Raffle, RaffleState, DONATION_RECORD_ACCOUNT_SIZE},
};

/// Initializes the per-donor donation total for a raffle.
/// PDA-derived using ["donation_record", raffle_pubkey, donor_pubkey].
///
/// # Access Control
/// - Anyone can initialize their own donation record
/// - One donation record per donor per raffle
pub fn init_donation_record(ctx: Context<InitDonationRecord>) -> Result<()> {
    require!(
        ctx.accounts.raffle.raffle_state != RaffleState::Complete,
        RaffleError::RaffleComplete
    );

    let donation_record = &mut ctx.accounts.donation_record;
    donation_record.donor = ctx.accounts.signer.key();
    donation_record.amount = 0;
    donation_record.bump = ctx.bumps.donation_record;

    Ok(())
}

#[derive(Accounts)]
pub struct InitDonationRecord<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = DONATION_RECORD_ACCOUNT_SIZE,
        seeds = [
            b"donation_record",
            raffle.key().as_ref(),
            signer.key().as_ref(),
        ],
        bump,
    )]
    pub donation_record: Account<'info, DonationRecord>,

    pub raffle: Account<'info, Raffle>,
    pub system_program: Program<'info, System>,
}
