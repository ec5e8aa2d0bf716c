use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{Raffle, RaffleState},
};

/// Event emitted when a raffle is activated
#[event]
pub struct RaffleActivated {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// When the countdown started
    pub start_time: i64,
    /// Prize pool at activation
    pub prize_pool: u64,
}

/// Instruction to activate a funded raffle and start its countdown
///
/// # Security Considerations
/// 1. Only the raffle admin may activate
/// 2. Activation is only valid from Inactive state; anything else is an
///    invalid transition
/// 3. An empty prize pool is rejected, so an activated raffle always
///    has something to pay out or drain
///
/// # Implementation Notes
/// - start_time is recorded once here and never changes; the countdown
///   runs from activation, not creation
pub fn activate_raffle(ctx: Context<ActivateRaffle>) -> Result<()> {
    let raffle = &mut ctx.accounts.raffle;
    require!(
        raffle.raffle_state == RaffleState::Inactive,
        RaffleError::InvalidTransition
    );
    require!(raffle.prize_pool > 0, RaffleError::EmptyPrizePool);

    let now = Clock::get()?.unix_timestamp;
    raffle.raffle_state = RaffleState::Active;
    raffle.start_time = now;

    emit!(RaffleActivated {
        raffle: ctx.accounts.raffle.key(),
        start_time: now,
        prize_pool: ctx.accounts.raffle.prize_pool,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct ActivateRaffle<'info> {
    #[account(
        mut,
        has_one = admin @ RaffleError::NotRaffleAdmin,
    )]
    pub raffle: Account<'info, Raffle>,

    pub admin: Signer<'info>,
}
