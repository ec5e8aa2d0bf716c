use anchor_lang::prelude::*;

use crate::{events::RaffleConfigUpdated, state::Raffle};

/// Instruction to reconcile a raffle's lifecycle against the clock
///
/// Anyone may call this; an external scheduler typically cranks it so
/// read-only observers see current state. It is a liveness aid only:
/// every mutating instruction reconciles lazily itself, so correctness
/// never depends on this being called.
///
/// # Implementation Notes
/// - Idempotent; repeat calls after the transition change nothing
/// - Emits the config snapshot only when a transition happened
pub fn reconcile_raffle(ctx: Context<ReconcileRaffle>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    if ctx.accounts.raffle.reconcile(now) {
        emit!(RaffleConfigUpdated::snapshot(
            ctx.accounts.raffle.key(),
            &ctx.accounts.raffle
        ));
    }
    Ok(())
}

#[derive(Accounts)]
pub struct ReconcileRaffle<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,
}
