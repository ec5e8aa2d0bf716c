use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, Raffle, RaffleState, Vault, VAULT_ACCOUNT_SIZE},
};

/// Event emitted when an un-entered raffle is drained
#[event]
pub struct RaffleDrained {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Where the pool went
    pub destination: Pubkey,
    /// Amount drained, the full pool with no fee deducted
    pub amount: u64,
}

/// Instruction for the admin to drain a raffle nobody entered
///
/// # Security Considerations
/// 1. Only the raffle admin may drain
/// 2. The raffle must be ReadyForDrainage (reconciled lazily here),
///    which only happens when zero entries were ever recorded
/// 3. The recorded prize pool must exactly equal the vault's custodied
///    balance, same consistency check as payout
/// 4. Ledger zeroed and state finalized before the outbound transfer
///
/// # Implementation Notes
/// - No protocol fee is deducted; the whole pool goes to the
///   destination of the admin's choosing
/// - Donors who want their money back individually should refund before
///   the admin drains; drain sweeps whatever remains
pub fn drain_raffle(ctx: Context<DrainRaffle>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    if ctx.accounts.raffle.reconcile(now) {
        emit!(RaffleConfigUpdated::snapshot(
            ctx.accounts.raffle.key(),
            &ctx.accounts.raffle
        ));
    }
    require!(
        ctx.accounts.raffle.raffle_state == RaffleState::ReadyForDrainage,
        RaffleError::NotReadyForDrainage
    );

    let prize_pool = ctx.accounts.raffle.prize_pool;

    match ctx.accounts.raffle.asset_kind {
        AssetKind::Native => {
            require!(
                ctx.accounts.destination_token_account.is_none()
                    && ctx.accounts.vault_token_account.is_none(),
                RaffleError::PayoutAssetMismatch
            );

            let vault_account = ctx.accounts.vault.to_account_info();
            let rent_lamports = (Rent::get()?).minimum_balance(VAULT_ACCOUNT_SIZE);
            let custodied = vault_account
                .lamports()
                .checked_sub(rent_lamports)
                .ok_or(RaffleError::PrizePoolBalanceMismatch)?;
            require!(
                custodied == prize_pool,
                RaffleError::PrizePoolBalanceMismatch
            );

            // Effects before interactions
            let raffle = &mut ctx.accounts.raffle;
            raffle.prize_pool = 0;
            raffle.raffle_state = RaffleState::Complete;

            vault_account.sub_lamports(prize_pool)?;
            ctx.accounts
                .destination
                .to_account_info()
                .add_lamports(prize_pool)?;
        }
        AssetKind::Spl => {
            let mint = ctx
                .accounts
                .raffle
                .payout_mint
                .ok_or(RaffleError::PayoutAssetNotConfigured)?;
            let vault_token_account = ctx
                .accounts
                .vault_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            let destination_token_account = ctx
                .accounts
                .destination_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            require!(
                vault_token_account.mint == mint && destination_token_account.mint == mint,
                RaffleError::PayoutAssetMismatch
            );
            require!(
                vault_token_account.amount == prize_pool,
                RaffleError::PrizePoolBalanceMismatch
            );
            let token_program = ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;

            let raffle_key = ctx.accounts.raffle.key();
            let vault_bump = ctx.accounts.vault.bump;
            let signer_seeds: &[&[&[u8]]] = &[&[b"vault", raffle_key.as_ref(), &[vault_bump]]];

            // Effects before interactions
            let raffle = &mut ctx.accounts.raffle;
            raffle.prize_pool = 0;
            raffle.raffle_state = RaffleState::Complete;

            token::transfer(
                CpiContext::new_with_signer(
                    token_program.to_account_info(),
                    Transfer {
                        from: vault_token_account.to_account_info(),
                        to: destination_token_account.to_account_info(),
                        authority: ctx.accounts.vault.to_account_info(),
                    },
                    signer_seeds,
                ),
                prize_pool,
            )?;
        }
    }

    emit!(RaffleDrained {
        raffle: ctx.accounts.raffle.key(),
        destination: ctx.accounts.destination.key(),
        amount: prize_pool,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct DrainRaffle<'info> {
    #[account(
        mut,
        has_one = admin @ RaffleError::NotRaffleAdmin,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Where the pool goes, chosen by the admin
    /// CHECK: the admin signs for this drain and picks the destination
    #[account(mut)]
    pub destination: UncheckedAccount<'info>,

    /// Vault token account custodying the pool (SPL raffles only)
    #[account(
        mut,
        seeds = [
            b"vault_token",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub vault_token_account: Option<Account<'info, TokenAccount>>,

    /// Destination token account (SPL raffles only)
    #[account(mut)]
    pub destination_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Option<Program<'info, Token>>,
}
