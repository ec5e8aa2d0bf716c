use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, Raffle, Vault},
};

/// Event emitted when the admin funds the prize pool
#[event]
pub struct RaffleFunded {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// Amount added to the prize pool
    pub amount: u64,
    /// Prize pool after the deposit
    pub prize_pool: u64,
}

/// Instruction for the raffle admin to seed the prize pool
///
/// # Security Considerations
/// 1. Only the raffle admin may fund
/// 2. Lifecycle is reconciled first; once the raffle is ready for
///    payout or drainage (or complete) the call becomes a silent no-op
///    so that a racing fund cannot strand money in a decided raffle
/// 3. SPL raffles reject funding until the payout mint is set
/// 4. Inbound native transfers are verified by vault balance delta
///
/// # Implementation Notes
/// - Funding works in Inactive state; activation requires a non-empty
///   prize pool, so funding normally precedes activation
/// - total_funds_from_creator is informational and never decremented
pub fn fund_raffle(ctx: Context<FundRaffle>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    if ctx.accounts.raffle.reconcile(now) {
        emit!(RaffleConfigUpdated::snapshot(
            ctx.accounts.raffle.key(),
            &ctx.accounts.raffle
        ));
    }
    if !ctx.accounts.raffle.can_fund_or_donate() {
        // Past the funding window: no state change, no transfer.
        return Ok(());
    }

    require!(amount > 0, RaffleError::ZeroAmount);

    match ctx.accounts.raffle.asset_kind {
        AssetKind::Native => {
            require!(
                ctx.accounts.admin_token_account.is_none()
                    && ctx.accounts.vault_token_account.is_none(),
                RaffleError::PayoutAssetMismatch
            );

            let pre_balance = ctx.accounts.vault.to_account_info().lamports();
            anchor_lang::solana_program::program::invoke(
                &anchor_lang::solana_program::system_instruction::transfer(
                    &ctx.accounts.admin.key(),
                    &ctx.accounts.vault.key(),
                    amount,
                ),
                &[
                    ctx.accounts.admin.to_account_info(),
                    ctx.accounts.vault.to_account_info(),
                    ctx.accounts.system_program.to_account_info(),
                ],
            )?;
            let post_balance = ctx.accounts.vault.to_account_info().lamports();
            require!(
                post_balance
                    == pre_balance.checked_add(amount).ok_or(RaffleError::Overflow)?,
                RaffleError::TransferFailed
            );
        }
        AssetKind::Spl => {
            let mint = ctx
                .accounts
                .raffle
                .payout_mint
                .ok_or(RaffleError::PayoutAssetNotConfigured)?;
            let admin_token_account = ctx
                .accounts
                .admin_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            let vault_token_account = ctx
                .accounts
                .vault_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            require!(
                admin_token_account.mint == mint && vault_token_account.mint == mint,
                RaffleError::PayoutAssetMismatch
            );
            let token_program = ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;

            token::transfer(
                CpiContext::new(
                    token_program.to_account_info(),
                    Transfer {
                        from: admin_token_account.to_account_info(),
                        to: vault_token_account.to_account_info(),
                        authority: ctx.accounts.admin.to_account_info(),
                    },
                ),
                amount,
            )?;
        }
    }

    let raffle = &mut ctx.accounts.raffle;
    raffle.prize_pool = raffle
        .prize_pool
        .checked_add(amount)
        .ok_or(RaffleError::Overflow)?;
    raffle.total_funds_from_creator = raffle
        .total_funds_from_creator
        .checked_add(amount)
        .ok_or(RaffleError::Overflow)?;

    emit!(RaffleFunded {
        raffle: ctx.accounts.raffle.key(),
        amount,
        prize_pool: ctx.accounts.raffle.prize_pool,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct FundRaffle<'info> {
    #[account(
        mut,
        has_one = admin @ RaffleError::NotRaffleAdmin,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
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

    /// Admin's token account the deposit is pulled from (SPL raffles only)
    #[account(
        mut,
        constraint = admin_token_account.owner == admin.key() @ RaffleError::OwnerMismatch,
    )]
    pub admin_token_account: Option<Account<'info, TokenAccount>>,

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

    pub token_program: Option<Program<'info, Token>>,
    pub system_program: Program<'info, System>,
}
