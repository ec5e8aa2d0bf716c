use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, DonationRecord, Raffle, Vault},
};

/// Event emitted when a donation grows the prize pool
#[event]
pub struct DonationRecorded {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The donor's address
    pub donor: Pubkey,
    /// Amount donated in this call
    pub amount: u64,
    /// The donor's cumulative donation total
    pub donor_total: u64,
    /// Prize pool after the donation
    pub prize_pool: u64,
}

/// Instruction to donate into the prize pool without buying entry rights
///
/// # Security Considerations
/// 1. Reconciles the lifecycle first; donations against an expired
///    raffle fail with NotActive
/// 2. Donations below the configured minimum are rejected
/// 3. The donation asset must match the raffle's payout asset
/// 4. Inbound native transfers are verified by vault balance delta
///
/// # Implementation Notes
/// - Donations grant no entries; the donor's only claim is a refund
///   when the raffle ends with zero entries
pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    if ctx.accounts.raffle.reconcile(now) {
        emit!(RaffleConfigUpdated::snapshot(
            ctx.accounts.raffle.key(),
            &ctx.accounts.raffle
        ));
    }
    require!(ctx.accounts.raffle.is_active(), RaffleError::NotActive);
    require!(
        amount >= ctx.accounts.raffle.minimum_donation,
        RaffleError::BelowMinimumDonation
    );
    require!(amount > 0, RaffleError::ZeroAmount);

    match ctx.accounts.raffle.asset_kind {
        AssetKind::Native => {
            require!(
                ctx.accounts.donor_token_account.is_none()
                    && ctx.accounts.vault_token_account.is_none(),
                RaffleError::PayoutAssetMismatch
            );

            let pre_balance = ctx.accounts.vault.to_account_info().lamports();
            anchor_lang::solana_program::program::invoke(
                &anchor_lang::solana_program::system_instruction::transfer(
                    &ctx.accounts.donor.key(),
                    &ctx.accounts.vault.key(),
                    amount,
                ),
                &[
                    ctx.accounts.donor.to_account_info(),
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
            let donor_token_account = ctx
                .accounts
                .donor_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            let vault_token_account = ctx
                .accounts
                .vault_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            require!(
                donor_token_account.mint == mint && vault_token_account.mint == mint,
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
                        from: donor_token_account.to_account_info(),
                        to: vault_token_account.to_account_info(),
                        authority: ctx.accounts.donor.to_account_info(),
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

    let donation_record = &mut ctx.accounts.donation_record;
    donation_record.amount = donation_record
        .amount
        .checked_add(amount)
        .ok_or(RaffleError::Overflow)?;

    emit!(DonationRecorded {
        raffle: ctx.accounts.raffle.key(),
        donor: ctx.accounts.donor.key(),
        amount,
        donor_total: ctx.accounts.donation_record.amount,
        prize_pool: ctx.accounts.raffle.prize_pool,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct Donate<'info> {
    #[account(
        mut,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The donor's per-raffle cumulative donation total
    #[account(
        mut,
        seeds = [
            b"donation_record",
            raffle.key().as_ref(),
            donor.key().as_ref(),
        ],
        bump = donation_record.bump,
        constraint = donation_record.donor == donor.key() @ RaffleError::OwnerMismatch,
    )]
    pub donation_record: Account<'info, DonationRecord>,

    #[account(mut)]
    pub donor: Signer<'info>,

    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Donor's token account the donation is pulled from (SPL raffles only)
    #[account(
        mut,
        constraint = donor_token_account.owner == donor.key() @ RaffleError::OwnerMismatch,
    )]
    pub donor_token_account: Option<Account<'info, TokenAccount>>,

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
