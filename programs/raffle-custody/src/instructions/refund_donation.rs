use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, DonationRecord, Raffle, RaffleState, Vault},
};

/// Event emitted when a donation is refunded
#[event]
pub struct DonationRefunded {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The refunded donor
    pub donor: Pubkey,
    /// Amount returned, the donor's full cumulative donation
    pub amount: u64,
}

/// Instruction for a donor to reclaim their donation from a raffle
/// nobody entered
///
/// # Security Considerations
/// 1. Only available while the raffle is ReadyForDrainage with zero
///    entries recorded; a raffle with entries pays the pool to the
///    winner instead
/// 2. The donation record is zeroed and the pool decremented before the
///    outbound transfer, so a re-entrant call observes an empty record
///    and fails with NothingToRefund
/// 3. A second refund for the same donor fails with NothingToRefund
///
/// # Implementation Notes
/// - The state stays ReadyForDrainage so each distinct donor can refund
///   independently before the admin drains the remainder
pub fn refund_donation(ctx: Context<RefundDonation>) -> Result<()> {
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
    require!(
        ctx.accounts.raffle.total_entries == 0,
        RaffleError::RaffleStillHasEntries
    );

    let owed = ctx.accounts.donation_record.amount;
    require!(owed > 0, RaffleError::NothingToRefund);

    // Effects before interactions: zero the record and the pool share
    // before any funds move
    ctx.accounts.donation_record.amount = 0;
    let raffle = &mut ctx.accounts.raffle;
    raffle.prize_pool = raffle
        .prize_pool
        .checked_sub(owed)
        .ok_or(RaffleError::PrizePoolBalanceMismatch)?;

    match ctx.accounts.raffle.asset_kind {
        AssetKind::Native => {
            require!(
                ctx.accounts.donor_token_account.is_none()
                    && ctx.accounts.vault_token_account.is_none(),
                RaffleError::PayoutAssetMismatch
            );

            let vault_account = ctx.accounts.vault.to_account_info();
            vault_account.sub_lamports(owed)?;
            ctx.accounts.donor.to_account_info().add_lamports(owed)?;
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
            let donor_token_account = ctx
                .accounts
                .donor_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            require!(
                vault_token_account.mint == mint && donor_token_account.mint == mint,
                RaffleError::PayoutAssetMismatch
            );
            let token_program = ctx
                .accounts
                .token_program
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;

            let raffle_key = ctx.accounts.raffle.key();
            let vault_bump = ctx.accounts.vault.bump;
            let signer_seeds: &[&[&[u8]]] = &[&[b"vault", raffle_key.as_ref(), &[vault_bump]]];

            token::transfer(
                CpiContext::new_with_signer(
                    token_program.to_account_info(),
                    Transfer {
                        from: vault_token_account.to_account_info(),
                        to: donor_token_account.to_account_info(),
                        authority: ctx.accounts.vault.to_account_info(),
                    },
                    signer_seeds,
                ),
                owed,
            )?;
        }
    }

    emit!(DonationRefunded {
        raffle: ctx.accounts.raffle.key(),
        donor: ctx.accounts.donor.key(),
        amount: owed,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct RefundDonation<'info> {
    #[account(
        mut,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The donor's record; kept open after the refund so a second call
    /// finds a zeroed amount rather than a missing account
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

    /// Donor's token account the refund goes to (SPL raffles only)
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
}
