use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, EntryRecord, Raffle, Vault},
};

/// Event emitted when an entry is purchased
#[event]
pub struct EntryRecorded {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The entrant's address
    pub entrant: Pubkey,
    /// Fee paid for this entry
    pub entry_fee: u64,
    /// The entrant's entry count after this purchase
    pub entries: u64,
    /// Total entries across all addresses after this purchase
    pub total_entries: u64,
}

/// Instruction to purchase one entry in a raffle
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. Reconciles the lifecycle first, so an expired raffle rejects the
///    entry with NotActive instead of accepting a stale purchase
/// 2. Balanced raffles reject a second entry from the same address
/// 3. Exactly entry_fee moves from the entrant to the vault; the native
///    leg verifies the vault balance delta after the transfer
/// 4. The participant log is capped; a full raffle rejects entries
/// 5. Updates state before performing the external transfer; a failed
///    transfer rolls the whole transaction back
///
/// # Account Validations
/// * Raffle - Reconciled, must be Active
/// * EntryRecord - Existing PDA tracking the entrant's count
/// * Vault - Must match raffle's vault and use proper PDA seeds
///
/// # Implementation Notes
/// - One call buys one entry; weighted entrants call repeatedly and
///   appear once per purchase in the participant log, which is what
///   makes a uniform draw over the log proportional to entries bought
/// - Uses checked arithmetic on every counter and sum
pub fn enter_raffle(ctx: Context<EnterRaffle>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    if ctx.accounts.raffle.reconcile(now) {
        emit!(RaffleConfigUpdated::snapshot(
            ctx.accounts.raffle.key(),
            &ctx.accounts.raffle
        ));
    }
    require!(ctx.accounts.raffle.is_active(), RaffleError::NotActive);

    // Record the entry before the inbound transfer: one slot in the
    // ordered participant log plus the per-address and global counters.
    // Balanced duplicates and a full log are rejected here.
    let entrant_key = ctx.accounts.entrant.key();
    let prior_entries = ctx.accounts.entry_record.entries;
    let entries = ctx
        .accounts
        .raffle
        .record_entry(entrant_key, prior_entries)?;
    ctx.accounts.entry_record.entries = entries;

    let entry_fee = ctx.accounts.raffle.entry_fee;

    // Collect exactly entry_fee from the entrant
    match ctx.accounts.raffle.asset_kind {
        AssetKind::Native => {
            require!(
                ctx.accounts.entrant_token_account.is_none()
                    && ctx.accounts.vault_token_account.is_none(),
                RaffleError::PayoutAssetMismatch
            );

            let pre_balance = ctx.accounts.vault.to_account_info().lamports();
            anchor_lang::solana_program::program::invoke(
                &anchor_lang::solana_program::system_instruction::transfer(
                    &ctx.accounts.entrant.key(),
                    &ctx.accounts.vault.key(),
                    entry_fee,
                ),
                &[
                    ctx.accounts.entrant.to_account_info(),
                    ctx.accounts.vault.to_account_info(),
                    ctx.accounts.system_program.to_account_info(),
                ],
            )?;
            let post_balance = ctx.accounts.vault.to_account_info().lamports();
            require!(
                post_balance
                    == pre_balance
                        .checked_add(entry_fee)
                        .ok_or(RaffleError::Overflow)?,
                RaffleError::WrongEntryFeeAmount
            );
        }
        AssetKind::Spl => {
            let mint = ctx
                .accounts
                .raffle
                .payout_mint
                .ok_or(RaffleError::PayoutAssetNotConfigured)?;
            let entrant_token_account = ctx
                .accounts
                .entrant_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            let vault_token_account = ctx
                .accounts
                .vault_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            require!(
                entrant_token_account.mint == mint && vault_token_account.mint == mint,
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
                        from: entrant_token_account.to_account_info(),
                        to: vault_token_account.to_account_info(),
                        authority: ctx.accounts.entrant.to_account_info(),
                    },
                ),
                entry_fee,
            )?;
        }
    }

    emit!(EntryRecorded {
        raffle: ctx.accounts.raffle.key(),
        entrant: entrant_key,
        entry_fee,
        entries: ctx.accounts.entry_record.entries,
        total_entries: ctx.accounts.raffle.total_entries,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct EnterRaffle<'info> {
    #[account(
        mut,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    /// The entrant's per-raffle entry counter
    #[account(
        mut,
        seeds = [
            b"entry_record",
            raffle.key().as_ref(),
            entrant.key().as_ref(),
        ],
        bump = entry_record.bump,
        constraint = entry_record.owner == entrant.key() @ RaffleError::OwnerMismatch,
    )]
    pub entry_record: Account<'info, EntryRecord>,

    #[account(mut)]
    pub entrant: Signer<'info>,

    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// Entrant's token account the fee is pulled from (SPL raffles only)
    #[account(
        mut,
        constraint = entrant_token_account.owner == entrant.key() @ RaffleError::OwnerMismatch,
    )]
    pub entrant_token_account: Option<Account<'info, TokenAccount>>,

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
