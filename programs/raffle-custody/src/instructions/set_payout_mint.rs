use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, Raffle, RaffleState, Vault},
};

/// Event emitted when the payout mint is frozen
#[event]
pub struct PayoutMintSet {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The mint the raffle will escrow and pay out
    pub mint: Pubkey,
    /// The vault token account created to custody it
    pub vault_token_account: Pubkey,
}

/// Instruction to set the payout mint of an SPL raffle, exactly once
///
/// # Security Considerations
/// 1. Only the raffle admin may set the mint
/// 2. Native raffles carry no mint; the call is rejected for them
/// 3. A second call is rejected: the mint is frozen after the first
/// 4. The vault token account is a PDA-owned account whose authority is
///    the vault, so only this program can move funds out of it
///
/// # Implementation Notes
/// - Until this instruction runs, fund/enter/donate on an SPL raffle
///   fail with PayoutAssetNotConfigured
pub fn set_payout_mint(ctx: Context<SetPayoutMint>) -> Result<()> {
    let raffle = &mut ctx.accounts.raffle;
    require!(
        raffle.asset_kind == AssetKind::Spl,
        RaffleError::MintNotAllowedForNative
    );
    require!(
        raffle.payout_mint.is_none(),
        RaffleError::PayoutAssetAlreadySet
    );
    require!(
        raffle.raffle_state != RaffleState::Complete,
        RaffleError::RaffleComplete
    );

    raffle.payout_mint = Some(ctx.accounts.mint.key());

    emit!(PayoutMintSet {
        raffle: ctx.accounts.raffle.key(),
        mint: ctx.accounts.mint.key(),
        vault_token_account: ctx.accounts.vault_token_account.key(),
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct SetPayoutMint<'info> {
    #[account(
        mut,
        has_one = admin @ RaffleError::NotRaffleAdmin,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    pub mint: Account<'info, Mint>,

    /// Token account custodying the raffle's funds, owned by the vault PDA
    #[account(
        init,
        payer = admin,
        seeds = [
            b"vault_token",
            raffle.key().as_ref(),
        ],
        bump,
        token::mint = mint,
        token::authority = vault,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}
