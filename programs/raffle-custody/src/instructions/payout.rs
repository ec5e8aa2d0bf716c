use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{AssetKind, Config, Raffle, RaffleState, Vault, VAULT_ACCOUNT_SIZE},
};

/// Event emitted when the prize pool is paid out
#[event]
pub struct PayoutCompleted {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winning address
    pub winner: Pubkey,
    /// Protocol fee sent to the fee recipient
    pub protocol_fee: u64,
    /// Reward sent to the winner
    pub winner_reward: u64,
}

/// Instruction to pay the prize pool out to the drawn winner
///
/// # Security Considerations
/// The instruction performs several critical checks:
/// 1. The raffle must be ReadyForPayout (reconciled lazily here)
/// 2. A winner must have been drawn and the supplied winner account
///    must match it
/// 3. The recorded prize pool must exactly equal the vault's custodied
///    balance; any drift from unaccounted transfers into the vault is a
///    fatal consistency error and aborts the payout
/// 4. The fee recipient must match the program config
/// 5. The ledger is zeroed and the state finalized before the outbound
///    transfers; transaction atomicity rolls everything back if either
///    leg fails, so no partial fee/reward split can survive
///
/// # Implementation Notes
/// - protocol_fee = floor(prize_pool * protocol_fee_bps / 10000),
///   winner_reward takes the remainder; the two always sum to the pool
/// - Native legs move lamports directly off the program-owned vault;
///   SPL legs are vault-signed token CPIs pushing the held balance
pub fn payout(ctx: Context<Payout>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    if ctx.accounts.raffle.reconcile(now) {
        emit!(RaffleConfigUpdated::snapshot(
            ctx.accounts.raffle.key(),
            &ctx.accounts.raffle
        ));
    }
    require!(
        ctx.accounts.raffle.raffle_state == RaffleState::ReadyForPayout,
        RaffleError::NotReadyForPayout
    );

    let winner = ctx
        .accounts
        .raffle
        .winner
        .ok_or(RaffleError::NoWinnerDrawn)?;
    require_keys_eq!(
        ctx.accounts.winner.key(),
        winner,
        RaffleError::WinnerMismatch
    );
    require_keys_eq!(
        ctx.accounts.fee_recipient.key(),
        ctx.accounts.config.fee_recipient,
        RaffleError::NotFeeRecipient
    );

    let prize_pool = ctx.accounts.raffle.prize_pool;
    let (protocol_fee, winner_reward) =
        Raffle::split_prize(prize_pool, ctx.accounts.raffle.protocol_fee_bps)?;

    match ctx.accounts.raffle.asset_kind {
        AssetKind::Native => {
            require!(
                ctx.accounts.winner_token_account.is_none()
                    && ctx.accounts.fee_recipient_token_account.is_none()
                    && ctx.accounts.vault_token_account.is_none(),
                RaffleError::PayoutAssetMismatch
            );

            // The vault keeps its rent-exempt minimum; everything above
            // it must be exactly the recorded pool
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

            // Transfer lamports by directly deducting from the vault.
            // This only works because the vault is a PDA owned by our program.
            vault_account.sub_lamports(protocol_fee)?;
            ctx.accounts
                .fee_recipient
                .to_account_info()
                .add_lamports(protocol_fee)?;
            vault_account.sub_lamports(winner_reward)?;
            ctx.accounts
                .winner
                .to_account_info()
                .add_lamports(winner_reward)?;
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
            let winner_token_account = ctx
                .accounts
                .winner_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            let fee_recipient_token_account = ctx
                .accounts
                .fee_recipient_token_account
                .as_ref()
                .ok_or(RaffleError::PayoutAssetMismatch)?;
            require!(
                vault_token_account.mint == mint
                    && winner_token_account.mint == mint
                    && fee_recipient_token_account.mint == mint,
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
                        to: fee_recipient_token_account.to_account_info(),
                        authority: ctx.accounts.vault.to_account_info(),
                    },
                    signer_seeds,
                ),
                protocol_fee,
            )?;
            token::transfer(
                CpiContext::new_with_signer(
                    token_program.to_account_info(),
                    Transfer {
                        from: vault_token_account.to_account_info(),
                        to: winner_token_account.to_account_info(),
                        authority: ctx.accounts.vault.to_account_info(),
                    },
                    signer_seeds,
                ),
                winner_reward,
            )?;
        }
    }

    emit!(PayoutCompleted {
        raffle: ctx.accounts.raffle.key(),
        winner,
        protocol_fee,
        winner_reward,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct Payout<'info> {
    #[account(
        mut,
        has_one = vault @ RaffleError::InvalidVault,
    )]
    pub raffle: Account<'info, Raffle>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, Vault>,

    /// The drawn winner, validated against the raffle's record
    /// CHECK: key equality against raffle.winner is the validation
    #[account(mut)]
    pub winner: UncheckedAccount<'info>,

    /// The protocol fee destination, validated against the config
    /// CHECK: key equality against config.fee_recipient is the validation
    #[account(mut)]
    pub fee_recipient: UncheckedAccount<'info>,

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

    /// Winner's token account (SPL raffles only)
    #[account(
        mut,
        constraint = winner_token_account.owner == winner.key() @ RaffleError::OwnerMismatch,
    )]
    pub winner_token_account: Option<Account<'info, TokenAccount>>,

    /// Fee recipient's token account (SPL raffles only)
    #[account(
        mut,
        constraint = fee_recipient_token_account.owner == fee_recipient.key() @ RaffleError::OwnerMismatch,
    )]
    pub fee_recipient_token_account: Option<Account<'info, TokenAccount>>,

    pub token_program: Option<Program<'info, Token>>,
}
