use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{
        AssetKind, Config, Raffle, RaffleKind, RaffleState, Vault, LEAST_DURATION,
        RAFFLE_ACCOUNT_SIZE, VAULT_ACCOUNT_SIZE,
    },
};

/// Event emitted when a raffle is created
#[event]
pub struct RaffleCreated {
    /// The pubkey of the created raffle
    pub raffle: Pubkey,
    /// The raffle admin (creator)
    pub admin: Pubkey,
    /// Countdown length in seconds, started at activation
    pub duration: i64,
    /// Price per entry in the payout asset
    pub entry_fee: u64,
    /// Smallest accepted donation
    pub minimum_donation: u64,
    /// Weighted or balanced entry semantics
    pub raffle_kind: RaffleKind,
    /// Native lamports or SPL token
    pub asset_kind: AssetKind,
    /// Protocol fee in basis points
    pub protocol_fee_bps: u16,
}

/// Instruction to create a new raffle in Inactive state
///
/// # Arguments
/// * `duration` - Countdown in seconds, starts at activation (>= 1 hour)
/// * `entry_fee` - Fixed price per entry in the payout asset (must be > 0)
/// * `minimum_donation` - Smallest accepted donation (may be 0)
/// * `raffle_kind` - Weighted (repeat entries) or Balanced (one per address)
/// * `asset_kind` - Native lamports or SPL token
/// * `protocol_fee_bps` - Fee withheld at payout, in basis points
///
/// # Security Considerations
/// 1. Duration below one hour is rejected
/// 2. Zero entry fee is rejected
/// 3. Protocol fee above 10000 bps is rejected
/// 4. The signer becomes the raffle admin; nobody else can fund,
///    activate, set the payout mint, or drain this raffle
///
/// # Implementation Notes
/// - The raffle starts Inactive with start_time unset (0); the
///   countdown only begins at activation
/// - The vault PDA is created up front for both asset kinds; SPL
///   raffles additionally create a vault token account when the payout
///   mint is set
pub fn create_raffle(
    ctx: Context<CreateRaffle>,
    duration: i64,
    entry_fee: u64,
    minimum_donation: u64,
    raffle_kind: RaffleKind,
    asset_kind: AssetKind,
    protocol_fee_bps: u16,
) -> Result<()> {
    require!(duration >= LEAST_DURATION, RaffleError::DurationTooShort);
    require!(entry_fee > 0, RaffleError::EntryFeeTooLow);
    require!(protocol_fee_bps <= 10_000, RaffleError::ProtocolFeeTooHigh);

    let raffle = &mut ctx.accounts.raffle;
    raffle.admin = ctx.accounts.admin.key();
    raffle.vault = ctx.accounts.vault.key();
    raffle.duration = duration;
    raffle.start_time = 0;
    raffle.raffle_state = RaffleState::Inactive;
    raffle.asset_kind = asset_kind;
    raffle.payout_mint = None;
    raffle.entry_fee = entry_fee;
    raffle.minimum_donation = minimum_donation;
    raffle.raffle_kind = raffle_kind;
    raffle.protocol_fee_bps = protocol_fee_bps;
    raffle.prize_pool = 0;
    raffle.total_entry_fee_collected = 0;
    raffle.total_funds_from_creator = 0;
    raffle.total_entries = 0;
    raffle.winner = None;
    raffle.winning_index = None;
    raffle.participants = Vec::new();

    ctx.accounts.vault.raffle = ctx.accounts.raffle.key();
    ctx.accounts.vault.bump = ctx.bumps.vault;

    // Increment the raffle counter used as the next raffle's PDA seed
    ctx.accounts.config.raffle_counter = ctx
        .accounts
        .config
        .raffle_counter
        .checked_add(1)
        .ok_or(RaffleError::Overflow)?;

    emit!(RaffleCreated {
        raffle: ctx.accounts.raffle.key(),
        admin: ctx.accounts.admin.key(),
        duration,
        entry_fee,
        minimum_donation,
        raffle_kind,
        asset_kind,
        protocol_fee_bps,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

#[derive(Accounts)]
pub struct CreateRaffle<'info> {
    #[account(
        init,
        payer = admin,
        space = RAFFLE_ACCOUNT_SIZE,
        seeds = [
            b"raffle",
            config.raffle_counter.to_le_bytes().as_ref(),
        ],
        bump
    )]
    pub raffle: Account<'info, Raffle>,

    /// The creator, recorded as the raffle admin
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        init,
        payer = admin,
        space = VAULT_ACCOUNT_SIZE,
        seeds = [
            b"vault",
            raffle.key().as_ref(),
        ],
        bump,
    )]
    pub vault: Account<'info, Vault>,

    /// The config account storing the fee recipient and raffle counter
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub system_program: Program<'info, System>,
}
