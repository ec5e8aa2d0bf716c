use anchor_lang::prelude::*;

use crate::{
    error::RaffleError,
    state::{Config, CONFIG_ACCOUNT_SIZE},
};

/// Instruction to initialize the program configuration
/// This should be called once during program deployment
///
/// # Security Considerations
/// - Creates a PDA with seed "config" to store the fee recipient
/// - Only needs to be called once during deployment
/// - The caller of this instruction must be the program upgrade
///   authority, so a deployment race cannot set a hostile fee recipient
/// - The fee recipient will be set and locked
///
/// # Account Validations
/// * Config - New PDA initialized with proper space allocation
/// * Upgrade Authority - Signer must match the program data account's
///   upgrade authority
/// * Fee Recipient - Account that receives the protocol fee at payout
pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
    ctx.accounts.config.fee_recipient = ctx.accounts.fee_recipient.key();
    ctx.accounts.config.bump = ctx.bumps.config;
    ctx.accounts.config.raffle_counter = 0;
    Ok(())
}

#[derive(Accounts)]
pub struct InitConfig<'info> {
    #[account(
        init,
        payer = upgrade_authority,
        space = CONFIG_ACCOUNT_SIZE,
        seeds = [b"config"],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub upgrade_authority: Signer<'info>,
    pub fee_recipient: SystemAccount<'info>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key())
            @ RaffleError::NotUpgradeAuthority,
    )]
    pub program: Program<'info, crate::program::RaffleCustody>,

    #[account(
        constraint = program_data.upgrade_authority_address == Some(upgrade_authority.key())
            @ RaffleError::NotUpgradeAuthority,
    )]
    pub program_data: Account<'info, ProgramData>,

    pub system_program: Program<'info, System>,
}
