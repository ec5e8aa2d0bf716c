use anchor_lang::prelude::*;

// 8 discriminator + 32 fee_recipient + 1 bump + 8 raffle_counter
pub const CONFIG_ACCOUNT_SIZE: usize = 8 + 32 + 1 + 8;

#[account]
pub struct Config {
    pub fee_recipient: Pubkey,
    pub bump: u8,
    pub raffle_counter: u64,
}
