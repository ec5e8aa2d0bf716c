use anchor_lang::prelude::*;

// 8 discriminator + 32 raffle + 1 bump
pub const VAULT_ACCOUNT_SIZE: usize = 8 + 32 + 1;

/// Escrow PDA for one raffle. Native raffles hold lamports directly on
/// this account (above its rent-exempt minimum); SPL raffles hold funds
/// in a token account whose authority is this PDA.
#[account]
pub struct Vault {
    pub raffle: Pubkey,
    pub bump: u8,
}
