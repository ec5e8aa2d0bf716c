use anchor_lang::prelude::*;

// 8 discriminator + 32 owner + 8 entries + 1 bump
pub const ENTRY_RECORD_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1;

/// Per-address entry counter for one raffle. For balanced raffles a
/// non-zero count blocks any further entry from the same address.
#[account]
pub struct EntryRecord {
    pub owner: Pubkey,
    pub entries: u64,
    pub bump: u8,
}
