use anchor_lang::prelude::*;

// 8 discriminator + 32 donor + 8 amount + 1 bump
pub const DONATION_RECORD_ACCOUNT_SIZE: usize = 8 + 32 + 8 + 1;

/// Cumulative donation total for one donor in one raffle. Zeroed when
/// the donation is refunded so a second refund has nothing to claim.
#[account]
pub struct DonationRecord {
    pub donor: Pubkey,
    pub amount: u64,
    pub bump: u8,
}
