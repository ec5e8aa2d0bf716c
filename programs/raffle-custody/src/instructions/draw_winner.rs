use std::str::FromStr;

use anchor_lang::prelude::*;
use arrayref::array_ref;

use crate::{
    error::RaffleError,
    events::RaffleConfigUpdated,
    state::{Raffle, RaffleState},
};

/// Event emitted when a winner is drawn
#[event]
pub struct WinnerDrawn {
    /// The pubkey of the raffle
    pub raffle: Pubkey,
    /// The winning address
    pub winner: Pubkey,
    /// Index into the participant log that won
    pub winning_index: u64,
}

/// Draws the winner of a raffle using on-chain randomness from block
/// hashes. A uniform index over the participant log gives each weighted
/// entry one slot (probability proportional to entries bought) and each
/// balanced address exactly one slot.
///
/// Execution requirements:
/// 1. The raffle must be ReadyForPayout (reconciled lazily here)
/// 2. No winner may have been drawn yet
///
/// The randomness is generated with these steps:
/// 1. Extract entropy from the SlotHashes sysvar
/// 2. Combine multiple entropy sources (block hash and current timestamp)
/// 3. Apply cryptographic mixing
/// 4. Map the result to a participant index without bias
///
/// A raffle with exactly one participant needs no randomness: the sole
/// participant wins deterministically.
///
/// # Errors
/// - `NotReadyForPayout` if the raffle has not been classified for payout
/// - `WinnerAlreadyDrawn` if a winner was already recorded
/// - `NoParticipants` if the participant log is empty
/// - `InvalidSlotHashesAccount` if the provided SlotHashes account is invalid
pub fn draw_winner(ctx: Context<DrawWinner>) -> Result<()> {
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
    require!(
        ctx.accounts.raffle.winner.is_none(),
        RaffleError::WinnerAlreadyDrawn
    );

    let participant_count = ctx.accounts.raffle.participants.len() as u64;
    require!(participant_count > 0, RaffleError::NoParticipants);

    let winning_index = if participant_count == 1 {
        // Sole participant wins deterministically, no randomness needed
        0
    } else {
        // Manually validate the recent_slothashes account
        let pubkey_matches = Pubkey::from_str("SysvarS1otHashes111111111111111111111111111")
            .or(Err(RaffleError::InvalidSlotHashesAccount))?
            .eq(&ctx.accounts.recent_slothashes.key());
        require!(pubkey_matches, RaffleError::InvalidSlotHashesAccount);

        let recent_slothashes = &ctx.accounts.recent_slothashes;
        let data = recent_slothashes.data.borrow();

        // Extract entropy from SlotHashes data
        let chunk1 = array_ref![data, 12, 8];
        let chunk2 = if data.len() >= 28 {
            array_ref![data, 20, 8]
        } else {
            chunk1
        };

        let hash_value1 = u64::from_le_bytes(*chunk1);
        let hash_value2 = u64::from_le_bytes(*chunk2);

        let mut mixed_value = mix(hash_value1, now as u64);
        mixed_value = mix(mixed_value, hash_value2);

        unbiased_range(mixed_value, participant_count)?
    };

    let raffle = &mut ctx.accounts.raffle;
    let winner = raffle.participants[winning_index as usize];
    raffle.winner = Some(winner);
    raffle.winning_index = Some(winning_index);

    emit!(WinnerDrawn {
        raffle: ctx.accounts.raffle.key(),
        winner,
        winning_index,
    });
    emit!(RaffleConfigUpdated::snapshot(
        ctx.accounts.raffle.key(),
        &ctx.accounts.raffle
    ));

    Ok(())
}

/// Cryptographic mixing function with strong avalanche properties
/// Based on the splitmix64 algorithm used in high-quality PRNGs.
fn mix(a: u64, b: u64) -> u64 {
    let mut z = a.wrapping_add(b);

    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z = z ^ (z >> 31);

    z
}

/// Maps a random number to a range without introducing statistical bias
/// Standard modulo operations can bias results when the range isn't a
/// power of 2; rejection sampling with capped retries handles the rest.
fn unbiased_range(x: u64, range: u64) -> Result<u64> {
    if range == 0 {
        return Err(RaffleError::Overflow.into());
    }

    if range.is_power_of_two() {
        return Ok(x & (range - 1));
    }

    // For small ranges, simple modulo is fine as bias is minimal
    if range <= 256 {
        return Ok(x % range);
    }

    let threshold = u64::MAX - (u64::MAX % range);

    let mut value = x;

    // Cap iterations to ensure reasonable compute costs
    const MAX_ATTEMPTS: u8 = 3;

    for i in 0..MAX_ATTEMPTS {
        if value < threshold {
            return Ok(value % range);
        }
        value = mix(value, value.wrapping_add(i as u64 + 1));
    }

    Ok(value % range)
}

/// Accounts required for the draw_winner instruction
#[derive(Accounts)]
pub struct DrawWinner<'info> {
    #[account(mut)]
    pub raffle: Account<'info, Raffle>,

    /// The SlotHashes sysvar contains the most recent block hashes
    /// This is used as a source of randomness
    /// CHECK: Using UncheckedAccount because we manually validate the correct sysvar.
    /// This is needed because Anchor will always throw an error on the SlotHashes sysvar.
    pub recent_slothashes: UncheckedAccount<'info>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbiased_range_stays_in_bounds() {
        for seed in [0u64, 1, 42, u64::MAX, 0xdeadbeef] {
            for range in [1u64, 2, 3, 7, 64, 255, 257, 1_000_003] {
                let idx = unbiased_range(mix(seed, range), range).unwrap();
                assert!(idx < range);
            }
        }
    }

    #[test]
    fn unbiased_range_rejects_empty_range() {
        assert!(unbiased_range(123, 0).is_err());
    }

    #[test]
    fn mix_spreads_nearby_inputs() {
        let a = mix(1, 0);
        let b = mix(2, 0);
        assert!(a != b);
        // Nearby inputs should not produce nearby outputs
        assert!(a.abs_diff(b) > u32::MAX as u64);
    }
}
