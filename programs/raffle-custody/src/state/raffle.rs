use anchor_lang::prelude::*;

use crate::error::RaffleError;

/// Raffles shorter than one hour are rejected at creation.
pub const LEAST_DURATION: i64 = 60 * 60;

/// Hard cap on the participant log so the account stays within the
/// allocation limit for a single init (see RAFFLE_ACCOUNT_SIZE).
pub const MAX_PARTICIPANTS: usize = 256;

/// Protocol fees are expressed in basis points of the prize pool.
pub const BPS_DENOMINATOR: u64 = 10_000;

// Space calculation:
// 8 (discriminator) +
// 32 (admin) +
// 32 (vault) +
// 8 (duration) +
// 8 (start_time) +
// 1 (raffle_state) +
// 1 (asset_kind) +
// 33 (payout_mint: Option<Pubkey>) +
// 8 (entry_fee) +
// 8 (minimum_donation) +
// 1 (raffle_kind) +
// 2 (protocol_fee_bps) +
// 8 (prize_pool) +
// 8 (total_entry_fee_collected) +
// 8 (total_funds_from_creator) +
// 8 (total_entries) +
// 33 (winner: Option<Pubkey>) +
// 9 (winning_index: Option<u64>) +
// 4 + 32 * MAX_PARTICIPANTS (participants) =
// 8412 total bytes
pub const RAFFLE_ACCOUNT_SIZE: usize =
    8 + 32 + 32 + 8 + 8 + 1 + 1 + 33 + 8 + 8 + 1 + 2 + 8 + 8 + 8 + 8 + 33 + 9 + 4
        + 32 * MAX_PARTICIPANTS;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq)]
pub enum RaffleState {
    Inactive = 0,
    Active = 1,
    ReadyForPayout = 2,
    ReadyForDrainage = 3,
    Complete = 4,
}

/// The asset the raffle escrows: native lamports or an SPL token.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq)]
pub enum AssetKind {
    Native = 0,
    Spl = 1,
}

/// Weighted raffles let an address buy multiple entries, each one a
/// separate slot in the participant log. Balanced raffles grant exactly
/// one slot per address.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq)]
pub enum RaffleKind {
    Weighted = 0,
    Balanced = 1,
}

#[account]
pub struct Raffle {
    pub admin: Pubkey,
    pub vault: Pubkey,
    pub duration: i64,
    pub start_time: i64,
    pub raffle_state: RaffleState,
    pub asset_kind: AssetKind,
    pub payout_mint: Option<Pubkey>,
    pub entry_fee: u64,
    pub minimum_donation: u64,
    pub raffle_kind: RaffleKind,
    pub protocol_fee_bps: u16,
    pub prize_pool: u64,
    pub total_entry_fee_collected: u64,
    pub total_funds_from_creator: u64,
    pub total_entries: u64,
    pub winner: Option<Pubkey>,
    pub winning_index: Option<u64>,
    pub participants: Vec<Pubkey>,
}

impl Raffle {
    /// Advances the lifecycle against the clock. An active raffle whose
    /// countdown has elapsed becomes ReadyForPayout when anyone entered
    /// and ReadyForDrainage when nobody did. Safe to call any number of
    /// times; state only ever moves forward.
    ///
    /// Returns true when a transition happened so the caller can emit
    /// the config snapshot event.
    pub fn reconcile(&mut self, now: i64) -> bool {
        if self.raffle_state != RaffleState::Active || self.start_time == 0 {
            return false;
        }
        if now < self.start_time.saturating_add(self.duration) {
            return false;
        }
        self.raffle_state = if self.total_entries > 0 {
            RaffleState::ReadyForPayout
        } else {
            RaffleState::ReadyForDrainage
        };
        true
    }

    pub fn is_active(&self) -> bool {
        self.raffle_state == RaffleState::Active
    }

    /// Funding and donations stop making sense once the raffle has been
    /// classified as ready for payout or drainage.
    pub fn can_fund_or_donate(&self) -> bool {
        matches!(
            self.raffle_state,
            RaffleState::Inactive | RaffleState::Active
        )
    }

    /// Records one purchased entry for `entrant`, given the entrant's
    /// entry count so far. Balanced raffles reject a second entry from
    /// the same address; the participant log gains one slot per call,
    /// which is what makes a uniform draw over the log proportional to
    /// entries bought for weighted raffles.
    ///
    /// Returns the entrant's new entry count.
    pub fn record_entry(&mut self, entrant: Pubkey, prior_entries: u64) -> Result<u64> {
        if self.raffle_kind == RaffleKind::Balanced {
            require!(prior_entries == 0, RaffleError::DuplicateEntry);
        }
        require!(
            self.participants.len() < MAX_PARTICIPANTS,
            RaffleError::RaffleFull
        );

        self.participants.push(entrant);
        self.total_entries = self
            .total_entries
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        self.prize_pool = self
            .prize_pool
            .checked_add(self.entry_fee)
            .ok_or(RaffleError::Overflow)?;
        self.total_entry_fee_collected = self
            .total_entry_fee_collected
            .checked_add(self.entry_fee)
            .ok_or(RaffleError::Overflow)?;

        let entries = prior_entries
            .checked_add(1)
            .ok_or(RaffleError::Overflow)?;
        Ok(entries)
    }

    /// Splits the pool into (protocol_fee, winner_reward). The fee is
    /// floored, the reward takes the remainder, and the two always sum
    /// back to the pool.
    pub fn split_prize(pool: u64, fee_bps: u16) -> Result<(u64, u64)> {
        let fee = (pool as u128)
            .checked_mul(fee_bps as u128)
            .ok_or(RaffleError::Overflow)?
            / BPS_DENOMINATOR as u128;
        let fee = u64::try_from(fee).map_err(|_| RaffleError::Overflow)?;
        let reward = pool.checked_sub(fee).ok_or(RaffleError::Overflow)?;
        Ok((fee, reward))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raffle(duration: i64) -> Raffle {
        Raffle {
            admin: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            duration,
            start_time: 0,
            raffle_state: RaffleState::Inactive,
            asset_kind: AssetKind::Native,
            payout_mint: None,
            entry_fee: 10,
            minimum_donation: 0,
            raffle_kind: RaffleKind::Weighted,
            protocol_fee_bps: 300,
            prize_pool: 0,
            total_entry_fee_collected: 0,
            total_funds_from_creator: 0,
            total_entries: 0,
            winner: None,
            winning_index: None,
            participants: Vec::new(),
        }
    }

    #[test]
    fn reconcile_ignores_unactivated_raffles() {
        let mut r = raffle(3600);
        assert!(!r.reconcile(i64::MAX));
        assert!(r.raffle_state == RaffleState::Inactive);
    }

    #[test]
    fn reconcile_noop_before_expiry() {
        let mut r = raffle(3600);
        r.raffle_state = RaffleState::Active;
        r.start_time = 1_000;
        assert!(!r.reconcile(1_000 + 3599));
        assert!(r.raffle_state == RaffleState::Active);
    }

    #[test]
    fn reconcile_classifies_by_entry_count() {
        let mut r = raffle(3600);
        r.raffle_state = RaffleState::Active;
        r.start_time = 1_000;
        r.total_entries = 2;
        assert!(r.reconcile(1_000 + 3600));
        assert!(r.raffle_state == RaffleState::ReadyForPayout);

        let mut r = raffle(3600);
        r.raffle_state = RaffleState::Active;
        r.start_time = 1_000;
        assert!(r.reconcile(1_000 + 3600));
        assert!(r.raffle_state == RaffleState::ReadyForDrainage);
    }

    #[test]
    fn reconcile_is_idempotent_and_monotone() {
        let mut r = raffle(3600);
        r.raffle_state = RaffleState::Active;
        r.start_time = 1_000;
        r.total_entries = 1;
        assert!(r.reconcile(10_000));
        // Further calls at later times change nothing.
        assert!(!r.reconcile(20_000));
        assert!(!r.reconcile(30_000));
        assert!(r.raffle_state == RaffleState::ReadyForPayout);

        // Terminal states are never touched.
        r.raffle_state = RaffleState::Complete;
        assert!(!r.reconcile(i64::MAX));
        assert!(r.raffle_state == RaffleState::Complete);
    }

    #[test]
    fn funding_gate_closes_on_terminal_classification() {
        let mut r = raffle(3600);
        assert!(r.can_fund_or_donate());
        r.raffle_state = RaffleState::Active;
        assert!(r.can_fund_or_donate());
        for state in [
            RaffleState::ReadyForPayout,
            RaffleState::ReadyForDrainage,
            RaffleState::Complete,
        ] {
            r.raffle_state = state;
            assert!(!r.can_fund_or_donate());
        }
    }

    #[test]
    fn balanced_raffle_rejects_second_entry_from_same_address() {
        let mut r = raffle(3600);
        r.raffle_kind = RaffleKind::Balanced;
        r.raffle_state = RaffleState::Active;
        let entrant = Pubkey::new_unique();

        let entries = r.record_entry(entrant, 0).unwrap();
        assert!(entries == 1);
        assert!(r.record_entry(entrant, entries).is_err());

        // The log holds the address exactly once.
        assert!(r.participants.iter().filter(|p| **p == entrant).count() == 1);
        assert!(r.total_entries == 1);
    }

    #[test]
    fn weighted_entrant_appears_once_per_purchase() {
        let mut r = raffle(3600);
        r.raffle_state = RaffleState::Active;
        let entrant = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let mut entries = 0;
        for _ in 0..5 {
            entries = r.record_entry(entrant, entries).unwrap();
        }
        r.record_entry(other, 0).unwrap();

        assert!(entries == 5);
        assert!(r.participants.iter().filter(|p| **p == entrant).count() == 5);
        assert!(r.participants.iter().filter(|p| **p == other).count() == 1);
        assert!(r.total_entries == 6);
        // Each entry added exactly one fee to the pool and the running sum.
        assert!(r.prize_pool == 6 * r.entry_fee);
        assert!(r.total_entry_fee_collected == 6 * r.entry_fee);
    }

    #[test]
    fn record_entry_rejects_when_participant_log_is_full() {
        let mut r = raffle(3600);
        r.raffle_state = RaffleState::Active;
        for _ in 0..MAX_PARTICIPANTS {
            r.record_entry(Pubkey::new_unique(), 0).unwrap();
        }
        assert!(r.record_entry(Pubkey::new_unique(), 0).is_err());
        assert!(r.participants.len() == MAX_PARTICIPANTS);
    }

    #[test]
    fn split_prize_floors_fee_and_conserves_pool() {
        // floor(120 * 300 / 10000) = 3, reward = 117
        let (fee, reward) = Raffle::split_prize(120, 300).unwrap();
        assert!(fee == 3);
        assert!(reward == 117);

        for pool in [0u64, 1, 99, 10_000, u64::MAX] {
            for bps in [0u16, 1, 300, 9_999, 10_000] {
                let (fee, reward) = Raffle::split_prize(pool, bps).unwrap();
                assert!(fee.checked_add(reward) == Some(pool));
            }
        }
    }

    #[test]
    fn split_prize_full_fee_takes_everything() {
        let (fee, reward) = Raffle::split_prize(1_000, 10_000).unwrap();
        assert!(fee == 1_000);
        assert!(reward == 0);
    }
}
