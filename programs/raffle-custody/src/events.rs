use anchor_lang::prelude::*;

use crate::state::{AssetKind, Raffle, RaffleKind, RaffleState};

/// Snapshot of a raffle's configuration and ledger, emitted after every
/// successful mutating instruction. Consumers treat the stream of these
/// events as an append-only log keyed by raffle pubkey.
#[event]
pub struct RaffleConfigUpdated {
    pub raffle: Pubkey,
    pub admin: Pubkey,
    pub duration: i64,
    pub start_time: i64,
    pub state: RaffleState,
    pub asset_kind: AssetKind,
    pub payout_mint: Option<Pubkey>,
    pub entry_fee: u64,
    pub minimum_donation: u64,
    pub raffle_kind: RaffleKind,
    pub protocol_fee_bps: u16,
    pub prize_pool: u64,
    pub total_entries: u64,
}

impl RaffleConfigUpdated {
    pub fn snapshot(key: Pubkey, raffle: &Raffle) -> Self {
        Self {
            raffle: key,
            admin: raffle.admin,
            duration: raffle.duration,
            start_time: raffle.start_time,
            state: raffle.raffle_state,
            asset_kind: raffle.asset_kind,
            payout_mint: raffle.payout_mint,
            entry_fee: raffle.entry_fee,
            minimum_donation: raffle.minimum_donation,
            raffle_kind: raffle.raffle_kind,
            protocol_fee_bps: raffle.protocol_fee_bps,
            prize_pool: raffle.prize_pool,
            total_entries: raffle.total_entries,
        }
    }
}
