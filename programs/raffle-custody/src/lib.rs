use anchor_lang::prelude::*;
use instructions::*;

use crate::state::{AssetKind, RaffleKind};

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

declare_id!("4R1EUGtJbYDtA47daynY6qATVZwng8CacUDWR2NQpHmd");

#[program]
pub mod raffle_custody {
    use super::*;

    pub fn init_config(ctx: Context<InitConfig>) -> Result<()> {
        instructions::init_config::init_config(ctx)
    }

    pub fn create_raffle(
        ctx: Context<CreateRaffle>,
        duration: i64,
        entry_fee: u64,
        minimum_donation: u64,
        raffle_kind: RaffleKind,
        asset_kind: AssetKind,
        protocol_fee_bps: u16,
    ) -> Result<()> {
        instructions::create_raffle::create_raffle(
            ctx,
            duration,
            entry_fee,
            minimum_donation,
            raffle_kind,
            asset_kind,
            protocol_fee_bps,
        )
    }

    pub fn set_payout_mint(ctx: Context<SetPayoutMint>) -> Result<()> {
        instructions::set_payout_mint::set_payout_mint(ctx)
    }

    pub fn fund_raffle(ctx: Context<FundRaffle>, amount: u64) -> Result<()> {
        instructions::fund_raffle::fund_raffle(ctx, amount)
    }

    pub fn activate_raffle(ctx: Context<ActivateRaffle>) -> Result<()> {
        instructions::activate_raffle::activate_raffle(ctx)
    }

    pub fn init_entry_record(ctx: Context<InitEntryRecord>) -> Result<()> {
        instructions::init_entry_record::init_entry_record(ctx)
    }

    pub fn enter_raffle(ctx: Context<EnterRaffle>) -> Result<()> {
        instructions::enter_raffle::enter_raffle(ctx)
    }

    pub fn init_donation_record(ctx: Context<InitDonationRecord>) -> Result<()> {
        instructions::init_donation_record::init_donation_record(ctx)
    }

    pub fn donate(ctx: Context<Donate>, amount: u64) -> Result<()> {
        instructions::donate::donate(ctx, amount)
    }

    pub fn reconcile_raffle(ctx: Context<ReconcileRaffle>) -> Result<()> {
        instructions::reconcile_raffle::reconcile_raffle(ctx)
    }

    pub fn draw_winner(ctx: Context<DrawWinner>) -> Result<()> {
        instructions::draw_winner::draw_winner(ctx)
    }

    pub fn payout(ctx: Context<Payout>) -> Result<()> {
        instructions::payout::payout(ctx)
    }

    pub fn drain_raffle(ctx: Context<DrainRaffle>) -> Result<()> {
        instructions::drain_raffle::drain_raffle(ctx)
    }

    pub fn refund_donation(ctx: Context<RefundDonation>) -> Result<()> {
        instructions::refund_donation::refund_donation(ctx)
    }
}
