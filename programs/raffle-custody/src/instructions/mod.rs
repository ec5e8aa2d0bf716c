pub use activate_raffle::*;
pub use create_raffle::*;
pub use donate::*;
pub use drain_raffle::*;
pub use draw_winner::*;
pub use enter_raffle::*;
pub use fund_raffle::*;
pub use init_config::*;
pub use init_donation_record::*;
pub use init_entry_record::*;
pub use payout::*;
pub use reconcile_raffle::*;
pub use refund_donation::*;
pub use set_payout_mint::*;

pub mod activate_raffle;
pub mod create_raffle;
pub mod donate;
pub mod drain_raffle;
pub mod draw_winner;
pub mod enter_raffle;
pub mod fund_raffle;
pub mod init_config;
pub mod init_donation_record;
pub mod init_entry_record;
pub mod payout;
pub mod reconcile_raffle;
pub mod refund_donation;
pub mod set_payout_mint;
