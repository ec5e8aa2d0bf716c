pub use config::*;
pub use donation_record::*;
pub use entry_record::*;
pub use raffle::*;
pub use vault::*;

pub mod config;
pub mod donation_record;
pub mod entry_record;
pub mod raffle;
pub mod vault;
