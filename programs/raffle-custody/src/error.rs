use anchor_lang::error_code;

#[error_code]
pub enum RaffleError {
    Overflow,
    DurationTooShort,
    EntryFeeTooLow,
    ZeroAmount,
    NotActive,
    InvalidTransition,
    EmptyPrizePool,
    DuplicateEntry,
    WrongEntryFeeAmount,
    BelowMinimumDonation,
    NothingToRefund,
    #[msg("Protocol fee may not exceed 10000 basis points")]
    ProtocolFeeTooHigh,
    #[msg("Only the raffle admin may perform this operation")]
    NotRaffleAdmin,
    #[msg("Native raffles do not carry a payout mint")]
    MintNotAllowedForNative,
    #[msg("The payout mint has already been set and is frozen")]
    PayoutAssetAlreadySet,
    #[msg("The payout mint must be set before funds can move")]
    PayoutAssetNotConfigured,
    #[msg("Supplied asset accounts do not match the raffle's payout asset")]
    PayoutAssetMismatch,
    #[msg("Vault account does not match the one stored in the raffle")]
    InvalidVault,
    #[msg("Recorded prize pool does not match the vault's custodied balance")]
    PrizePoolBalanceMismatch,
    #[msg("Raffle is not ready for payout")]
    NotReadyForPayout,
    #[msg("Raffle is not ready for drainage")]
    NotReadyForDrainage,
    #[msg("Donations can only be refunded when no entries were recorded")]
    RaffleStillHasEntries,
    #[msg("Raffle has already completed")]
    RaffleComplete,
    #[msg("Participant log is full")]
    RaffleFull,
    #[msg("No winner has been drawn")]
    NoWinnerDrawn,
    #[msg("A winner has already been drawn")]
    WinnerAlreadyDrawn,
    #[msg("Supplied winner account does not match the drawn winner")]
    WinnerMismatch,
    #[msg("Raffle has no participants to draw from")]
    NoParticipants,
    #[msg("Invalid SlotHashes account provided")]
    InvalidSlotHashesAccount,
    #[msg("Vault transfer failed")]
    TransferFailed,
    #[msg("Signer does not own this record")]
    OwnerMismatch,
    #[msg("Fee recipient does not match the program config")]
    NotFeeRecipient,
    #[msg("Only the program upgrade authority may initialize the config")]
    NotUpgradeAuthority,
}
