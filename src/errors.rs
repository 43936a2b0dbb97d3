pub const ERR_ADMIN_ONLY: &str = "ERR_ADMIN_ONLY";
pub const ERR_DUPLICATE_REWARD_TOKEN: &str = "ERR_DUPLICATE_REWARD_TOKEN";
pub const ERR_UNKNOWN_REWARD_TOKEN: &str = "ERR_UNKNOWN_REWARD_TOKEN";
pub const ERR_TOO_MANY_REWARD_TOKENS: &str = "ERR_TOO_MANY_REWARD_TOKENS";
pub const ERR_INSUFFICIENT_BALANCE: &str = "ERR_INSUFFICIENT_BALANCE";
pub const ERR_KICK_NOT_ALLOWED: &str = "ERR_KICK_NOT_ALLOWED";
pub const ERR_KICK_NOT_NEEDED: &str = "ERR_KICK_NOT_NEEDED";
pub const ERR_REDIRECT_NOT_ALLOWED_FOR_OTHERS: &str = "ERR_REDIRECT_NOT_ALLOWED_FOR_OTHERS";
pub const ERR_PROPORTION_OUT_OF_RANGE: &str = "ERR_PROPORTION_OUT_OF_RANGE";
pub const ERR_ZERO_AMOUNT: &str = "ERR_ZERO_AMOUNT";

pub const ERR_WRONG_TOKEN: &str = "ERR_WRONG_TOKEN";
pub const ERR_INVALID_TOKEN: &str = "ERR_INVALID_TOKEN";
pub const ERR_INVALID_ADDRESS: &str = "ERR_INVALID_ADDRESS";
pub const ERR_LP_TOKEN_AS_REWARD: &str = "ERR_LP_TOKEN_AS_REWARD";

/// Rejections raised by the accounting ledger. Every variant is raised before
/// the ledger writes anything, so a failed operation leaves no trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GaugeError {
    AdminOnly,
    DuplicateRewardToken,
    UnknownRewardToken,
    TooManyRewardTokens,
    InsufficientBalance,
    KickNotAllowed,
    KickNotNeeded,
    RedirectNotAllowedForOthers,
    ProportionOutOfRange,
    ZeroAmount,
}

impl GaugeError {
    pub const fn message(self) -> &'static str {
        match self {
            GaugeError::AdminOnly => ERR_ADMIN_ONLY,
            GaugeError::DuplicateRewardToken => ERR_DUPLICATE_REWARD_TOKEN,
            GaugeError::UnknownRewardToken => ERR_UNKNOWN_REWARD_TOKEN,
            GaugeError::TooManyRewardTokens => ERR_TOO_MANY_REWARD_TOKENS,
            GaugeError::InsufficientBalance => ERR_INSUFFICIENT_BALANCE,
            GaugeError::KickNotAllowed => ERR_KICK_NOT_ALLOWED,
            GaugeError::KickNotNeeded => ERR_KICK_NOT_NEEDED,
            GaugeError::RedirectNotAllowedForOthers => ERR_REDIRECT_NOT_ALLOWED_FOR_OTHERS,
            GaugeError::ProportionOutOfRange => ERR_PROPORTION_OUT_OF_RANGE,
            GaugeError::ZeroAmount => ERR_ZERO_AMOUNT,
        }
    }
}

impl core::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}
