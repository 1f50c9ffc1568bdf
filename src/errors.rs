//! Error types for the wagering engine
//!
//! One domain enum covers the whole taxonomy: validation failures are
//! rejected before any state change, fund and state errors leave balances
//! untouched, and every rejection is deterministic on retry.

use uuid::Uuid;

/// Root error type for all wagering operations
#[derive(Debug, thiserror::Error)]
pub enum WagerError {
    /// Malformed or out-of-range request data, rejected before any mutation
    #[error("invalid request: {0}")]
    Validation(String),

    /// Stake under the variant's configured floor
    #[error("stake {stake} is below the {game} minimum of {minimum}")]
    BelowMinimum {
        game: &'static str,
        stake: u64,
        minimum: u64,
    },

    /// Debit would exceed the account balance; no mutation occurs
    #[error("insufficient funds: balance {balance}, required {required}")]
    InsufficientFunds { balance: u64, required: u64 },

    #[error("account {0} not found")]
    AccountNotFound(u64),

    #[error("account {0} already exists")]
    AccountExists(u64),

    #[error("unknown case: {0}")]
    CaseNotFound(String),

    #[error("mines session {0} not found")]
    SessionNotFound(Uuid),

    /// Operation not permitted in the current round/game state
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("promo code not found")]
    PromoNotFound,

    /// Account has already redeemed this code its maximum number of times
    #[error("promo code exhausted for this account")]
    PromoExhausted,

    /// Non-admin caller attempting an administrative operation
    #[error("operation requires administrator privileges")]
    Forbidden,

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Convenience alias used throughout the crate
pub type WagerResult<T> = Result<T, WagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WagerError::BelowMinimum {
            game: "coinflip",
            stake: 100,
            minimum: 3500,
        };
        assert!(err.to_string().contains("coinflip"));
        assert!(err.to_string().contains("3500"));
    }

    #[test]
    fn test_insufficient_funds_detail() {
        let err = WagerError::InsufficientFunds {
            balance: 50,
            required: 200,
        };
        assert!(err.to_string().contains("balance 50"));
        assert!(err.to_string().contains("required 200"));
    }
}
