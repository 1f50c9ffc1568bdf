//! Shared wager contract for one-shot games
//!
//! Case opening, coin flip and cards all have the same shape: validate the
//! stake, then resolve an outcome into a payout. Implementing one
//! capability trait lets the coordinator write its debit-resolve-credit
//! sequence exactly once. Session games (crash, mines) carry state across
//! requests and have their own modules.

use crate::errors::WagerResult;
use crate::games::types::{GameOutcome, GameType, RoundDetail};
use crate::rng::OutcomeSource;

/// Resolved outcome of one round
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Amount to credit, inclusive of stake return on win; 0 on loss.
    pub payout: u64,
    pub outcome: GameOutcome,
    pub detail: RoundDetail,
}

/// One round of a one-shot game variant.
///
/// Engines are cheap per-request values: the variant-specific choice is
/// baked in at construction, so `resolve` only needs the stake and a
/// random source. `resolve` is infallible by contract - once a stake is
/// debited the round always produces an outcome.
pub trait WagerEngine {
    fn game(&self) -> GameType;

    /// Check stake preconditions. Called before any debit; a failure here
    /// means no state was touched.
    fn validate(&self, stake: u64) -> WagerResult<()>;

    /// Determine the outcome and payout for the given stake.
    fn resolve(&self, stake: u64, rng: &dyn OutcomeSource) -> Resolution;
}
