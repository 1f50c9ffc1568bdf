//! Coin flip: even-odds call with a 2x payout

use crate::errors::{WagerError, WagerResult};
use crate::games::engine::{Resolution, WagerEngine};
use crate::games::types::{CoinSide, GameOutcome, GameType, RoundDetail};
use crate::rng::OutcomeSource;

pub struct CoinFlipEngine {
    min_stake: u64,
    call: CoinSide,
}

impl CoinFlipEngine {
    pub fn new(min_stake: u64, call: CoinSide) -> Self {
        Self { min_stake, call }
    }
}

impl WagerEngine for CoinFlipEngine {
    fn game(&self) -> GameType {
        GameType::CoinFlip
    }

    fn validate(&self, stake: u64) -> WagerResult<()> {
        if stake < self.min_stake {
            return Err(WagerError::BelowMinimum {
                game: "coinflip",
                stake,
                minimum: self.min_stake,
            });
        }
        Ok(())
    }

    fn resolve(&self, stake: u64, rng: &dyn OutcomeSource) -> Resolution {
        let result = if rng.uniform() < 0.5 {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        };
        let won = result == self.call;

        Resolution {
            payout: if won { stake * 2 } else { 0 },
            outcome: if won { GameOutcome::Win } else { GameOutcome::Loss },
            detail: RoundDetail::CoinFlip { result },
        }
    }
}
