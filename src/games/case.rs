//! Weighted-prize case opening
//!
//! A case is an ordered list of prizes with raw weights. Selection draws
//! uniformly over the total weight and walks the list in its defined
//! order; weights are not required to sum to 100 (the stock starter table
//! sums to 117) and simply rescale probabilities.

use crate::config::{CaseConfig, PrizeEntry};
use crate::errors::{WagerError, WagerResult};
use crate::games::engine::{Resolution, WagerEngine};
use crate::games::types::{GameOutcome, GameType, RoundDetail};
use crate::rng::OutcomeSource;

pub struct CaseEngine<'a> {
    case: &'a CaseConfig,
}

impl<'a> CaseEngine<'a> {
    pub fn new(case: &'a CaseConfig) -> Self {
        Self { case }
    }
}

/// Select the winning prize for a draw `r` in `[0, total_weight)`.
///
/// The first entry whose cumulative weight reaches `r` wins. If float
/// accumulation leaves `r` unmatched, the last entry wins - a round never
/// fails after the stake was taken.
pub fn pick_prize(prizes: &[PrizeEntry], r: f64) -> &PrizeEntry {
    let mut cumulative = 0.0;
    for prize in prizes {
        cumulative += prize.chance;
        if cumulative >= r {
            return prize;
        }
    }
    prizes.last().expect("case has at least one prize")
}

impl WagerEngine for CaseEngine<'_> {
    fn game(&self) -> GameType {
        GameType::Case
    }

    fn validate(&self, stake: u64) -> WagerResult<()> {
        if stake != self.case.price {
            return Err(WagerError::Validation(format!(
                "case '{}' costs {}, got stake {}",
                self.case.id, self.case.price, stake
            )));
        }
        Ok(())
    }

    fn resolve(&self, stake: u64, rng: &dyn OutcomeSource) -> Resolution {
        let total_weight: f64 = self.case.prizes.iter().map(|p| p.chance).sum();
        let r = rng.uniform() * total_weight;
        let prize = pick_prize(&self.case.prizes, r);

        Resolution {
            payout: prize.amount,
            outcome: if prize.amount >= stake {
                GameOutcome::Win
            } else {
                GameOutcome::Loss
            },
            detail: RoundDetail::Case {
                won_amount: prize.amount,
            },
        }
    }
}
