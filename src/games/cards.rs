//! Card high/low
//!
//! Player and dealer cards are drawn independently and with replacement
//! over 13 ranks x 4 suits; there is no deck exhaustion, so duplicate
//! cards across the two draws are expected. Suit is cosmetic. Ties always
//! lose for the player.

use crate::errors::{WagerError, WagerResult};
use crate::games::engine::{Resolution, WagerEngine};
use crate::games::types::{Card, CardChoice, GameOutcome, GameType, RoundDetail, Suit};
use crate::rng::OutcomeSource;

const RANKS: u32 = 13;
const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

pub struct CardsEngine {
    min_stake: u64,
    choice: CardChoice,
}

impl CardsEngine {
    pub fn new(min_stake: u64, choice: CardChoice) -> Self {
        Self { min_stake, choice }
    }
}

/// Uniform draw over rank x suit. Rank value is rank index + 2 (2..=14).
pub fn draw_card(rng: &dyn OutcomeSource) -> Card {
    Card {
        rank: 2 + rng.pick(RANKS) as u8,
        suit: SUITS[rng.pick(SUITS.len() as u32) as usize],
    }
}

impl WagerEngine for CardsEngine {
    fn game(&self) -> GameType {
        GameType::Cards
    }

    fn validate(&self, stake: u64) -> WagerResult<()> {
        if stake < self.min_stake {
            return Err(WagerError::BelowMinimum {
                game: "cards",
                stake,
                minimum: self.min_stake,
            });
        }
        Ok(())
    }

    fn resolve(&self, stake: u64, rng: &dyn OutcomeSource) -> Resolution {
        let player_card = draw_card(rng);
        let dealer_card = draw_card(rng);

        let won = match self.choice {
            CardChoice::Higher => dealer_card.rank > player_card.rank,
            CardChoice::Lower => dealer_card.rank < player_card.rank,
        };

        Resolution {
            payout: if won { stake * 2 } else { 0 },
            outcome: if won { GameOutcome::Win } else { GameOutcome::Loss },
            detail: RoundDetail::Cards {
                player_card,
                dealer_card,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, ThreadRngSource};

    // ScriptedSource feeds pick() via unit-interval values:
    // rank = 2 + floor(v * 13), suit = floor(v * 4).
    fn script(player_rank: u8, dealer_rank: u8) -> ScriptedSource {
        let rank_v = |rank: u8| (rank - 2) as f64 / 13.0 + 0.001;
        ScriptedSource::new([rank_v(player_rank), 0.0, rank_v(dealer_rank), 0.0])
    }

    #[test]
    fn test_rank_range() {
        let rng = ThreadRngSource;
        for _ in 0..1_000 {
            let card = draw_card(&rng);
            assert!((2..=14).contains(&card.rank));
        }
    }

    #[test]
    fn test_higher_call_wins_when_dealer_higher() {
        let engine = CardsEngine::new(0, CardChoice::Higher);
        let res = engine.resolve(100, &script(5, 11));
        assert_eq!(res.outcome, GameOutcome::Win);
        assert_eq!(res.payout, 200);
    }

    #[test]
    fn test_lower_call_loses_when_dealer_higher() {
        let engine = CardsEngine::new(0, CardChoice::Lower);
        let res = engine.resolve(100, &script(5, 11));
        assert_eq!(res.outcome, GameOutcome::Loss);
        assert_eq!(res.payout, 0);
    }

    #[test]
    fn test_tie_always_loses() {
        for choice in [CardChoice::Higher, CardChoice::Lower] {
            let engine = CardsEngine::new(0, choice);
            let res = engine.resolve(100, &script(9, 9));
            assert_eq!(res.outcome, GameOutcome::Loss);
            assert_eq!(res.payout, 0);
        }
    }

    #[test]
    fn test_detail_carries_both_cards() {
        let engine = CardsEngine::new(0, CardChoice::Higher);
        let res = engine.resolve(100, &script(3, 14));
        match res.detail {
            RoundDetail::Cards { player_card, dealer_card } => {
                assert_eq!(player_card.rank, 3);
                assert_eq!(dealer_card.rank, 14);
            }
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_minimum_stake() {
        let engine = CardsEngine::new(5_000, CardChoice::Higher);
        assert!(engine.validate(4_999).is_err());
        assert!(engine.validate(5_000).is_ok());
    }
}
