use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-point multiplier scale: 100 == 1.00x.
pub const MULTIPLIER_ONE: u64 = 100;

/// Supported game variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Case,
    CoinFlip,
    Cards,
    Crash,
    Mines,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Case => write!(f, "case"),
            GameType::CoinFlip => write!(f, "coinflip"),
            GameType::Cards => write!(f, "cards"),
            GameType::Crash => write!(f, "crash"),
            GameType::Mines => write!(f, "mines"),
        }
    }
}

/// A coin face: both the player's call and the flip result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl fmt::Display for CoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinSide::Heads => write!(f, "heads"),
            CoinSide::Tails => write!(f, "tails"),
        }
    }
}

/// High/low call for the cards game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CardChoice {
    Higher,
    Lower,
}

/// Cosmetic suit; never affects the outcome
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

/// A playing card. `rank` is the numeric value 2..=14 (ace high).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub rank: u8,
    pub suit: Suit,
}

/// Round outcome from the player's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    Win,
    Loss,
}

/// Variant-specific data attached to a resolved round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum RoundDetail {
    Case { won_amount: u64 },
    CoinFlip { result: CoinSide },
    Cards { player_card: Card, dealer_card: Card },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GameType::CoinFlip).unwrap(), "\"coinflip\"");
        assert_eq!(serde_json::to_string(&CoinSide::Tails).unwrap(), "\"tails\"");
        assert_eq!(serde_json::to_string(&CardChoice::Higher).unwrap(), "\"higher\"");
    }

    #[test]
    fn test_round_detail_is_tagged() {
        let detail = RoundDetail::Case { won_amount: 100 };
        let json = serde_json::to_string(&detail).unwrap();
        assert!(json.contains("\"game\":\"case\""));
    }
}
