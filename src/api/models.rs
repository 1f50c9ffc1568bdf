//! Request and response shapes for the HTTP API
//!
//! All currency values are fixed-point minor units (cents); multipliers
//! are hundredths (140 == 1.40x).

use crate::games::types::{Card, CardChoice, CoinSide, GameOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub account_id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenCaseRequest {
    pub account_id: u64,
    pub case_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenCaseResponse {
    pub won_amount: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinFlipRequest {
    pub account_id: u64,
    pub stake: u64,
    pub choice: CoinSide,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinFlipResponse {
    pub result: CoinSide,
    pub won: bool,
    pub payout: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardsRequest {
    pub account_id: u64,
    pub stake: u64,
    pub choice: CardChoice,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardsResponse {
    pub player_card: Card,
    pub dealer_card: Card,
    pub won: bool,
    pub payout: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrashBetRequest {
    pub account_id: u64,
    pub stake: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrashBetResponse {
    pub round_id: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrashCashoutRequest {
    pub account_id: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrashCashoutResponse {
    pub multiplier: u64,
    pub payout: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinesStartRequest {
    pub account_id: u64,
    pub stake: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MinesStartResponse {
    pub session_id: Uuid,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinesRevealRequest {
    pub session_id: Uuid,
    pub cell: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct MinesRevealResponse {
    pub is_mine: bool,
    pub multiplier: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mines: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MinesCashoutRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct MinesCashoutResponse {
    pub payout: u64,
    pub new_balance: u64,
    pub mines: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedeemPromoRequest {
    pub account_id: u64,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedeemPromoResponse {
    pub amount: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminBalanceRequest {
    pub admin_id: u64,
    pub account_id: u64,
    pub new_balance: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminBalanceResponse {
    pub new_balance: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: u64,
    pub balance: u64,
    pub is_admin: bool,
}

/// Helper so handlers can expose win/loss as a boolean
pub fn won(outcome: GameOutcome) -> bool {
    outcome == GameOutcome::Win
}
