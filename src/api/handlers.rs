//! Request handlers
//!
//! Each handler is a direct translation of one coordinator operation.
//! Domain errors convert into HTTP responses through [`ApiError`].

use super::errors::ApiError;
use super::models::*;
use crate::coordinator::WagerCoordinator;
use crate::games::crash::CrashSnapshot;
use crate::games::types::RoundDetail;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<WagerCoordinator>,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn metrics(State(state): State<AppState>) -> String {
    state.coordinator.metrics().render()
}

pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let snapshot = state.coordinator.create_account(req.account_id)?;
    Ok(Json(AccountResponse {
        id: snapshot.id,
        balance: snapshot.balance,
        is_admin: snapshot.is_admin,
    }))
}

pub async fn get_account(
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, ApiError> {
    let snapshot = state.coordinator.account(id)?;
    Ok(Json(AccountResponse {
        id: snapshot.id,
        balance: snapshot.balance,
        is_admin: snapshot.is_admin,
    }))
}

pub async fn open_case(
    State(state): State<AppState>,
    Json(req): Json<OpenCaseRequest>,
) -> Result<Json<OpenCaseResponse>, ApiError> {
    let receipt = state.coordinator.open_case(req.account_id, &req.case_id)?;
    Ok(Json(OpenCaseResponse {
        won_amount: receipt.payout,
        new_balance: receipt.new_balance,
    }))
}

pub async fn coinflip_play(
    State(state): State<AppState>,
    Json(req): Json<CoinFlipRequest>,
) -> Result<Json<CoinFlipResponse>, ApiError> {
    let receipt = state
        .coordinator
        .flip_coin(req.account_id, req.stake, req.choice)?;
    let result = match receipt.detail {
        RoundDetail::CoinFlip { result } => result,
        _ => unreachable!("coinflip resolves with coinflip detail"),
    };
    Ok(Json(CoinFlipResponse {
        result,
        won: won(receipt.outcome),
        payout: receipt.payout,
        new_balance: receipt.new_balance,
    }))
}

pub async fn cards_draw(
    State(state): State<AppState>,
    Json(req): Json<CardsRequest>,
) -> Result<Json<CardsResponse>, ApiError> {
    let receipt = state
        .coordinator
        .draw_card(req.account_id, req.stake, req.choice)?;
    let (player_card, dealer_card) = match receipt.detail {
        RoundDetail::Cards { player_card, dealer_card } => (player_card, dealer_card),
        _ => unreachable!("cards resolves with cards detail"),
    };
    Ok(Json(CardsResponse {
        player_card,
        dealer_card,
        won: won(receipt.outcome),
        payout: receipt.payout,
        new_balance: receipt.new_balance,
    }))
}

pub async fn crash_bet(
    State(state): State<AppState>,
    Json(req): Json<CrashBetRequest>,
) -> Result<Json<CrashBetResponse>, ApiError> {
    let (round_id, new_balance) = state.coordinator.crash_bet(req.account_id, req.stake)?;
    Ok(Json(CrashBetResponse {
        round_id,
        new_balance,
    }))
}

pub async fn crash_cashout(
    State(state): State<AppState>,
    Json(req): Json<CrashCashoutRequest>,
) -> Result<Json<CrashCashoutResponse>, ApiError> {
    let (multiplier, payout, new_balance) = state.coordinator.crash_cashout(req.account_id)?;
    Ok(Json(CrashCashoutResponse {
        multiplier,
        payout,
        new_balance,
    }))
}

pub async fn crash_state(State(state): State<AppState>) -> Json<CrashSnapshot> {
    Json(state.coordinator.crash_state())
}

pub async fn mines_start(
    State(state): State<AppState>,
    Json(req): Json<MinesStartRequest>,
) -> Result<Json<MinesStartResponse>, ApiError> {
    let (session_id, new_balance) = state.coordinator.mines_start(req.account_id, req.stake)?;
    Ok(Json(MinesStartResponse {
        session_id,
        new_balance,
    }))
}

pub async fn mines_reveal(
    State(state): State<AppState>,
    Json(req): Json<MinesRevealRequest>,
) -> Result<Json<MinesRevealResponse>, ApiError> {
    let outcome = state.coordinator.mines_reveal(req.session_id, req.cell)?;
    Ok(Json(MinesRevealResponse {
        is_mine: outcome.is_mine,
        multiplier: outcome.multiplier,
        mines: outcome.mines,
    }))
}

pub async fn mines_cashout(
    State(state): State<AppState>,
    Json(req): Json<MinesCashoutRequest>,
) -> Result<Json<MinesCashoutResponse>, ApiError> {
    let (payout, new_balance, mines) = state.coordinator.mines_cashout(req.session_id)?;
    Ok(Json(MinesCashoutResponse {
        payout,
        new_balance,
        mines,
    }))
}

pub async fn redeem_promo(
    State(state): State<AppState>,
    Json(req): Json<RedeemPromoRequest>,
) -> Result<Json<RedeemPromoResponse>, ApiError> {
    let (amount, new_balance) = state.coordinator.redeem_promo(req.account_id, &req.code)?;
    Ok(Json(RedeemPromoResponse {
        amount,
        new_balance,
    }))
}

pub async fn admin_set_balance(
    State(state): State<AppState>,
    Json(req): Json<AdminBalanceRequest>,
) -> Result<Json<AdminBalanceResponse>, ApiError> {
    let new_balance =
        state
            .coordinator
            .admin_set_balance(req.admin_id, req.account_id, req.new_balance)?;
    Ok(Json(AdminBalanceResponse { new_balance }))
}
