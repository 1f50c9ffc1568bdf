//! Route definitions
//!
//! Maps URLs to handlers with type-safe routing.

use super::handlers::{self, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Build the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        // Accounts
        .route("/api/account", post(handlers::create_account))
        .route("/api/account/:id", get(handlers::get_account))
        // One-shot games
        .route("/api/case/open", post(handlers::open_case))
        .route("/api/coinflip/play", post(handlers::coinflip_play))
        .route("/api/cards/draw", post(handlers::cards_draw))
        // Crash table
        .route("/api/crash/bet", post(handlers::crash_bet))
        .route("/api/crash/cashout", post(handlers::crash_cashout))
        .route("/api/crash/state", get(handlers::crash_state))
        // Mines sessions
        .route("/api/mines/start", post(handlers::mines_start))
        .route("/api/mines/reveal", post(handlers::mines_reveal))
        .route("/api/mines/cashout", post(handlers::mines_cashout))
        // Promo and admin
        .route("/api/promo/redeem", post(handlers::redeem_promo))
        .route("/api/admin/balance", post(handlers::admin_set_balance))
        .with_state(state)
}
