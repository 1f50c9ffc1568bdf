//! Wagerhouse - chance-based wagering engine
//!
//! Accepts a player's bet against a declared balance, determines an outcome
//! for one of five game variants (case opening, coin flip, crash, card
//! high/low, mines), computes a payout and atomically updates the player's
//! balance. Promo codes credit balance once per account up to a configured
//! cap. Identity and persistence technology are external collaborators.

pub mod api;
pub mod config;
pub mod coordinator;
pub mod errors;
pub mod games;
pub mod ledger;
pub mod metrics;
pub mod promo;
pub mod rng;

pub use config::CasinoConfig;
pub use coordinator::WagerCoordinator;
pub use errors::{WagerError, WagerResult};
pub use ledger::BalanceLedger;
