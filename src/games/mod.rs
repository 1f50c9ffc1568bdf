//! Game variants and their shared wager contract

pub mod cards;
pub mod case;
pub mod coinflip;
pub mod crash;
pub mod engine;
pub mod mines;
pub mod types;

pub use engine::{Resolution, WagerEngine};
pub use types::*;
