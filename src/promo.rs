//! Promo Ledger
//!
//! Tracks per-account redemption counts for limited-use promotional codes.
//! The credit itself is applied by the coordinator; this component only
//! decides whether a redemption is allowed and bumps the counter.

use crate::config::PromoConfig;
use crate::errors::{WagerError, WagerResult};
use dashmap::DashMap;
use std::collections::HashMap;

pub struct PromoLedger {
    codes: HashMap<String, PromoConfig>,
    /// (account, code) -> times redeemed
    redemptions: DashMap<(u64, String), u32>,
}

impl PromoLedger {
    pub fn new(codes: impl IntoIterator<Item = PromoConfig>) -> Self {
        Self {
            codes: codes.into_iter().map(|c| (c.code.clone(), c)).collect(),
            redemptions: DashMap::new(),
        }
    }

    /// Redeem `code` for `account`, returning the credit amount.
    ///
    /// The counter increments atomically with the cap check, so two
    /// concurrent redemptions of a one-use code cannot both pass.
    pub fn redeem(&self, account: u64, code: &str) -> WagerResult<u64> {
        let promo = self.codes.get(code).ok_or(WagerError::PromoNotFound)?;

        let mut count = self
            .redemptions
            .entry((account, code.to_string()))
            .or_insert(0);
        if *count >= promo.max_uses {
            return Err(WagerError::PromoExhausted);
        }
        *count += 1;
        Ok(promo.amount)
    }

    /// Times `account` has redeemed `code`
    pub fn redemption_count(&self, account: u64, code: &str) -> u32 {
        self.redemptions
            .get(&(account, code.to_string()))
            .map(|c| *c)
            .unwrap_or(0)
    }
}
