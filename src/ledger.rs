//! Balance Ledger
//!
//! Owns the authoritative balance of every account. Each mutation is a
//! single atomic operation against one account: concurrent operations on
//! the same account serialize on the map's entry lock, operations on
//! different accounts proceed independently, and there is never a
//! map-wide mutex. Every successful mutation appends an audit entry, so
//! the full history of an account is reconstructible and currency can
//! neither appear nor vanish outside recorded entries.

use crate::errors::{WagerError, WagerResult};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Why a balance changed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryReason {
    BetDebit,
    PayoutCredit,
    /// Refund of a debit whose bet could not be attached (e.g. the crash
    /// round ended between debit and attach).
    BetRefund,
    PromoCredit,
    AdminAdjust,
}

/// Append-only audit record of one balance mutation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub account_id: u64,
    pub delta: i64,
    pub resulting_balance: u64,
    pub reason: EntryReason,
    pub timestamp: DateTime<Utc>,
}

/// Account state, owned exclusively by the ledger
#[derive(Debug)]
struct Account {
    id: u64,
    balance: u64,
    is_admin: bool,
    entries: Vec<LedgerEntry>,
}

impl Account {
    fn record(&mut self, delta: i64, reason: EntryReason) {
        self.entries.push(LedgerEntry {
            account_id: self.id,
            delta,
            resulting_balance: self.balance,
            reason,
            timestamp: Utc::now(),
        });
    }
}

/// Read-only view of an account handed out to other components
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub id: u64,
    pub balance: u64,
    pub is_admin: bool,
}

/// Concurrent account store with per-account atomic debit/credit
pub struct BalanceLedger {
    accounts: DashMap<u64, Account>,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Register a new account. Fails if the id is already taken.
    pub fn create_account(&self, id: u64, balance: u64, is_admin: bool) -> WagerResult<AccountSnapshot> {
        match self.accounts.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(WagerError::AccountExists(id)),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Account {
                    id,
                    balance,
                    is_admin,
                    entries: Vec::new(),
                });
                Ok(AccountSnapshot {
                    id,
                    balance,
                    is_admin,
                })
            }
        }
    }

    /// Point-in-time view of an account
    pub fn snapshot(&self, id: u64) -> WagerResult<AccountSnapshot> {
        let account = self
            .accounts
            .get(&id)
            .ok_or(WagerError::AccountNotFound(id))?;
        Ok(AccountSnapshot {
            id: account.id,
            balance: account.balance,
            is_admin: account.is_admin,
        })
    }

    /// Atomically remove `amount` from the account.
    ///
    /// Fails with `InsufficientFunds` without any mutation if the balance
    /// does not cover the amount; the balance can never go negative.
    pub fn debit(&self, id: u64, amount: u64, reason: EntryReason) -> WagerResult<u64> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(WagerError::AccountNotFound(id))?;

        if account.balance < amount {
            return Err(WagerError::InsufficientFunds {
                balance: account.balance,
                required: amount,
            });
        }

        account.balance -= amount;
        account.record(-(amount as i64), reason);
        Ok(account.balance)
    }

    /// Atomically add `amount` to the account. A zero credit is recorded
    /// too: it documents that a round resolved with no payout.
    pub fn credit(&self, id: u64, amount: u64, reason: EntryReason) -> WagerResult<u64> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(WagerError::AccountNotFound(id))?;

        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| WagerError::Validation("balance overflow".to_string()))?;
        account.record(amount as i64, reason);
        Ok(account.balance)
    }

    /// Overwrite an account's balance (admin path). The audit entry
    /// carries the signed difference.
    pub fn set_balance(&self, id: u64, new_balance: u64) -> WagerResult<u64> {
        let mut account = self
            .accounts
            .get_mut(&id)
            .ok_or(WagerError::AccountNotFound(id))?;

        let delta = new_balance as i64 - account.balance as i64;
        account.balance = new_balance;
        account.record(delta, EntryReason::AdminAdjust);
        Ok(account.balance)
    }

    /// Clone of the account's audit trail
    pub fn audit(&self, id: u64) -> WagerResult<Vec<LedgerEntry>> {
        let account = self
            .accounts
            .get(&id)
            .ok_or(WagerError::AccountNotFound(id))?;
        Ok(account.entries.clone())
    }

    /// Sum of all recorded deltas across every account. Used by the
    /// conservation checks: the sum must equal total balances minus total
    /// seeded balances.
    pub fn total_recorded_delta(&self) -> i64 {
        self.accounts
            .iter()
            .map(|a| a.entries.iter().map(|e| e.delta).sum::<i64>())
            .sum()
    }
}

impl Default for BalanceLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_debit_and_credit_append_entries() {
        let ledger = BalanceLedger::new();
        ledger.create_account(1, 1_000, false).unwrap();

        assert_eq!(ledger.debit(1, 300, EntryReason::BetDebit).unwrap(), 700);
        assert_eq!(ledger.credit(1, 600, EntryReason::PayoutCredit).unwrap(), 1_300);

        let audit = ledger.audit(1).unwrap();
        assert_eq!(audit.len(), 2);
        assert_eq!(audit[0].delta, -300);
        assert_eq!(audit[0].resulting_balance, 700);
        assert_eq!(audit[1].delta, 600);
        assert_eq!(audit[1].resulting_balance, 1_300);
    }

    #[test]
    fn test_overdraft_is_rejected_without_mutation() {
        let ledger = BalanceLedger::new();
        ledger.create_account(1, 100, false).unwrap();

        let before = ledger.snapshot(1).unwrap().balance;
        let err = ledger.debit(1, 200, EntryReason::BetDebit).unwrap_err();
        assert!(matches!(err, WagerError::InsufficientFunds { balance: 100, required: 200 }));

        // Idempotent rejection: retrying yields the same error, state untouched.
        assert!(ledger.debit(1, 200, EntryReason::BetDebit).is_err());
        assert_eq!(ledger.snapshot(1).unwrap().balance, before);
        assert!(ledger.audit(1).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let ledger = BalanceLedger::new();
        ledger.create_account(7, 0, false).unwrap();
        assert!(matches!(
            ledger.create_account(7, 0, false),
            Err(WagerError::AccountExists(7))
        ));
    }

    #[test]
    fn test_zero_credit_is_recorded() {
        let ledger = BalanceLedger::new();
        ledger.create_account(1, 50, false).unwrap();
        ledger.credit(1, 0, EntryReason::PayoutCredit).unwrap();
        let audit = ledger.audit(1).unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].delta, 0);
    }

    #[test]
    fn test_set_balance_records_signed_delta() {
        let ledger = BalanceLedger::new();
        ledger.create_account(1, 500, false).unwrap();
        ledger.set_balance(1, 200).unwrap();
        let audit = ledger.audit(1).unwrap();
        assert_eq!(audit[0].delta, -300);
        assert_eq!(audit[0].reason, EntryReason::AdminAdjust);
    }

    #[test]
    fn test_concurrent_debits_never_double_spend() {
        let ledger = Arc::new(BalanceLedger::new());
        ledger.create_account(1, 1_000, false).unwrap();

        // 20 threads each try ten 100-cent debits; only ten total can succeed.
        let mut handles = Vec::new();
        for _ in 0..20 {
            let ledger = Arc::clone(&ledger);
            handles.push(std::thread::spawn(move || {
                let mut wins = 0u32;
                for _ in 0..10 {
                    if ledger.debit(1, 100, EntryReason::BetDebit).is_ok() {
                        wins += 1;
                    }
                }
                wins
            }));
        }

        let total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 10);
        assert_eq!(ledger.snapshot(1).unwrap().balance, 0);
        assert_eq!(ledger.total_recorded_delta(), -1_000);
    }

    #[test]
    fn test_accounts_are_independent() {
        let ledger = Arc::new(BalanceLedger::new());
        for id in 0..8 {
            ledger.create_account(id, 10_000, false).unwrap();
        }

        let mut handles = Vec::new();
        for id in 0..8 {
            let ledger = Arc::clone(&ledger);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    ledger.debit(id, 10, EntryReason::BetDebit).unwrap();
                    ledger.credit(id, 10, EntryReason::PayoutCredit).unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }

        for id in 0..8 {
            assert_eq!(ledger.snapshot(id).unwrap().balance, 10_000);
        }
        assert_eq!(ledger.total_recorded_delta(), 0);
    }
}
