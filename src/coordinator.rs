//! Wager Coordinator
//!
//! Orchestrates every bet: validate -> debit -> resolve -> credit. It is
//! the only component that touches both wallet state and game state in
//! one operation; the engines themselves never mutate balances. The
//! debit always happens before the game engine runs, so a fault after
//! the debit leaves a recorded liability, never free money.

use crate::config::{CaseConfig, CasinoConfig};
use crate::errors::{WagerError, WagerResult};
use crate::games::case::CaseEngine;
use crate::games::cards::CardsEngine;
use crate::games::coinflip::CoinFlipEngine;
use crate::games::crash::{CrashSnapshot, CrashTable};
use crate::games::engine::WagerEngine;
use crate::games::mines::{MinesGame, RevealOutcome};
use crate::games::types::{Card, CardChoice, CoinSide, GameOutcome, RoundDetail};
use crate::ledger::{AccountSnapshot, BalanceLedger, EntryReason};
use crate::metrics::WagerMetrics;
use crate::promo::PromoLedger;
use crate::rng::OutcomeSource;
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of one settled one-shot round
#[derive(Debug, Clone)]
pub struct RoundReceipt {
    pub outcome: GameOutcome,
    pub payout: u64,
    pub new_balance: u64,
    pub detail: RoundDetail,
}

pub struct WagerCoordinator {
    config: CasinoConfig,
    ledger: Arc<BalanceLedger>,
    promos: PromoLedger,
    crash: Arc<CrashTable>,
    cases: HashMap<String, CaseConfig>,
    mines_sessions: DashMap<Uuid, MinesGame>,
    rng: Arc<dyn OutcomeSource>,
    metrics: Arc<WagerMetrics>,
}

impl WagerCoordinator {
    pub fn new(config: CasinoConfig, rng: Arc<dyn OutcomeSource>) -> Self {
        let ledger = Arc::new(BalanceLedger::new());
        for account in &config.accounts {
            // Seed accounts come from validated config; duplicates there
            // are a deployment mistake worth surfacing loudly.
            if let Err(e) = ledger.create_account(account.id, account.balance, account.is_admin) {
                warn!(account = account.id, error = %e, "skipping seed account");
            }
        }

        let promos = PromoLedger::new(config.promos.clone());
        let crash = Arc::new(CrashTable::new(config.crash.clone(), Arc::clone(&rng)));
        let cases = config
            .cases
            .iter()
            .map(|c| (c.id.clone(), c.clone()))
            .collect();

        Self {
            config,
            ledger,
            promos,
            crash,
            cases,
            mines_sessions: DashMap::new(),
            rng,
            metrics: Arc::new(WagerMetrics::new()),
        }
    }

    pub fn ledger(&self) -> &Arc<BalanceLedger> {
        &self.ledger
    }

    pub fn crash_table(&self) -> &Arc<CrashTable> {
        &self.crash
    }

    pub fn metrics(&self) -> &Arc<WagerMetrics> {
        &self.metrics
    }

    /// Register a new account with the configured starting balance.
    pub fn create_account(&self, id: u64) -> WagerResult<AccountSnapshot> {
        self.ledger
            .create_account(id, self.config.starting_balance, false)
    }

    pub fn account(&self, id: u64) -> WagerResult<AccountSnapshot> {
        self.ledger.snapshot(id)
    }

    /// The shared bet lifecycle for one-shot games: validate the stake,
    /// debit it, resolve the outcome, credit the payout.
    fn play(&self, account: u64, stake: u64, engine: &dyn WagerEngine) -> WagerResult<RoundReceipt> {
        engine.validate(stake).map_err(|e| {
            self.metrics.record_rejection();
            e
        })?;
        self.ledger
            .debit(account, stake, EntryReason::BetDebit)
            .map_err(|e| {
                self.metrics.record_rejection();
                e
            })?;

        // Resolution is infallible: from here the round always settles.
        let resolution = engine.resolve(stake, self.rng.as_ref());
        let new_balance =
            self.ledger
                .credit(account, resolution.payout, EntryReason::PayoutCredit)?;

        self.metrics.record_round(stake, resolution.payout);
        info!(
            account,
            game = %engine.game(),
            stake,
            payout = resolution.payout,
            "round settled"
        );

        Ok(RoundReceipt {
            outcome: resolution.outcome,
            payout: resolution.payout,
            new_balance,
            detail: resolution.detail,
        })
    }

    /// Open a case; the stake is the case price.
    pub fn open_case(&self, account: u64, case_id: &str) -> WagerResult<RoundReceipt> {
        let case = self
            .cases
            .get(case_id)
            .ok_or_else(|| WagerError::CaseNotFound(case_id.to_string()))?;
        self.play(account, case.price, &CaseEngine::new(case))
    }

    pub fn flip_coin(&self, account: u64, stake: u64, call: CoinSide) -> WagerResult<RoundReceipt> {
        let engine = CoinFlipEngine::new(self.config.limits.coinflip, call);
        self.play(account, stake, &engine)
    }

    pub fn draw_card(
        &self,
        account: u64,
        stake: u64,
        choice: CardChoice,
    ) -> WagerResult<RoundReceipt> {
        let engine = CardsEngine::new(self.config.limits.cards, choice);
        self.play(account, stake, &engine)
    }

    /// Attach a bet to the live crash round. Debits first; if the round
    /// ended or the account already bet between debit and attach, the
    /// debit is refunded so the pair is fully unapplied.
    pub fn crash_bet(&self, account: u64, stake: u64) -> WagerResult<(u64, u64)> {
        if stake < self.config.limits.crash {
            self.metrics.record_rejection();
            return Err(WagerError::BelowMinimum {
                game: "crash",
                stake,
                minimum: self.config.limits.crash,
            });
        }

        let after_debit = self.ledger.debit(account, stake, EntryReason::BetDebit)?;
        match self.crash.attach_bet(account, stake) {
            Ok(round_id) => Ok((round_id, after_debit)),
            Err(e) => {
                let refunded = self.ledger.credit(account, stake, EntryReason::BetRefund)?;
                info!(account, stake, refunded, "crash bet refunded: {}", e);
                Err(e)
            }
        }
    }

    /// Cash out of the live crash round at the multiplier observed when
    /// the request is processed under the table lock.
    pub fn crash_cashout(&self, account: u64) -> WagerResult<(u64, u64, u64)> {
        let (multiplier, stake) = self.crash.cash_out(account)?;
        let payout = stake * multiplier / crate::games::types::MULTIPLIER_ONE;
        let new_balance = self
            .ledger
            .credit(account, payout, EntryReason::PayoutCredit)?;
        self.metrics.record_round(stake, payout);
        Ok((multiplier, payout, new_balance))
    }

    pub fn crash_state(&self) -> CrashSnapshot {
        self.crash.snapshot()
    }

    /// Start a mines game: debit the stake and open a session.
    pub fn mines_start(&self, account: u64, stake: u64) -> WagerResult<(Uuid, u64)> {
        if stake < self.config.limits.mines {
            self.metrics.record_rejection();
            return Err(WagerError::BelowMinimum {
                game: "mines",
                stake,
                minimum: self.config.limits.mines,
            });
        }

        let new_balance = self.ledger.debit(account, stake, EntryReason::BetDebit)?;
        let game = MinesGame::start(account, stake, &self.config.mines, self.rng.as_ref());
        let session = Uuid::new_v4();
        self.mines_sessions.insert(session, game);
        info!(account, stake, %session, "mines game started");
        Ok((session, new_balance))
    }

    pub fn mines_reveal(&self, session: Uuid, cell: u8) -> WagerResult<RevealOutcome> {
        let mut game = self
            .mines_sessions
            .get_mut(&session)
            .ok_or(WagerError::SessionNotFound(session))?;

        let outcome = game.reveal(cell)?;
        if outcome.is_mine {
            // Stake was debited at start; a loss settles with zero payout.
            self.ledger
                .credit(game.account, 0, EntryReason::PayoutCredit)?;
            self.metrics.record_round(game.stake, 0);
            info!(account = game.account, %session, "mines game lost");
        }
        Ok(outcome)
    }

    /// Cash out a mines session: credit stake x multiplier and disclose
    /// the layout.
    pub fn mines_cashout(&self, session: Uuid) -> WagerResult<(u64, u64, Vec<u8>)> {
        let mut game = self
            .mines_sessions
            .get_mut(&session)
            .ok_or(WagerError::SessionNotFound(session))?;

        let multiplier = game.cash_out()?;
        let payout = game.stake * multiplier / crate::games::types::MULTIPLIER_ONE;
        let new_balance = self
            .ledger
            .credit(game.account, payout, EntryReason::PayoutCredit)?;
        self.metrics.record_round(game.stake, payout);
        info!(account = game.account, %session, payout, "mines cashed out");

        let mines = game
            .disclosed_mines()
            .expect("finished game discloses layout");
        Ok((payout, new_balance, mines))
    }

    /// Redeem a promo code, crediting its amount once per allowed use.
    pub fn redeem_promo(&self, account: u64, code: &str) -> WagerResult<(u64, u64)> {
        // Verify the account exists before consuming a redemption.
        self.ledger.snapshot(account)?;

        let amount = self.promos.redeem(account, code)?;
        let new_balance = self
            .ledger
            .credit(account, amount, EntryReason::PromoCredit)?;
        self.metrics.record_promo_credit(amount);
        info!(account, code, amount, "promo redeemed");
        Ok((amount, new_balance))
    }

    /// Overwrite a target account's balance. Requires the caller's
    /// administrative flag.
    pub fn admin_set_balance(
        &self,
        admin_id: u64,
        target_id: u64,
        new_balance: u64,
    ) -> WagerResult<u64> {
        let admin = self.ledger.snapshot(admin_id)?;
        if !admin.is_admin {
            warn!(
                caller = admin_id,
                target = target_id,
                "forbidden admin balance update attempt"
            );
            return Err(WagerError::Forbidden);
        }

        let balance = self.ledger.set_balance(target_id, new_balance)?;
        info!(admin = admin_id, target = target_id, balance, "admin set balance");
        Ok(balance)
    }
}
