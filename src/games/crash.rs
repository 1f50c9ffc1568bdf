//! Crash: rising-multiplier table shared by all players
//!
//! One round exists at a time. The multiplier starts at exactly 1.00x and
//! climbs +0.01x per tick until it reaches a crash point sampled once per
//! round and hidden until reached. Players attach at most one bet per
//! round while it is active and may cash out at the multiplier observed
//! under the table lock; a cash-out processed after the crash transition
//! is rejected regardless of when it was sent. After a crash the table
//! cools down for a fixed period and then starts a fresh round.
//!
//! All transition logic lives in the synchronous [`CrashTable::tick`];
//! the tokio driver task only supplies the wall-clock pacing, so the
//! state machine is fully testable without time.

use crate::config::CrashConfig;
use crate::errors::{WagerError, WagerResult};
use crate::games::types::MULTIPLIER_ONE;
use crate::rng::OutcomeSource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Active,
    Crashed,
}

/// Externally visible view of the table. The crash point is deliberately
/// absent: it is disclosed only through the `Crashed` tick event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CrashSnapshot {
    pub round_id: u64,
    pub phase: RoundPhase,
    /// Current multiplier in hundredths.
    pub multiplier: u64,
}

/// What a single tick did, for the driver's logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// Multiplier advanced while active.
    Advanced { multiplier: u64 },
    /// The multiplier reached the hidden crash point this tick.
    Crashed {
        round_id: u64,
        crash_point: u64,
        lost_bets: usize,
    },
    /// Waiting out the cooldown between rounds.
    CoolingDown { ticks_remaining: u64 },
    /// Cooldown elapsed; a new round just started.
    NewRound { round_id: u64 },
}

struct RoundState {
    round_id: u64,
    phase: RoundPhase,
    multiplier: u64,
    /// Sampled at round start, hidden from players until reached.
    crash_point: u64,
    /// account -> stake, unresolved bets on this round.
    bets: HashMap<u64, u64>,
    cooldown_ticks_remaining: u64,
}

pub struct CrashTable {
    config: CrashConfig,
    state: Mutex<RoundState>,
    rng: Arc<dyn OutcomeSource>,
}

impl CrashTable {
    pub fn new(config: CrashConfig, rng: Arc<dyn OutcomeSource>) -> Self {
        let crash_point = sample_crash_point(&config, rng.as_ref());
        Self {
            config,
            state: Mutex::new(RoundState {
                round_id: 1,
                phase: RoundPhase::Active,
                multiplier: MULTIPLIER_ONE,
                crash_point,
                bets: HashMap::new(),
                cooldown_ticks_remaining: 0,
            }),
            rng,
        }
    }

    /// Attach a bet to the current round. The stake must already be
    /// debited by the coordinator; on failure the coordinator refunds it.
    pub fn attach_bet(&self, account: u64, stake: u64) -> WagerResult<u64> {
        let mut state = self.state.lock().unwrap();
        if state.phase != RoundPhase::Active {
            return Err(WagerError::InvalidState("crash round is not active"));
        }
        if state.bets.contains_key(&account) {
            return Err(WagerError::InvalidState(
                "account already has a bet on this round",
            ));
        }
        state.bets.insert(account, stake);
        debug!(account, stake, round = state.round_id, "crash bet attached");
        Ok(state.round_id)
    }

    /// Resolve the account's bet at the multiplier current under the lock.
    ///
    /// Returns `(multiplier, stake)`; the coordinator computes and credits
    /// the payout. Rejected once the round has crashed, even for requests
    /// that were in flight before the transition.
    pub fn cash_out(&self, account: u64) -> WagerResult<(u64, u64)> {
        let mut state = self.state.lock().unwrap();
        if state.phase != RoundPhase::Active {
            return Err(WagerError::InvalidState("crash round already crashed"));
        }
        let stake = state
            .bets
            .remove(&account)
            .ok_or(WagerError::InvalidState("no unresolved bet on this round"))?;
        let multiplier = state.multiplier;
        debug!(account, multiplier, round = state.round_id, "crash cash-out");
        Ok((multiplier, stake))
    }

    /// Advance the state machine one tick.
    pub fn tick(&self) -> TickEvent {
        let mut state = self.state.lock().unwrap();
        match state.phase {
            RoundPhase::Active => {
                let next = state.multiplier + 1;
                if next >= state.crash_point {
                    // Clamp to the crash point so the final observed value
                    // is the sampled one.
                    state.multiplier = state.multiplier.max(state.crash_point);
                    state.phase = RoundPhase::Crashed;
                    state.cooldown_ticks_remaining = self.cooldown_ticks();
                    let lost_bets = state.bets.len();
                    // Stakes were debited at bet time; losing bets need no
                    // further ledger action.
                    state.bets.clear();
                    info!(
                        round = state.round_id,
                        crash_point = state.crash_point,
                        lost_bets,
                        "crash round ended"
                    );
                    TickEvent::Crashed {
                        round_id: state.round_id,
                        crash_point: state.crash_point,
                        lost_bets,
                    }
                } else {
                    state.multiplier = next;
                    TickEvent::Advanced {
                        multiplier: state.multiplier,
                    }
                }
            }
            RoundPhase::Crashed => {
                if state.cooldown_ticks_remaining > 1 {
                    state.cooldown_ticks_remaining -= 1;
                    TickEvent::CoolingDown {
                        ticks_remaining: state.cooldown_ticks_remaining,
                    }
                } else {
                    state.round_id += 1;
                    state.phase = RoundPhase::Active;
                    state.multiplier = MULTIPLIER_ONE;
                    state.crash_point = sample_crash_point(&self.config, self.rng.as_ref());
                    state.cooldown_ticks_remaining = 0;
                    debug!(round = state.round_id, "crash round started");
                    TickEvent::NewRound {
                        round_id: state.round_id,
                    }
                }
            }
        }
    }

    pub fn snapshot(&self) -> CrashSnapshot {
        let state = self.state.lock().unwrap();
        CrashSnapshot {
            round_id: state.round_id,
            phase: state.phase,
            multiplier: state.multiplier,
        }
    }

    fn cooldown_ticks(&self) -> u64 {
        (self.config.cooldown_ms / self.config.tick_interval_ms).max(1)
    }
}

/// Sample a crash point in hundredths: with `rare_probability` uniform
/// over `[1, rare_max)`, otherwise uniform over `[1, common_max)`. Most
/// rounds crash below the common ceiling; rare rounds reach the long tail.
fn sample_crash_point(config: &CrashConfig, rng: &dyn OutcomeSource) -> u64 {
    let max = if rng.uniform() < config.rare_probability {
        config.rare_max
    } else {
        config.common_max
    };
    let point = 1.0 + rng.uniform() * (max - 1.0);
    (point * MULTIPLIER_ONE as f64) as u64
}

/// Spawn the wall-clock driver that paces the table.
pub fn spawn_driver(table: Arc<CrashTable>) -> tokio::task::JoinHandle<()> {
    let interval = std::time::Duration::from_millis(table.config.tick_interval_ms);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            table.tick();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{ScriptedSource, ThreadRngSource};

    fn test_config() -> CrashConfig {
        CrashConfig {
            tick_interval_ms: 100,
            cooldown_ms: 2_000,
            rare_probability: 0.05,
            rare_max: 6.0,
            common_max: 4.0,
        }
    }

    /// Table whose first round crashes at exactly `point` hundredths.
    fn table_with_point(point: u64) -> CrashTable {
        // First uniform() selects the range (0.5 -> common, max 4.0);
        // second maps into [1, 4). The epsilon keeps the truncation from
        // landing one below the intended point.
        let v = (point as f64 / 100.0 - 1.0) / 3.0 + 1e-6;
        let rng = Arc::new(ScriptedSource::new([0.5, v]));
        CrashTable::new(test_config(), rng)
    }

    #[test]
    fn test_round_starts_at_exactly_one() {
        let table = table_with_point(250);
        let snap = table.snapshot();
        assert_eq!(snap.multiplier, MULTIPLIER_ONE);
        assert_eq!(snap.phase, RoundPhase::Active);
        assert_eq!(snap.round_id, 1);
    }

    #[test]
    fn test_multiplier_strictly_increases_until_crash() {
        let table = table_with_point(150);
        let mut last = table.snapshot().multiplier;
        loop {
            match table.tick() {
                TickEvent::Advanced { multiplier } => {
                    assert_eq!(multiplier, last + 1);
                    last = multiplier;
                }
                TickEvent::Crashed { crash_point, .. } => {
                    assert_eq!(crash_point, 150);
                    break;
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
        assert_eq!(table.snapshot().phase, RoundPhase::Crashed);
    }

    #[test]
    fn test_cashout_at_start_returns_stake() {
        let table = table_with_point(300);
        table.attach_bet(1, 500).unwrap();
        let (multiplier, stake) = table.cash_out(1).unwrap();
        assert_eq!(multiplier, MULTIPLIER_ONE);
        assert_eq!(stake * multiplier / MULTIPLIER_ONE, 500);
    }

    #[test]
    fn test_one_bet_per_account_per_round() {
        let table = table_with_point(300);
        table.attach_bet(1, 500).unwrap();
        assert!(matches!(
            table.attach_bet(1, 500),
            Err(WagerError::InvalidState(_))
        ));
        // A different account can still bet.
        table.attach_bet(2, 700).unwrap();
    }

    #[test]
    fn test_cashout_rejected_after_crash() {
        let table = table_with_point(120);
        table.attach_bet(1, 500).unwrap();

        // Run the round into the ground.
        loop {
            if let TickEvent::Crashed { lost_bets, .. } = table.tick() {
                assert_eq!(lost_bets, 1);
                break;
            }
        }

        assert!(matches!(
            table.cash_out(1),
            Err(WagerError::InvalidState(_))
        ));
    }

    #[test]
    fn test_bet_rejected_while_crashed_and_new_round_resets() {
        let table = table_with_point(110);
        loop {
            if let TickEvent::Crashed { .. } = table.tick() {
                break;
            }
        }
        assert!(table.attach_bet(1, 500).is_err());

        // Cooldown: 2000ms / 100ms = 20 ticks until the next round.
        let mut event = table.tick();
        while let TickEvent::CoolingDown { .. } = event {
            event = table.tick();
        }
        assert_eq!(event, TickEvent::NewRound { round_id: 2 });

        let snap = table.snapshot();
        assert_eq!(snap.multiplier, MULTIPLIER_ONE);
        assert_eq!(snap.phase, RoundPhase::Active);
        // Fresh round accepts bets again, including from round-1 losers.
        table.attach_bet(1, 500).unwrap();
    }

    #[test]
    fn test_mid_round_cashout_multiplier() {
        let table = table_with_point(300);
        table.attach_bet(1, 1_000).unwrap();
        for _ in 0..50 {
            table.tick();
        }
        let (multiplier, stake) = table.cash_out(1).unwrap();
        assert_eq!(multiplier, 150);
        assert_eq!(stake * multiplier / MULTIPLIER_ONE, 1_500);
    }

    #[test]
    fn test_crash_point_distribution_bounds() {
        let config = test_config();
        let rng = ThreadRngSource;
        for _ in 0..10_000 {
            let point = sample_crash_point(&config, &rng);
            assert!((100..600).contains(&point), "point {} out of range", point);
        }
    }
}
