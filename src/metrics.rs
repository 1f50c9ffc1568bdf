//! Wager volume monitoring

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct WagerMetrics {
    start_time: Instant,
    rounds_played: AtomicU64,
    total_wagered: AtomicU64,
    total_paid_out: AtomicU64,
    promo_credits: AtomicU64,
    rejected_requests: AtomicU64,
}

impl WagerMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            rounds_played: AtomicU64::new(0),
            total_wagered: AtomicU64::new(0),
            total_paid_out: AtomicU64::new(0),
            promo_credits: AtomicU64::new(0),
            rejected_requests: AtomicU64::new(0),
        }
    }

    pub fn record_round(&self, stake: u64, payout: u64) {
        self.rounds_played.fetch_add(1, Ordering::Relaxed);
        self.total_wagered.fetch_add(stake, Ordering::Relaxed);
        self.total_paid_out.fetch_add(payout, Ordering::Relaxed);
    }

    pub fn record_promo_credit(&self, amount: u64) {
        self.promo_credits.fetch_add(amount, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejected_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Realized house edge: wagered minus paid out, as a fraction of wagered.
    pub fn realized_house_edge(&self) -> f64 {
        let wagered = self.total_wagered.load(Ordering::Relaxed);
        if wagered == 0 {
            return 0.0;
        }
        let paid = self.total_paid_out.load(Ordering::Relaxed);
        (wagered as f64 - paid as f64) / wagered as f64
    }

    /// Plain-text exposition for the /metrics endpoint
    pub fn render(&self) -> String {
        format!(
            "wagerhouse_uptime_seconds {}\n\
             wagerhouse_rounds_total {}\n\
             wagerhouse_wagered_cents_total {}\n\
             wagerhouse_paid_out_cents_total {}\n\
             wagerhouse_promo_credits_cents_total {}\n\
             wagerhouse_rejected_requests_total {}\n\
             wagerhouse_realized_house_edge {:.6}\n",
            self.start_time.elapsed().as_secs(),
            self.rounds_played.load(Ordering::Relaxed),
            self.total_wagered.load(Ordering::Relaxed),
            self.total_paid_out.load(Ordering::Relaxed),
            self.promo_credits.load(Ordering::Relaxed),
            self.rejected_requests.load(Ordering::Relaxed),
            self.realized_house_edge(),
        )
    }
}

impl Default for WagerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_edge_calculation() {
        let metrics = WagerMetrics::new();
        assert_eq!(metrics.realized_house_edge(), 0.0);

        metrics.record_round(1_000, 0);
        metrics.record_round(1_000, 1_500);
        assert!((metrics.realized_house_edge() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_render_contains_counters() {
        let metrics = WagerMetrics::new();
        metrics.record_round(500, 1_000);
        metrics.record_promo_credit(250);
        let text = metrics.render();
        assert!(text.contains("wagerhouse_rounds_total 1"));
        assert!(text.contains("wagerhouse_wagered_cents_total 500"));
        assert!(text.contains("wagerhouse_promo_credits_cents_total 250"));
    }
}
