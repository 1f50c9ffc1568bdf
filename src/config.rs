//! Configuration for the wagering engine
//!
//! Centralized configuration with TOML file loading, environment variable
//! overrides and validation. Every tunable the engine recognizes lives
//! here: per-game minimum stakes, case prize tables, promo codes, crash
//! curve parameters, mine field shape and the API bind address.
//!
//! All currency amounts are fixed-point minor units (cents).

use crate::errors::{WagerError, WagerResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CasinoConfig {
    pub api: ApiConfig,
    pub limits: StakeLimits,
    pub crash: CrashConfig,
    pub mines: MinesConfig,
    pub cases: Vec<CaseConfig>,
    pub promos: Vec<PromoConfig>,
    pub accounts: Vec<AccountConfig>,
    /// Balance granted to accounts created through the API.
    pub starting_balance: u64,
}

/// HTTP API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub listen_address: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

/// Per-game minimum stakes (cents)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StakeLimits {
    pub coinflip: u64,
    pub cards: u64,
    pub crash: u64,
    pub mines: u64,
}

/// Crash table parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashConfig {
    /// Multiplier advances +0.01x per tick.
    pub tick_interval_ms: u64,
    /// Pause between a crash and the next round.
    pub cooldown_ms: u64,
    /// Probability the round uses the long-tail range.
    pub rare_probability: f64,
    /// Upper bound of the long-tail crash point range (exclusive).
    pub rare_max: f64,
    /// Upper bound of the common crash point range (exclusive).
    pub common_max: f64,
}

/// Mine field parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinesConfig {
    pub cells: u8,
    pub mines: u8,
    /// Multiplier gain per safe reveal, in hundredths (40 == +0.40x).
    pub step_hundredths: u64,
}

/// One weighted prize inside a case
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PrizeEntry {
    pub amount: u64,
    /// Raw weight. Weights across a case need not sum to 100; selection
    /// normalizes by the total.
    pub chance: f64,
}

/// Case opening definition: a price and an ordered weighted prize list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseConfig {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub prizes: Vec<PrizeEntry>,
}

/// Limited-use promotional code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoConfig {
    pub code: String,
    pub amount: u64,
    /// Times a single account may redeem this code.
    pub max_uses: u32,
}

/// Account seeded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: u64,
    #[serde(default)]
    pub balance: u64,
    #[serde(default)]
    pub is_admin: bool,
}

impl Default for CasinoConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            limits: StakeLimits::default(),
            crash: CrashConfig::default(),
            mines: MinesConfig::default(),
            cases: default_cases(),
            promos: vec![],
            accounts: vec![],
            starting_balance: 0,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        }
    }
}

impl Default for StakeLimits {
    fn default() -> Self {
        Self {
            coinflip: 3_500,
            cards: 5_000,
            crash: 1_000,
            mines: 1_500,
        }
    }
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 100,
            cooldown_ms: 2_000,
            rare_probability: 0.05,
            rare_max: 6.0,
            common_max: 4.0,
        }
    }
}

impl Default for MinesConfig {
    fn default() -> Self {
        Self {
            cells: 25,
            mines: 5,
            step_hundredths: 40,
        }
    }
}

/// Stock case tables shipped with the engine.
fn default_cases() -> Vec<CaseConfig> {
    vec![
        CaseConfig {
            id: "bomj".to_string(),
            name: "Starter".to_string(),
            price: 3_000,
            prizes: vec![
                PrizeEntry { amount: 10_000, chance: 50.0 },
                PrizeEntry { amount: 20_000, chance: 24.0 },
                PrizeEntry { amount: 25_000, chance: 23.0 },
                PrizeEntry { amount: 30_000, chance: 20.0 },
            ],
        },
        CaseConfig {
            id: "rich".to_string(),
            name: "High Roller".to_string(),
            price: 56_000,
            prizes: vec![
                PrizeEntry { amount: 35_000, chance: 75.0 },
                PrizeEntry { amount: 40_000, chance: 50.0 },
                PrizeEntry { amount: 120_000, chance: 11.0 },
                PrizeEntry { amount: 300_000, chance: 10.0 },
                PrizeEntry { amount: 1_500_000, chance: 0.0001 },
            ],
        },
    ]
}

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> WagerResult<CasinoConfig> {
        let mut config = if let Some(ref path) = self.config_path {
            self.load_from_file(path)?
        } else {
            CasinoConfig::default()
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> WagerResult<CasinoConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WagerError::Configuration(format!("failed to read {}: {}", path, e))
        })?;

        toml::from_str(&content)
            .map_err(|e| WagerError::Configuration(format!("failed to parse TOML: {}", e)))
    }

    fn apply_env_overrides(&self, config: &mut CasinoConfig) -> WagerResult<()> {
        if let Ok(addr) = env::var("WAGERHOUSE_API_ADDRESS") {
            config.api.listen_address = addr;
        }
        if let Ok(port) = env::var("WAGERHOUSE_API_PORT") {
            config.api.port = port.parse().map_err(|_| {
                WagerError::Configuration(format!("invalid WAGERHOUSE_API_PORT: {}", port))
            })?;
        }
        if let Ok(tick) = env::var("WAGERHOUSE_CRASH_TICK_MS") {
            config.crash.tick_interval_ms = tick.parse().map_err(|_| {
                WagerError::Configuration(format!("invalid WAGERHOUSE_CRASH_TICK_MS: {}", tick))
            })?;
        }
        if let Ok(balance) = env::var("WAGERHOUSE_STARTING_BALANCE") {
            config.starting_balance = balance.parse().map_err(|_| {
                WagerError::Configuration(format!(
                    "invalid WAGERHOUSE_STARTING_BALANCE: {}",
                    balance
                ))
            })?;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self, config: &CasinoConfig) -> WagerResult<()> {
        if config.api.port == 0 {
            return Err(WagerError::Configuration(
                "api.port cannot be zero".to_string(),
            ));
        }
        if config.crash.tick_interval_ms == 0 {
            return Err(WagerError::Configuration(
                "crash.tick_interval_ms cannot be zero".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&config.crash.rare_probability) {
            return Err(WagerError::Configuration(
                "crash.rare_probability must be within [0, 1]".to_string(),
            ));
        }
        if config.crash.common_max < 1.0 || config.crash.rare_max < 1.0 {
            return Err(WagerError::Configuration(
                "crash point ranges must reach at least 1.0x".to_string(),
            ));
        }
        if config.mines.cells == 0 || config.mines.mines == 0 {
            return Err(WagerError::Configuration(
                "mines.cells and mines.mines cannot be zero".to_string(),
            ));
        }
        if config.mines.mines >= config.mines.cells {
            return Err(WagerError::Configuration(
                "mines.mines must be strictly less than mines.cells".to_string(),
            ));
        }
        for case in &config.cases {
            if case.price == 0 {
                return Err(WagerError::Configuration(format!(
                    "case '{}' has zero price",
                    case.id
                )));
            }
            if case.prizes.is_empty() {
                return Err(WagerError::Configuration(format!(
                    "case '{}' has no prizes",
                    case.id
                )));
            }
            let total: f64 = case.prizes.iter().map(|p| p.chance).sum();
            if !(total > 0.0) {
                return Err(WagerError::Configuration(format!(
                    "case '{}' has non-positive total weight",
                    case.id
                )));
            }
            if case.prizes.iter().any(|p| p.chance < 0.0) {
                return Err(WagerError::Configuration(format!(
                    "case '{}' has a negative prize weight",
                    case.id
                )));
            }
        }
        for promo in &config.promos {
            if promo.code.is_empty() {
                return Err(WagerError::Configuration("empty promo code".to_string()));
            }
            if promo.max_uses == 0 {
                return Err(WagerError::Configuration(format!(
                    "promo '{}' has zero max_uses",
                    promo.code
                )));
            }
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, config: &CasinoConfig, path: &str) -> WagerResult<()> {
        let toml_string = toml::to_string_pretty(config).map_err(|e| {
            WagerError::Configuration(format!("failed to serialize config: {}", e))
        })?;

        std::fs::write(path, toml_string)
            .map_err(|e| WagerError::Configuration(format!("failed to write {}: {}", path, e)))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a sample configuration file with the stock case tables
pub fn generate_sample_config(path: &str) -> WagerResult<()> {
    let config = CasinoConfig::default();
    ConfigLoader::new().save(&config, path)
}
