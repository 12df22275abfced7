use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::info;

use crate::reputation::{TierThresholds, WeightPolicy};

/// Configuration for the reputation ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Tier and vote weight configuration
    pub reputation: ReputationConfig,
    /// Vote history configuration
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Emit span open/close events
    pub log_spans: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_spans: false,
        }
    }
}

/// Tier thresholds and vote weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReputationConfig {
    /// Minimum score for Silver
    pub silver_threshold: i64,
    /// Minimum score for Gold
    pub gold_threshold: i64,
    /// Minimum score for Platinum
    pub platinum_threshold: i64,
    /// Voter score at which weighted votes use `heavy_weight`
    pub heavy_vote_threshold: i64,
    pub base_weight: i64,
    pub heavy_weight: i64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        let tiers = TierThresholds::default();
        let weights = WeightPolicy::default();
        Self {
            silver_threshold: tiers.silver,
            gold_threshold: tiers.gold,
            platinum_threshold: tiers.platinum,
            heavy_vote_threshold: weights.heavy_threshold,
            base_weight: weights.base_weight,
            heavy_weight: weights.heavy_weight,
        }
    }
}

impl ReputationConfig {
    /// Convert to TierThresholds for use by VoteEngine
    pub fn to_thresholds(&self) -> TierThresholds {
        TierThresholds {
            silver: self.silver_threshold,
            gold: self.gold_threshold,
            platinum: self.platinum_threshold,
        }
    }

    /// Convert to WeightPolicy for use by VoteEngine
    pub fn to_weight_policy(&self) -> WeightPolicy {
        WeightPolicy {
            heavy_threshold: self.heavy_vote_threshold,
            base_weight: self.base_weight,
            heavy_weight: self.heavy_weight,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Record votes made through the `*_with_history` operations
    pub enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables and validate it
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Logging configuration
        if let Some(level) = lookup("REPLEDGER_LOG_LEVEL") {
            config.logging.level = level;
        }
        parse_into(&lookup, "REPLEDGER_LOG_SPANS", &mut config.logging.log_spans)?;

        // Tier thresholds
        let reputation = &mut config.reputation;
        parse_into(&lookup, "REPLEDGER_TIER_SILVER", &mut reputation.silver_threshold)?;
        parse_into(&lookup, "REPLEDGER_TIER_GOLD", &mut reputation.gold_threshold)?;
        parse_into(&lookup, "REPLEDGER_TIER_PLATINUM", &mut reputation.platinum_threshold)?;

        // Vote weights
        parse_into(
            &lookup,
            "REPLEDGER_WEIGHT_HEAVY_THRESHOLD",
            &mut reputation.heavy_vote_threshold,
        )?;
        parse_into(&lookup, "REPLEDGER_WEIGHT_BASE", &mut reputation.base_weight)?;
        parse_into(&lookup, "REPLEDGER_WEIGHT_HEAVY", &mut reputation.heavy_weight)?;

        // History
        parse_into(&lookup, "REPLEDGER_HISTORY_ENABLED", &mut config.history.enabled)?;

        config.validate()?;

        Ok(config)
    }

    /// Log the effective settings. Call once a subscriber is installed.
    pub fn log_summary(&self) {
        info!(
            silver = self.reputation.silver_threshold,
            gold = self.reputation.gold_threshold,
            platinum = self.reputation.platinum_threshold,
            heavy_vote_threshold = self.reputation.heavy_vote_threshold,
            history = self.history.enabled,
            "Ledger configuration loaded"
        );
    }

    /// Validate configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.reputation.to_thresholds().is_ascending() {
            return Err(anyhow::anyhow!(
                "Tier thresholds must be strictly ascending (silver={}, gold={}, platinum={})",
                self.reputation.silver_threshold,
                self.reputation.gold_threshold,
                self.reputation.platinum_threshold
            ));
        }

        if !self.reputation.to_weight_policy().is_valid() {
            return Err(anyhow::anyhow!(
                "Vote weights must be at least 1 with heavy >= base (base={}, heavy={})",
                self.reputation.base_weight,
                self.reputation.heavy_weight
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow::anyhow!("Unknown log level: {}", other)),
        }
    }
}

fn parse_into<F, T>(lookup: &F, key: &str, slot: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Some(raw) = lookup(key) {
        *slot = raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value", key))?;
    }
    Ok(())
}
