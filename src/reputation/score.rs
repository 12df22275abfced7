//! Tiers and Vote Weights
//!
//! Both are pure functions of a score and are never stored.
//! Thresholds are inclusive lower bounds: a score sitting exactly on a
//! boundary belongs to the higher band.

use serde::{Deserialize, Serialize};

/// Discrete reputation tier, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum score required for each tier above Bronze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub silver: i64,
    pub gold: i64,
    pub platinum: i64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            silver: 50,
            gold: 100,
            platinum: 200,
        }
    }
}

impl TierThresholds {
    /// Classify a score, checking the highest threshold first
    pub fn classify(&self, score: i64) -> Tier {
        if score >= self.platinum {
            Tier::Platinum
        } else if score >= self.gold {
            Tier::Gold
        } else if score >= self.silver {
            Tier::Silver
        } else {
            Tier::Bronze
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.silver < self.gold && self.gold < self.platinum
    }
}

/// Two-band vote weight policy.
///
/// Coarser than the tiers on purpose: Bronze and Silver voters weigh the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightPolicy {
    /// Voters at or above this score cast `heavy_weight`
    pub heavy_threshold: i64,
    pub base_weight: i64,
    pub heavy_weight: i64,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            heavy_threshold: 100,
            base_weight: 1,
            heavy_weight: 2,
        }
    }
}

impl WeightPolicy {
    pub fn weight_for(&self, voter_score: i64) -> i64 {
        if voter_score >= self.heavy_threshold {
            self.heavy_weight
        } else {
            self.base_weight
        }
    }

    pub fn is_valid(&self) -> bool {
        self.base_weight >= 1 && self.heavy_weight >= self.base_weight
    }
}

/// Tier for a score under the default thresholds
pub fn tier_of(score: i64) -> Tier {
    TierThresholds::default().classify(score)
}

/// Vote weight for a voter's score under the default policy
pub fn weight_of(score: i64) -> i64 {
    WeightPolicy::default().weight_for(score)
}
