//! Vote Engine - Main Orchestrator
//!
//! Owns the reputation store and vote history, validates votes and applies
//! them. Every mutation takes `&mut self`; callers sharing an engine across
//! threads wrap it in their own lock so the read-weight-then-write sequence
//! stays atomic.

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info, warn};

use crate::config::LedgerConfig;
use crate::reputation::{
    ReputationStore, Tier, TierThresholds, VoteHistory, VoteRecord, VoteType, WeightPolicy,
};

/// Error code for a self-targeted vote
pub const ERR_SELF_ACTION: i32 = -2;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error("user `{user_id}` may not vote on themselves")]
    SelfAction { user_id: String },
}

impl VoteError {
    pub fn code(&self) -> i32 {
        match self {
            VoteError::SelfAction { .. } => ERR_SELF_ACTION,
        }
    }
}

/// How an upvote is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePolicy {
    /// Always +1, whoever the voter is
    Flat,
    /// Sized by the voter's current score
    Weighted,
}

impl VotePolicy {
    fn magnitude(&self, voter_score: i64, weights: &WeightPolicy) -> i64 {
        match self {
            VotePolicy::Flat => 1,
            VotePolicy::Weighted => weights.weight_for(voter_score),
        }
    }
}

/// One materialized score with its derived tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub user_id: String,
    pub score: i64,
    pub tier: Tier,
}

/// Point-in-time view of the whole ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub scores: Vec<ScoreEntry>,
    pub history: Vec<VoteRecord>,
}

pub struct VoteEngine {
    store: ReputationStore,
    history: VoteHistory,
    thresholds: TierThresholds,
    weights: WeightPolicy,
    history_enabled: bool,
}

impl VoteEngine {
    pub fn new() -> Self {
        Self::with_store(ReputationStore::new())
    }

    pub fn with_store(store: ReputationStore) -> Self {
        Self {
            store,
            history: VoteHistory::new(),
            thresholds: TierThresholds::default(),
            weights: WeightPolicy::default(),
            history_enabled: true,
        }
    }

    /// Build an engine over `store` using configured thresholds and weights
    pub fn from_config(store: ReputationStore, config: &LedgerConfig) -> Self {
        Self::with_store(store)
            .with_thresholds(config.reputation.to_thresholds())
            .with_weight_policy(config.reputation.to_weight_policy())
            .with_history_enabled(config.history.enabled)
    }

    pub fn with_thresholds(mut self, thresholds: TierThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_weight_policy(mut self, weights: WeightPolicy) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_history_enabled(mut self, enabled: bool) -> Self {
        self.history_enabled = enabled;
        self
    }

    /// Flat +1 upvote
    pub fn upvote(&mut self, target: &str, sender: &str) -> Result<(), VoteError> {
        self.cast(VotePolicy::Flat, VoteType::Upvote, target, sender)
    }

    /// Flat -1 downvote
    pub fn downvote(&mut self, target: &str, sender: &str) -> Result<(), VoteError> {
        self.cast(VotePolicy::Flat, VoteType::Downvote, target, sender)
    }

    /// Upvote sized by the sender's current score
    pub fn weighted_upvote(&mut self, target: &str, sender: &str) -> Result<(), VoteError> {
        self.cast(VotePolicy::Weighted, VoteType::Upvote, target, sender)
    }

    /// Apply a vote in the given direction under an explicitly selected policy
    pub fn cast(
        &mut self,
        policy: VotePolicy,
        vote_type: VoteType,
        target: &str,
        sender: &str,
    ) -> Result<(), VoteError> {
        let _span = debug_span!(
            "cast",
            policy = ?policy,
            vote_type = ?vote_type,
            target_user = %target,
            sender = %sender
        )
        .entered();

        Self::ensure_distinct(target, sender)?;

        let delta = vote_type.sign() * policy.magnitude(self.store.get(sender), &self.weights);
        let score = self.store.adjust(target, delta);

        debug!(delta = delta, score = score, "Applied vote");
        Ok(())
    }

    /// Record the vote, then apply it as a weighted upvote
    pub fn upvote_with_history(
        &mut self,
        target: &str,
        sender: &str,
        timestamp: u64,
    ) -> Result<(), VoteError> {
        Self::ensure_distinct(target, sender)?;
        self.record(VoteRecord::new(sender, target, VoteType::Upvote, timestamp));
        self.weighted_upvote(target, sender)
    }

    /// Record the vote, then apply it as a flat downvote
    pub fn downvote_with_history(
        &mut self,
        target: &str,
        sender: &str,
        timestamp: u64,
    ) -> Result<(), VoteError> {
        Self::ensure_distinct(target, sender)?;
        self.record(VoteRecord::new(sender, target, VoteType::Downvote, timestamp));
        self.downvote(target, sender)
    }

    pub fn get_reputation(&self, user_id: &str) -> i64 {
        self.store.get(user_id)
    }

    pub fn get_user_tier(&self, user_id: &str) -> Tier {
        self.thresholds.classify(self.store.get(user_id))
    }

    /// Weight the user's next weighted vote would carry
    pub fn vote_weight(&self, user_id: &str) -> i64 {
        self.weights.weight_for(self.store.get(user_id))
    }

    pub fn get_vote_history(&self) -> &[VoteRecord] {
        self.history.all()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let scores = self
            .store
            .iter()
            .map(|(user_id, score)| ScoreEntry {
                user_id: user_id.to_string(),
                score,
                tier: self.thresholds.classify(score),
            })
            .collect();

        LedgerSnapshot {
            scores,
            history: self.history.all().to_vec(),
        }
    }

    /// Administrative handle, kept apart from the voting API
    pub fn admin(&mut self) -> LedgerAdmin<'_> {
        LedgerAdmin { engine: self }
    }

    fn ensure_distinct(target: &str, sender: &str) -> Result<(), VoteError> {
        if target == sender {
            warn!(user_id = %sender, "Rejected self-targeted vote");
            return Err(VoteError::SelfAction {
                user_id: sender.to_string(),
            });
        }
        Ok(())
    }

    fn record(&mut self, record: VoteRecord) {
        if !self.history_enabled {
            debug!(voter = %record.voter, "Vote history disabled, skipping record");
            return;
        }
        self.history.append(record);
    }
}

impl Default for VoteEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Trusted-caller operations that bypass voting rules
pub struct LedgerAdmin<'a> {
    engine: &'a mut VoteEngine,
}

impl LedgerAdmin<'_> {
    /// Overwrite a score. Not recorded in the vote history.
    pub fn set_reputation(&mut self, user_id: &str, score: i64) {
        let previous = self.engine.store.get(user_id);
        self.engine.store.set(user_id, score);

        info!(
            user_id = %user_id,
            previous = previous,
            score = score,
            "Reputation overridden by administrator"
        );
    }
}
