//! Reputation Ledger Core
//!
//! Tracks per-user scores, derives tiers, and applies peer votes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌─────────────────┐
//! │ ReputationStore │◄────│ VoteEngine       │────►│ VoteHistory     │
//! │ (user -> score) │     │ (orchestrator)   │     │ (append-only)   │
//! └─────────────────┘     └──────────────────┘     └─────────────────┘
//!                                  │
//!                                  ▼
//!                          ┌──────────────────┐
//!                          │ TierThresholds   │
//!                          │ WeightPolicy     │
//!                          │ (pure functions) │
//!                          └──────────────────┘
//! ```
//!
//! ## Score Model
//!
//! - Unknown users start at 0 (Bronze)
//! - Flat votes move the target by exactly 1
//! - Weighted upvotes move the target by the voter's weight (1 or 2)
//! - Nobody may vote on themselves

mod engine;
mod history;
mod score;
mod store;

pub use engine::{
    LedgerAdmin, LedgerSnapshot, ScoreEntry, VoteEngine, VoteError, VotePolicy, ERR_SELF_ACTION,
};
pub use history::{VoteHistory, VoteRecord, VoteType};
pub use score::{tier_of, weight_of, Tier, TierThresholds, WeightPolicy};
pub use store::ReputationStore;
