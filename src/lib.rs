//! Reputation Ledger
//!
//! Per-user reputation scores, tiers derived from those scores, and peer
//! voting weighted by the voter's standing. Self-votes are rejected and
//! accepted votes can be recorded in an append-only history.
//!
//! ## Module Structure
//!
//! ```text
//! src/
//! ├── lib.rs         - Crate root with re-exports
//! ├── main.rs        - Script replay entrypoint
//! ├── config.rs      - Configuration management
//! ├── logging.rs     - Tracing subscriber setup
//! ├── script.rs      - JSON vote scripts
//! └── reputation/    - Ledger core
//!     ├── store.rs   - User -> score map
//!     ├── score.rs   - Tiers & vote weights
//!     ├── history.rs - Vote history log
//!     └── engine.rs  - Vote engine & admin surface
//! ```

pub mod config;
pub mod logging;
pub mod reputation;
pub mod script;

// Re-export main types for convenience
pub use config::{HistoryConfig, LedgerConfig, LoggingConfig, ReputationConfig};

pub use reputation::{
    tier_of, weight_of, LedgerAdmin, LedgerSnapshot, ReputationStore, ScoreEntry, Tier,
    TierThresholds, VoteEngine, VoteError, VoteHistory, VotePolicy, VoteRecord, VoteType,
    WeightPolicy, ERR_SELF_ACTION,
};

pub use script::{LedgerCommand, RejectedCommand, ScriptReport, VoteScript};
