//! Vote Scripts
//!
//! A script is a JSON array of ledger commands replayed in order against a
//! `VoteEngine`. Rejected votes are reported and never abort the run.
//!
//! ```json
//! [
//!   { "op": "set_reputation", "user": "alice", "score": 120 },
//!   { "op": "upvote_with_history", "target": "bob", "sender": "alice", "timestamp": 100 }
//! ]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::reputation::{VoteEngine, VoteError};

/// A single ledger operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    Upvote {
        target: String,
        sender: String,
    },
    Downvote {
        target: String,
        sender: String,
    },
    WeightedUpvote {
        target: String,
        sender: String,
    },
    UpvoteWithHistory {
        target: String,
        sender: String,
        timestamp: u64,
    },
    DownvoteWithHistory {
        target: String,
        sender: String,
        timestamp: u64,
    },
    SetReputation {
        user: String,
        score: i64,
    },
}

impl LedgerCommand {
    pub fn apply(&self, engine: &mut VoteEngine) -> Result<(), VoteError> {
        match self {
            LedgerCommand::Upvote { target, sender } => engine.upvote(target, sender),
            LedgerCommand::Downvote { target, sender } => engine.downvote(target, sender),
            LedgerCommand::WeightedUpvote { target, sender } => {
                engine.weighted_upvote(target, sender)
            }
            LedgerCommand::UpvoteWithHistory {
                target,
                sender,
                timestamp,
            } => engine.upvote_with_history(target, sender, *timestamp),
            LedgerCommand::DownvoteWithHistory {
                target,
                sender,
                timestamp,
            } => engine.downvote_with_history(target, sender, *timestamp),
            LedgerCommand::SetReputation { user, score } => {
                engine.admin().set_reputation(user, *score);
                Ok(())
            }
        }
    }
}

/// A command that the engine refused
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedCommand {
    /// Position in the script
    pub index: usize,
    pub code: i32,
    pub reason: String,
}

/// Outcome of replaying a script
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptReport {
    pub applied: usize,
    pub rejected: Vec<RejectedCommand>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteScript {
    commands: Vec<LedgerCommand>,
}

impl VoteScript {
    pub fn new(commands: Vec<LedgerCommand>) -> Self {
        Self { commands }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse vote script")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vote script {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid vote script {}", path.display()))
    }

    pub fn commands(&self) -> &[LedgerCommand] {
        &self.commands
    }

    /// Apply every command in order
    #[instrument(name = "vote_script", skip_all, fields(commands = self.commands.len()))]
    pub fn run(&self, engine: &mut VoteEngine) -> ScriptReport {
        let mut report = ScriptReport::default();

        for (index, command) in self.commands.iter().enumerate() {
            match command.apply(engine) {
                Ok(()) => report.applied += 1,
                Err(e) => {
                    debug!(index = index, error = %e, "Script command rejected");
                    report.rejected.push(RejectedCommand {
                        index,
                        code: e.code(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            applied = report.applied,
            rejected = report.rejected.len(),
            "Vote script replayed"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reputation::{VoteType, ERR_SELF_ACTION};

    #[test]
    fn test_parse_commands() {
        let script = VoteScript::from_json(
            r#"[
                {"op": "upvote", "target": "b", "sender": "a"},
                {"op": "upvote_with_history", "target": "b", "sender": "a", "timestamp": 7},
                {"op": "downvote_with_history", "target": "b", "sender": "a", "timestamp": 8},
                {"op": "set_reputation", "user": "a", "score": -3}
            ]"#,
        )
        .unwrap();

        assert_eq!(script.commands().len(), 4);
        assert_eq!(
            script.commands()[2],
            LedgerCommand::DownvoteWithHistory {
                target: "b".to_string(),
                sender: "a".to_string(),
                timestamp: 8,
            }
        );
    }

    #[test]
    fn test_history_command_requires_timestamp() {
        let err = VoteScript::from_json(
            r#"[{"op": "upvote_with_history", "target": "b", "sender": "a"}]"#,
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("timestamp"));

        assert!(VoteScript::from_json(
            r#"[{"op": "downvote_with_history", "target": "b", "sender": "a"}]"#
        )
        .is_err());
    }

    #[test]
    fn test_unknown_op_rejected() {
        assert!(VoteScript::from_json(r#"[{"op": "revoke", "target": "b"}]"#).is_err());
    }

    #[test]
    fn test_run_reports_self_votes_and_continues() {
        let script = VoteScript::new(vec![
            LedgerCommand::Upvote {
                target: "a".to_string(),
                sender: "a".to_string(),
            },
            LedgerCommand::UpvoteWithHistory {
                target: "b".to_string(),
                sender: "a".to_string(),
                timestamp: 1,
            },
        ]);

        let mut engine = VoteEngine::new();
        let report = script.run(&mut engine);

        assert_eq!(report.applied, 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 0);
        assert_eq!(report.rejected[0].code, ERR_SELF_ACTION);
        assert_eq!(engine.get_reputation("b"), 1);
        assert_eq!(engine.get_vote_history()[0].vote_type, VoteType::Upvote);
    }
}
