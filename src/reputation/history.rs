//! Vote History
//!
//! Append-only log of accepted votes. Insertion order is the order in which
//! votes were applied; records are never mutated or removed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    /// Direction applied to the vote magnitude
    pub fn sign(&self) -> i64 {
        match self {
            VoteType::Upvote => 1,
            VoteType::Downvote => -1,
        }
    }
}

/// A single accepted vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub voter: String,
    pub target: String,
    #[serde(rename = "voteType")]
    pub vote_type: VoteType,

    /// Caller-supplied clock value (block height, sequence number, ...)
    pub timestamp: u64,
}

impl VoteRecord {
    pub fn new(voter: &str, target: &str, vote_type: VoteType, timestamp: u64) -> Self {
        Self {
            voter: voter.to_string(),
            target: target.to_string(),
            vote_type,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VoteHistory {
    records: Vec<VoteRecord>,
}

impl VoteHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: VoteRecord) {
        self.records.push(record);
    }

    pub fn all(&self) -> &[VoteRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoteRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_preserves_order() {
        let mut history = VoteHistory::new();
        history.append(VoteRecord::new("a", "b", VoteType::Upvote, 7));
        history.append(VoteRecord::new("c", "b", VoteType::Downvote, 3));

        let all = history.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].voter, "a");
        assert_eq!(all[1].timestamp, 3);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = VoteHistory::new();
        let record = VoteRecord::new("a", "b", VoteType::Upvote, 1);
        history.append(record.clone());
        history.append(record);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_record_json_shape() {
        let record = VoteRecord::new("ST1234", "ST5678", VoteType::Upvote, 100);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "voter": "ST1234",
                "target": "ST5678",
                "voteType": "upvote",
                "timestamp": 100,
            })
        );
    }
}
