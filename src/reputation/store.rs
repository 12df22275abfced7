//! Reputation Store
//!
//! Identity -> score map. Unknown identities read as 0 and no entry is
//! created until the first mutation.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ReputationStore {
    scores: BTreeMap<String, i64>,
}

impl ReputationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> i64 {
        self.scores.get(user_id).copied().unwrap_or(0)
    }

    /// Overwrite a score. Administrative use only.
    pub fn set(&mut self, user_id: &str, score: i64) {
        self.scores.insert(user_id.to_string(), score);
    }

    /// Add `delta` to the current score and return the new value
    pub fn adjust(&mut self, user_id: &str, delta: i64) -> i64 {
        let score = self.scores.entry(user_id.to_string()).or_insert(0);
        *score = score.saturating_add(delta);
        *score
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.scores.contains_key(user_id)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Materialized entries, sorted by identity
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.scores.iter().map(|(user, score)| (user.as_str(), *score))
    }
}
