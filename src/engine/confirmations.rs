//! Per-transaction confirmation flags
//!
//! Tracks which owners have confirmed which transaction. The tracker owns
//! the authoritative flags; the store's `num_confirmations` is a
//! denormalized count that the engine keeps in lockstep by applying the
//! delta returned from [`ConfirmationTracker::set_confirmed`].

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Mapping (transaction index, owner) -> confirmed flag, default false
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ConfirmationTracker {
    confirmed: HashMap<u64, HashSet<String>>,
}

impl ConfirmationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `owner` currently confirms transaction `index`
    pub fn has_confirmed(&self, index: u64, owner: &str) -> bool {
        self.confirmed
            .get(&index)
            .map(|set| set.contains(owner))
            .unwrap_or(false)
    }

    /// Set the flag and return the delta (+1, -1 or 0) to apply to the
    /// transaction's confirmation count. The caller must apply the delta in
    /// the same logical operation so count and flags never diverge.
    pub fn set_confirmed(&mut self, index: u64, owner: &str, value: bool) -> i64 {
        let set = self.confirmed.entry(index).or_default();
        if value {
            if set.insert(owner.to_string()) {
                1
            } else {
                0
            }
        } else if set.remove(owner) {
            -1
        } else {
            0
        }
    }

    /// Number of owners currently confirming transaction `index`
    pub fn count_for(&self, index: u64) -> usize {
        self.confirmed.get(&index).map(HashSet::len).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unconfirmed() {
        let tracker = ConfirmationTracker::new();
        assert!(!tracker.has_confirmed(0, "alice"));
        assert_eq!(tracker.count_for(0), 0);
    }

    #[test]
    fn test_confirm_and_revoke_deltas() {
        let mut tracker = ConfirmationTracker::new();

        assert_eq!(tracker.set_confirmed(0, "alice", true), 1);
        assert!(tracker.has_confirmed(0, "alice"));
        assert_eq!(tracker.count_for(0), 1);

        // Setting an already-set flag is a no-op
        assert_eq!(tracker.set_confirmed(0, "alice", true), 0);
        assert_eq!(tracker.count_for(0), 1);

        assert_eq!(tracker.set_confirmed(0, "alice", false), -1);
        assert!(!tracker.has_confirmed(0, "alice"));
        assert_eq!(tracker.count_for(0), 0);

        // Clearing an already-clear flag is a no-op
        assert_eq!(tracker.set_confirmed(0, "alice", false), 0);
    }

    #[test]
    fn test_rows_are_independent() {
        let mut tracker = ConfirmationTracker::new();

        tracker.set_confirmed(0, "alice", true);
        tracker.set_confirmed(1, "alice", true);
        tracker.set_confirmed(1, "bob", true);

        assert_eq!(tracker.count_for(0), 1);
        assert_eq!(tracker.count_for(1), 2);
        assert!(!tracker.has_confirmed(0, "bob"));
    }
}
