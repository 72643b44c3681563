//! Append-only transaction store
//!
//! Transactions are identified by their position in an append-only list.
//! Indices are dense, stable, and never reused; entries are mutated only
//! through the engine-internal setters and never deleted.

use crate::engine::wallet::WalletError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default bound on stored transactions
pub const DEFAULT_CAPACITY: usize = 1024;

/// One proposed external action tracked through its lifecycle
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    /// Destination identity for the external call
    pub target: String,
    /// Amount of pooled value to transfer with the call
    pub value: u64,
    /// Opaque data blob passed to the target
    pub payload: Vec<u8>,
    /// Human-readable function name, hashed into the call selector
    pub selector: String,
    /// Set once on successful execution, never cleared afterwards
    pub executed: bool,
    /// Denormalized count of owners currently confirming
    pub num_confirmations: usize,
    /// Owner who proposed the transaction
    pub submitted_by: String,
    /// When the proposal was recorded
    pub submitted_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        target: String,
        value: u64,
        payload: Vec<u8>,
        selector: String,
        submitted_by: String,
    ) -> Self {
        Self {
            target,
            value,
            payload,
            selector,
            executed: false,
            num_confirmations: 0,
            submitted_by,
            submitted_at: Utc::now(),
        }
    }
}

/// Indexed, append-only transaction list with a capacity bound
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TxStore {
    transactions: Vec<Transaction>,
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for TxStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TxStore {
    /// Create an empty store with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty store bounded at `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transactions: Vec::new(),
            capacity,
        }
    }

    /// Append a transaction, assigning the next sequential index.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` when the store is full.
    pub fn append(&mut self, tx: Transaction) -> Result<u64, WalletError> {
        if self.transactions.len() >= self.capacity {
            return Err(WalletError::CapacityExceeded);
        }
        let index = self.transactions.len() as u64;
        self.transactions.push(tx);
        Ok(index)
    }

    /// Look up a transaction by index.
    ///
    /// # Errors
    /// Returns `NotFound` for an index past the end of the list.
    pub fn get(&self, index: u64) -> Result<&Transaction, WalletError> {
        self.transactions
            .get(index as usize)
            .ok_or(WalletError::NotFound(index))
    }

    /// Number of transactions ever appended
    pub fn count(&self) -> u64 {
        self.transactions.len() as u64
    }

    /// All transactions in index order
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Flip the executed flag. Engine-internal: the engine flips it to true
    /// before dispatch and back to false when rolling back a failed dispatch.
    pub(crate) fn set_executed(&mut self, index: u64, executed: bool) {
        if let Some(tx) = self.transactions.get_mut(index as usize) {
            tx.executed = executed;
        }
    }

    /// Overwrite the denormalized confirmation count. Engine-internal;
    /// applied in the same logical operation as the tracker flag write.
    pub(crate) fn set_confirmation_count(&mut self, index: u64, n: usize) {
        if let Some(tx) = self.transactions.get_mut(index as usize) {
            tx.num_confirmations = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tx() -> Transaction {
        Transaction::new(
            "target".to_string(),
            10,
            vec![1, 2, 3],
            "transfer".to_string(),
            "alice".to_string(),
        )
    }

    #[test]
    fn test_append_assigns_dense_indices() {
        let mut store = TxStore::new();
        assert_eq!(store.append(sample_tx()).unwrap(), 0);
        assert_eq!(store.append(sample_tx()).unwrap(), 1);
        assert_eq!(store.append(sample_tx()).unwrap(), 2);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_new_transaction_starts_open() {
        let tx = sample_tx();
        assert!(!tx.executed);
        assert_eq!(tx.num_confirmations, 0);
    }

    #[test]
    fn test_get_out_of_range() {
        let mut store = TxStore::new();
        store.append(sample_tx()).unwrap();

        assert!(store.get(0).is_ok());
        assert!(matches!(store.get(99), Err(WalletError::NotFound(99))));
    }

    #[test]
    fn test_capacity_bound() {
        let mut store = TxStore::with_capacity(2);
        store.append(sample_tx()).unwrap();
        store.append(sample_tx()).unwrap();

        let result = store.append(sample_tx());
        assert!(matches!(result, Err(WalletError::CapacityExceeded)));
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_internal_setters() {
        let mut store = TxStore::new();
        let index = store.append(sample_tx()).unwrap();

        store.set_confirmation_count(index, 2);
        store.set_executed(index, true);

        let tx = store.get(index).unwrap();
        assert_eq!(tx.num_confirmations, 2);
        assert!(tx.executed);

        store.set_executed(index, false);
        assert!(!store.get(index).unwrap().executed);
    }
}
