//! Wallet lifecycle notifications
//!
//! Every successful state change queues an [`Event`] in the wallet's outbox.
//! Delivery is the host's job: drain the outbox and forward events wherever
//! they need to go. Nothing here is retried or acknowledged.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A notification produced by a successful wallet operation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Event {
    /// Value arrived in the pool outside any operation
    Deposit {
        sender: String,
        amount: u64,
        /// Pool balance after the credit
        balance: u64,
    },
    /// A new transaction was proposed
    Submitted {
        owner: String,
        index: u64,
        target: String,
        value: u64,
        payload: Vec<u8>,
    },
    /// An owner confirmed a transaction
    Confirmed { owner: String, index: u64 },
    /// An owner withdrew a previous confirmation
    Revoked { owner: String, index: u64 },
    /// A transaction passed the threshold and was dispatched
    Executed { owner: String, index: u64 },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Deposit {
                sender,
                amount,
                balance,
            } => write!(f, "deposit of {} from {} (balance {})", amount, sender, balance),
            Event::Submitted {
                owner,
                index,
                target,
                value,
                payload,
            } => write!(
                f,
                "tx {} submitted by {}: {} -> {} ({} bytes payload)",
                index,
                owner,
                value,
                target,
                payload.len()
            ),
            Event::Confirmed { owner, index } => {
                write!(f, "tx {} confirmed by {}", index, owner)
            }
            Event::Revoked { owner, index } => {
                write!(f, "tx {} confirmation revoked by {}", index, owner)
            }
            Event::Executed { owner, index } => {
                write!(f, "tx {} executed by {}", index, owner)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let event = Event::Confirmed {
            owner: "alice".to_string(),
            index: 3,
        };
        assert_eq!(event.to_string(), "tx 3 confirmed by alice");

        let event = Event::Deposit {
            sender: "bob".to_string(),
            amount: 25,
            balance: 125,
        };
        assert_eq!(event.to_string(), "deposit of 25 from bob (balance 125)");
    }
}
