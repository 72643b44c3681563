//! The authorization engine
//!
//! [`MultisigWallet`] owns the owner set, the transaction store, the
//! confirmation tracker and the pooled balance, and drives every transaction
//! through its lifecycle: submit -> confirm/revoke -> execute.
//!
//! Every operation runs to completion against `&mut self`; a concurrent host
//! serializes calls behind a single mutex (owner and transaction counts are
//! small, so per-transaction locking buys nothing). During execution the
//! wallet is exclusively borrowed and the [`Invoker`] holds no reference to
//! it, so the external call cannot re-enter any transaction's state.

use crate::call::{encode_call, Invoker, MAX_RETURN_BYTES};
use crate::engine::confirmations::ConfirmationTracker;
use crate::engine::owners::OwnerSet;
use crate::engine::store::{Transaction, TxStore};
use crate::events::Event;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted function selector name, in bytes
pub const MAX_SELECTOR_LEN: usize = 100;

/// Errors surfaced by wallet operations
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Not an owner: {0}")]
    NotOwner(String),
    #[error("Transaction not found: {0}")]
    NotFound(u64),
    #[error("Transaction {0} already executed")]
    AlreadyExecuted(u64),
    #[error("Transaction {index} already confirmed by {owner}")]
    AlreadyConfirmed { index: u64, owner: String },
    #[error("Transaction {index} not confirmed by {owner}")]
    NotConfirmed { index: u64, owner: String },
    #[error("Insufficient confirmations: have {have}, need {need}")]
    InsufficientConfirmations { have: usize, need: usize },
    #[error("Transaction store is full")]
    CapacityExceeded,
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// An M-of-N multisig wallet over a pool of value
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MultisigWallet {
    owners: OwnerSet,
    /// Minimum confirmations required before execution (M)
    threshold: usize,
    store: TxStore,
    confirmations: ConfirmationTracker,
    /// Pooled value; credited by deposits, debited only by execution
    balance: u64,
    /// Outbox of undelivered notifications
    #[serde(skip)]
    events: Vec<Event>,
}

impl MultisigWallet {
    /// Create a wallet controlled by `owners` with the given threshold.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the owner list fails validation (empty,
    /// blank entry, duplicate, over the cap) or the threshold is not within
    /// `1..=owners.len()`.
    pub fn new(owners: Vec<String>, threshold: usize) -> Result<Self, WalletError> {
        let owners = OwnerSet::new(owners)?;

        if threshold == 0 {
            return Err(WalletError::InvalidConfig(
                "threshold must be at least 1".to_string(),
            ));
        }
        if threshold > owners.len() {
            return Err(WalletError::InvalidConfig(format!(
                "threshold {} exceeds owner count {}",
                threshold,
                owners.len()
            )));
        }

        Ok(Self {
            owners,
            threshold,
            store: TxStore::new(),
            confirmations: ConfirmationTracker::new(),
            balance: 0,
            events: Vec::new(),
        })
    }

    /// Credit the pool unconditionally.
    ///
    /// Inbound value must never be refused, so the balance saturates at
    /// `u64::MAX` instead of failing.
    pub fn deposit(&mut self, sender: &str, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.emit(Event::Deposit {
            sender: sender.to_string(),
            amount,
            balance: self.balance,
        });
    }

    /// Propose a new transaction. Returns its index.
    pub fn submit_transaction(
        &mut self,
        caller: &str,
        target: &str,
        value: u64,
        payload: Vec<u8>,
        selector: String,
    ) -> Result<u64, WalletError> {
        self.require_owner(caller)?;

        if target.is_empty() {
            return Err(WalletError::InvalidConfig(
                "transaction target is blank".to_string(),
            ));
        }
        if selector.len() > MAX_SELECTOR_LEN {
            return Err(WalletError::InvalidConfig(format!(
                "selector exceeds {} bytes",
                MAX_SELECTOR_LEN
            )));
        }

        let tx = Transaction::new(
            target.to_string(),
            value,
            payload.clone(),
            selector,
            caller.to_string(),
        );
        let index = self.store.append(tx)?;

        self.emit(Event::Submitted {
            owner: caller.to_string(),
            index,
            target: target.to_string(),
            value,
            payload,
        });
        Ok(index)
    }

    /// Record the caller's confirmation of an open transaction.
    ///
    /// A caller who has already confirmed is rejected with
    /// `AlreadyConfirmed`; the count moves strictly one step per owner.
    pub fn confirm_transaction(&mut self, caller: &str, index: u64) -> Result<(), WalletError> {
        self.require_owner(caller)?;
        self.require_open(index)?;

        if self.confirmations.has_confirmed(index, caller) {
            return Err(WalletError::AlreadyConfirmed {
                index,
                owner: caller.to_string(),
            });
        }

        let delta = self.confirmations.set_confirmed(index, caller, true);
        debug_assert_eq!(delta, 1);
        self.store
            .set_confirmation_count(index, self.confirmations.count_for(index));

        self.emit(Event::Confirmed {
            owner: caller.to_string(),
            index,
        });
        Ok(())
    }

    /// Withdraw the caller's previous confirmation of an open transaction.
    ///
    /// Revoking without a prior confirmation is rejected with
    /// `NotConfirmed`, so the count can never go negative.
    pub fn revoke_confirmation(&mut self, caller: &str, index: u64) -> Result<(), WalletError> {
        self.require_owner(caller)?;
        self.require_open(index)?;

        if !self.confirmations.has_confirmed(index, caller) {
            return Err(WalletError::NotConfirmed {
                index,
                owner: caller.to_string(),
            });
        }

        let delta = self.confirmations.set_confirmed(index, caller, false);
        debug_assert_eq!(delta, -1);
        self.store
            .set_confirmation_count(index, self.confirmations.count_for(index));

        self.emit(Event::Revoked {
            owner: caller.to_string(),
            index,
        });
        Ok(())
    }

    /// Dispatch a transaction that has reached the threshold.
    ///
    /// The executed flag is flipped and the pool debited before the call, so
    /// a second execution attempt fails with `AlreadyExecuted` regardless of
    /// interleaving. If the invoker reports failure the flip and the debit
    /// are rolled back in full and the transaction stays open.
    ///
    /// Returns the call's response data, truncated to [`MAX_RETURN_BYTES`].
    pub fn execute_transaction(
        &mut self,
        caller: &str,
        index: u64,
        invoker: &mut dyn Invoker,
    ) -> Result<Vec<u8>, WalletError> {
        self.require_owner(caller)?;
        self.require_open(index)?;

        let (target, value, calldata) = {
            let tx = self.store.get(index)?;
            if tx.num_confirmations < self.threshold {
                return Err(WalletError::InsufficientConfirmations {
                    have: tx.num_confirmations,
                    need: self.threshold,
                });
            }
            (
                tx.target.clone(),
                tx.value,
                encode_call(&tx.selector, &tx.payload),
            )
        };

        if self.balance < value {
            return Err(WalletError::ExecutionFailed(format!(
                "pool balance {} is short of transaction value {}",
                self.balance, value
            )));
        }

        // Commit the transition first, then call out.
        self.store.set_executed(index, true);
        self.balance -= value;

        match invoker.invoke(&target, value, &calldata) {
            Ok(mut data) => {
                data.truncate(MAX_RETURN_BYTES);
                self.emit(Event::Executed {
                    owner: caller.to_string(),
                    index,
                });
                Ok(data)
            }
            Err(e) => {
                // Roll back to the pre-call state; confirmations were not
                // touched by this operation.
                self.store.set_executed(index, false);
                self.balance += value;
                warn!("tx {} execution rolled back: {}", index, e);
                Err(WalletError::ExecutionFailed(e.to_string()))
            }
        }
    }

    /// Owners in registration order
    pub fn owners(&self) -> &[String] {
        self.owners.as_slice()
    }

    /// Required confirmation threshold (M)
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Current pooled balance
    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Number of transactions ever submitted
    pub fn transaction_count(&self) -> u64 {
        self.store.count()
    }

    /// Look up a transaction by index
    pub fn get_transaction(&self, index: u64) -> Result<&Transaction, WalletError> {
        self.store.get(index)
    }

    /// All transactions in submission order
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.store.iter()
    }

    /// Whether `owner` currently confirms transaction `index`
    pub fn is_confirmed(&self, index: u64, owner: &str) -> Result<bool, WalletError> {
        self.store.get(index)?;
        Ok(self.confirmations.has_confirmed(index, owner))
    }

    /// Take all undelivered notifications, in emission order
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    fn require_owner(&self, caller: &str) -> Result<(), WalletError> {
        if self.owners.contains(caller) {
            Ok(())
        } else {
            Err(WalletError::NotOwner(caller.to_string()))
        }
    }

    /// Transaction must exist and not be executed yet
    fn require_open(&self, index: u64) -> Result<(), WalletError> {
        let tx = self.store.get(index)?;
        if tx.executed {
            return Err(WalletError::AlreadyExecuted(index));
        }
        Ok(())
    }

    fn emit(&mut self, event: Event) {
        info!("{}", event);
        self.events.push(event);
    }
}
