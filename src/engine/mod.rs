//! Transaction authorization engine
//!
//! Implements the multisig lifecycle: any owner proposes a transaction,
//! other owners confirm (or revoke) until the confirmation count reaches the
//! wallet's threshold, then any owner triggers a one-time execution.
//!
//! # Example
//!
//! ```rust
//! use multisig_wallet::engine::MultisigWallet;
//! use multisig_wallet::call::LoggingInvoker;
//!
//! let owners = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
//! let mut wallet = MultisigWallet::new(owners, 2).unwrap();
//!
//! wallet.deposit("funder", 100);
//!
//! let index = wallet
//!     .submit_transaction("alice", "treasury", 40, vec![], "release".to_string())
//!     .unwrap();
//! wallet.confirm_transaction("alice", index).unwrap();
//! wallet.confirm_transaction("bob", index).unwrap();
//!
//! let mut invoker = LoggingInvoker;
//! wallet.execute_transaction("carol", index, &mut invoker).unwrap();
//! assert!(wallet.get_transaction(index).unwrap().executed);
//! assert_eq!(wallet.balance(), 60);
//! ```

pub mod confirmations;
pub mod owners;
pub mod store;
pub mod wallet;

pub use confirmations::ConfirmationTracker;
pub use owners::{OwnerSet, MAX_OWNERS};
pub use store::{Transaction, TxStore, DEFAULT_CAPACITY};
pub use wallet::{MultisigWallet, WalletError, MAX_SELECTOR_LEN};
