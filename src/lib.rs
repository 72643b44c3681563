//! Multisig Wallet: a threshold transaction authorization engine
//!
//! A fixed set of owners jointly controls a pool of value and the right to
//! invoke external actions. Any owner proposes a transaction; owners vote by
//! confirming (and may revoke before execution); once confirmations reach
//! the wallet's threshold, any owner triggers a one-time execution that
//! dispatches the call through a host-supplied [`call::Invoker`] capability.
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
//! // Anyone may fund the pool
//! wallet.deposit("funder", 100);
//!
//! // alice proposes, alice and bob confirm, carol executes
//! let index = wallet
//!     .submit_transaction("alice", "treasury", 40, vec![], "release".to_string())
//!     .unwrap();
//! wallet.confirm_transaction("alice", index).unwrap();
//! wallet.confirm_transaction("bob", index).unwrap();
//!
//! let mut invoker = LoggingInvoker;
//! wallet.execute_transaction("carol", index, &mut invoker).unwrap();
//!
//! assert!(wallet.get_transaction(index).unwrap().executed);
//! assert_eq!(wallet.balance(), 60);
//! ```

pub mod call;
pub mod cli;
pub mod engine;
pub mod events;
pub mod storage;

// Re-export commonly used types
pub use call::{Invoker, LoggingInvoker};
pub use engine::{MultisigWallet, OwnerSet, Transaction, WalletError};
pub use events::Event;
pub use storage::{Storage, StorageConfig};
