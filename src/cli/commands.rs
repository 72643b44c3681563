//! CLI command handlers
//!
//! Each handler loads the wallet state from disk, applies one operation,
//! prints the resulting notifications and persists the new state.

use crate::call::LoggingInvoker;
use crate::engine::MultisigWallet;
use crate::storage::{Storage, StorageConfig};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub wallet: MultisigWallet,
    pub storage: Storage,
}

impl AppState {
    /// Load the wallet stored under `data_dir`
    pub fn load(data_dir: &Path) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.to_path_buf(),
            ..Default::default()
        })?;

        if !storage.exists() {
            return Err(format!(
                "no wallet found in {:?}; run `vault init` first",
                data_dir
            )
            .into());
        }

        let wallet = storage.load()?;
        Ok(Self { wallet, storage })
    }

    /// Print queued notifications and persist the current state
    pub fn finish(&mut self) -> CliResult<()> {
        for event in self.wallet.drain_events() {
            println!("  event: {}", event);
        }
        self.storage.save(&self.wallet)?;
        Ok(())
    }
}

/// Create a new wallet state file
pub fn cmd_init(data_dir: &PathBuf, owners: Vec<String>, threshold: usize) -> CliResult<()> {
    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    })?;

    if storage.exists() {
        println!("wallet already exists in {:?}", data_dir);
        return Ok(());
    }

    let wallet = MultisigWallet::new(owners, threshold)?;
    storage.save(&wallet)?;
    println!(
        "created {}-of-{} wallet in {:?}",
        wallet.threshold(),
        wallet.owners().len(),
        data_dir
    );
    Ok(())
}

/// Credit the pool
pub fn cmd_deposit(data_dir: &Path, sender: String, amount: u64) -> CliResult<()> {
    let mut state = AppState::load(data_dir)?;
    state.wallet.deposit(&sender, amount);
    println!("balance: {}", state.wallet.balance());
    state.finish()
}

/// Propose a transaction
pub fn cmd_submit(
    data_dir: &Path,
    caller: String,
    target: String,
    value: u64,
    payload_hex: Option<String>,
    selector: String,
) -> CliResult<()> {
    let payload = match payload_hex {
        Some(h) => hex::decode(h.trim_start_matches("0x"))?,
        None => Vec::new(),
    };

    let mut state = AppState::load(data_dir)?;
    let index = state
        .wallet
        .submit_transaction(&caller, &target, value, payload, selector)?;
    println!("submitted transaction {}", index);
    state.finish()
}

/// Confirm a pending transaction
pub fn cmd_confirm(data_dir: &Path, caller: String, index: u64) -> CliResult<()> {
    let mut state = AppState::load(data_dir)?;
    state.wallet.confirm_transaction(&caller, index)?;
    let tx = state.wallet.get_transaction(index)?;
    println!(
        "transaction {} has {}/{} confirmations",
        index,
        tx.num_confirmations,
        state.wallet.threshold()
    );
    state.finish()
}

/// Withdraw a confirmation
pub fn cmd_revoke(data_dir: &Path, caller: String, index: u64) -> CliResult<()> {
    let mut state = AppState::load(data_dir)?;
    state.wallet.revoke_confirmation(&caller, index)?;
    let tx = state.wallet.get_transaction(index)?;
    println!(
        "transaction {} has {}/{} confirmations",
        index,
        tx.num_confirmations,
        state.wallet.threshold()
    );
    state.finish()
}

/// Execute a transaction that has reached the threshold.
///
/// No real call mechanism is wired into the CLI; dispatch goes through
/// [`LoggingInvoker`], which records the call in the log.
pub fn cmd_execute(data_dir: &Path, caller: String, index: u64) -> CliResult<()> {
    let mut state = AppState::load(data_dir)?;
    let mut invoker = LoggingInvoker;
    let data = state.wallet.execute_transaction(&caller, index, &mut invoker)?;
    if data.is_empty() {
        println!("executed transaction {}", index);
    } else {
        println!("executed transaction {}: 0x{}", index, hex::encode(data));
    }
    state.finish()
}

/// Show one transaction
pub fn cmd_show(data_dir: &Path, index: u64) -> CliResult<()> {
    let state = AppState::load(data_dir)?;
    let tx = state.wallet.get_transaction(index)?;
    println!("transaction {}", index);
    println!("  target:        {}", tx.target);
    println!("  value:         {}", tx.value);
    println!("  selector:      {}", tx.selector);
    println!("  payload:       0x{}", hex::encode(&tx.payload));
    println!(
        "  confirmations: {}/{}",
        tx.num_confirmations,
        state.wallet.threshold()
    );
    println!("  executed:      {}", tx.executed);
    println!("  submitted by:  {} at {}", tx.submitted_by, tx.submitted_at);
    Ok(())
}

/// List all transactions
pub fn cmd_list(data_dir: &Path) -> CliResult<()> {
    let state = AppState::load(data_dir)?;
    if state.wallet.transaction_count() == 0 {
        println!("no transactions");
        return Ok(());
    }
    for (index, tx) in state.wallet.transactions().enumerate() {
        let status = if tx.executed { "executed" } else { "open" };
        println!(
            "{:>4}  {}  value={} confirmations={}/{} -> {}",
            index,
            status,
            tx.value,
            tx.num_confirmations,
            state.wallet.threshold(),
            tx.target
        );
    }
    Ok(())
}

/// List owners
pub fn cmd_owners(data_dir: &Path) -> CliResult<()> {
    let state = AppState::load(data_dir)?;
    for owner in state.wallet.owners() {
        println!("{}", owner);
    }
    Ok(())
}

/// Show the pool balance
pub fn cmd_balance(data_dir: &Path) -> CliResult<()> {
    let state = AppState::load(data_dir)?;
    println!("{}", state.wallet.balance());
    Ok(())
}
