//! Wallet persistence layer
//!
//! Saves and loads the wallet state as JSON. The engine itself never touches
//! disk; the CLI (or any other host) decides when to persist.

use crate::engine::MultisigWallet;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub wallet_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".vault_data"),
            wallet_file: "wallet.json".to_string(),
        }
    }
}

/// Wallet state storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager, creating the data directory if needed
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    fn wallet_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.wallet_file)
    }

    /// Save the wallet to disk.
    ///
    /// Writes to a temporary file first and renames into place, so a crash
    /// mid-write never corrupts the previous state.
    pub fn save(&self, wallet: &MultisigWallet) -> Result<(), StorageError> {
        let temp_path = self.config.data_dir.join("wallet.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, wallet)?;

        fs::rename(&temp_path, self.wallet_path())?;
        Ok(())
    }

    /// Load the wallet from disk
    pub fn load(&self) -> Result<MultisigWallet, StorageError> {
        let path = self.wallet_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "wallet file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check if a saved wallet exists
    pub fn exists(&self) -> bool {
        self.wallet_path().exists()
    }

    /// Delete the saved wallet
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.wallet_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Save wallet state to a specific file path
pub fn save_to_file(wallet: &MultisigWallet, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, wallet)?;
    Ok(())
}

/// Load wallet state from a specific file path
pub fn load_from_file(path: &Path) -> Result<MultisigWallet, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_wallet() -> MultisigWallet {
        let owners = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
        let mut wallet = MultisigWallet::new(owners, 2).unwrap();
        wallet.deposit("funder", 100);
        let index = wallet
            .submit_transaction("alice", "treasury", 40, vec![1, 2], "release".to_string())
            .unwrap();
        wallet.confirm_transaction("bob", index).unwrap();
        wallet
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        let wallet = sample_wallet();

        storage.save(&wallet).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.owners(), wallet.owners());
        assert_eq!(loaded.threshold(), wallet.threshold());
        assert_eq!(loaded.balance(), wallet.balance());
        assert_eq!(loaded.transaction_count(), 1);
        assert_eq!(loaded.get_transaction(0).unwrap().num_confirmations, 1);
        assert!(loaded.is_confirmed(0, "bob").unwrap());
        assert!(!loaded.is_confirmed(0, "alice").unwrap());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        assert!(!storage.exists());
        assert!(matches!(storage.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_delete() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };

        let storage = Storage::new(config).unwrap();
        storage.save(&sample_wallet()).unwrap();
        assert!(storage.exists());

        storage.delete().unwrap();
        assert!(!storage.exists());
    }
}
