//! Owner registry
//!
//! The set of identities authorized to operate the wallet. Membership is
//! fixed at construction; there is no later addition or removal.

use crate::engine::wallet::WalletError;
use serde::{Deserialize, Serialize};

/// Maximum number of owners a wallet can have
pub const MAX_OWNERS: usize = 10;

/// Ordered, duplicate-free set of owner identities
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct OwnerSet {
    owners: Vec<String>,
}

impl OwnerSet {
    /// Build the owner set, validating the input list.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the list is empty, larger than
    /// [`MAX_OWNERS`], contains a blank identity, or contains a duplicate.
    pub fn new(owners: Vec<String>) -> Result<Self, WalletError> {
        if owners.is_empty() {
            return Err(WalletError::InvalidConfig(
                "at least one owner is required".to_string(),
            ));
        }

        if owners.len() > MAX_OWNERS {
            return Err(WalletError::InvalidConfig(format!(
                "owner count {} exceeds maximum {}",
                owners.len(),
                MAX_OWNERS
            )));
        }

        for (i, owner) in owners.iter().enumerate() {
            if owner.is_empty() {
                return Err(WalletError::InvalidConfig(format!(
                    "owner at position {} is blank",
                    i
                )));
            }
            if owners[..i].contains(owner) {
                return Err(WalletError::InvalidConfig(format!(
                    "duplicate owner: {}",
                    owner
                )));
            }
        }

        Ok(Self { owners })
    }

    /// Membership test
    pub fn contains(&self, id: &str) -> bool {
        self.owners.iter().any(|o| o == id)
    }

    /// Owners in registration order
    pub fn as_slice(&self) -> &[String] {
        &self.owners
    }

    /// Number of owners (N)
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_owners() -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string(), "carol".to_string()]
    }

    #[test]
    fn test_valid_set() {
        let set = OwnerSet::new(sample_owners()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("alice"));
        assert!(set.contains("carol"));
        assert!(!set.contains("mallory"));
    }

    #[test]
    fn test_registration_order_preserved() {
        let set = OwnerSet::new(sample_owners()).unwrap();
        assert_eq!(set.as_slice(), &["alice", "bob", "carol"]);
    }

    #[test]
    fn test_empty_list_rejected() {
        let result = OwnerSet::new(vec![]);
        assert!(matches!(result, Err(WalletError::InvalidConfig(_))));
    }

    #[test]
    fn test_blank_owner_rejected() {
        let result = OwnerSet::new(vec!["alice".to_string(), String::new()]);
        assert!(matches!(result, Err(WalletError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_owner_rejected() {
        let result = OwnerSet::new(vec![
            "alice".to_string(),
            "bob".to_string(),
            "alice".to_string(),
        ]);
        assert!(matches!(result, Err(WalletError::InvalidConfig(_))));
    }

    #[test]
    fn test_owner_cap_enforced() {
        let owners: Vec<String> = (0..=MAX_OWNERS).map(|i| format!("owner{}", i)).collect();
        let result = OwnerSet::new(owners);
        assert!(matches!(result, Err(WalletError::InvalidConfig(_))));

        let owners: Vec<String> = (0..MAX_OWNERS).map(|i| format!("owner{}", i)).collect();
        assert!(OwnerSet::new(owners).is_ok());
    }
}
