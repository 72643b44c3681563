//! External call dispatch
//!
//! The wallet never performs value transfers or remote calls itself; it hands
//! a fully encoded call to an [`Invoker`] capability supplied by the host.
//! Calldata is the 4-byte selector derived from the human-readable function
//! name, followed by the raw payload bytes.

use log::info;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Size of the derived function selector prefix
pub const SELECTOR_BYTES: usize = 4;

/// Maximum return data the wallet passes back to the caller
pub const MAX_RETURN_BYTES: usize = 32;

/// Failure reported by the external call mechanism
#[derive(Error, Debug)]
#[error("external call failed: {0}")]
pub struct InvokeError(pub String);

/// Capability for performing an external call with value transfer.
///
/// Implementations decide what "target" and "value" mean for their host.
/// On failure the wallet rolls back the whole execute operation, so an
/// `Invoker` must not leave partial effects behind when it returns `Err`.
pub trait Invoker {
    fn invoke(&mut self, target: &str, value: u64, calldata: &[u8]) -> Result<Vec<u8>, InvokeError>;
}

/// Derive the 4-byte selector for a function name
pub fn selector_id(name: &str) -> [u8; SELECTOR_BYTES] {
    let digest = Sha256::digest(name.as_bytes());
    let mut id = [0u8; SELECTOR_BYTES];
    id.copy_from_slice(&digest[..SELECTOR_BYTES]);
    id
}

/// Build calldata: selector prefix followed by the raw payload
pub fn encode_call(selector: &str, payload: &[u8]) -> Vec<u8> {
    let mut calldata = Vec::with_capacity(SELECTOR_BYTES + payload.len());
    calldata.extend_from_slice(&selector_id(selector));
    calldata.extend_from_slice(payload);
    calldata
}

/// Invoker that logs the call and returns empty data.
///
/// Used by the CLI, where no real call mechanism is wired up.
#[derive(Debug, Default)]
pub struct LoggingInvoker;

impl Invoker for LoggingInvoker {
    fn invoke(&mut self, target: &str, value: u64, calldata: &[u8]) -> Result<Vec<u8>, InvokeError> {
        info!(
            "invoke {} value={} calldata=0x{}",
            target,
            value,
            hex::encode(calldata)
        );
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_is_deterministic() {
        assert_eq!(selector_id("transfer"), selector_id("transfer"));
        assert_ne!(selector_id("transfer"), selector_id("approve"));
    }

    #[test]
    fn test_encode_call_layout() {
        let payload = vec![0xde, 0xad, 0xbe, 0xef];
        let calldata = encode_call("transfer", &payload);

        assert_eq!(calldata.len(), SELECTOR_BYTES + payload.len());
        assert_eq!(&calldata[..SELECTOR_BYTES], &selector_id("transfer"));
        assert_eq!(&calldata[SELECTOR_BYTES..], &payload[..]);
    }

    #[test]
    fn test_encode_call_empty_payload() {
        let calldata = encode_call("withdraw", &[]);
        assert_eq!(calldata.len(), SELECTOR_BYTES);
    }

    #[test]
    fn test_logging_invoker_returns_empty() {
        let mut invoker = LoggingInvoker;
        let data = invoker.invoke("target", 5, &[1, 2, 3]).unwrap();
        assert!(data.is_empty());
    }
}
