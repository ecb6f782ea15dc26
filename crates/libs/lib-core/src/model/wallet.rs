//! # Wallet Session
//!
//! The connected account is owned by a wallet provider outside the page. The page
//! only ever reads it through [`WalletSession`].
//!
//! ## Proof of ownership
//!
//! An account is only linked after the wallet signs a one-time challenge with
//! `personal_sign` (EIP-191). [`verify_personal_sign`] recovers the signer and
//! compares it with the claimed address.
//!
//! ```text
//! 1. Server issues challenge (UUID) ──► browser
//! 2. Wallet signs sign_in_message(challenge)
//! 3. Browser posts address + signature
//! 4. Server recovers signer == address ──► session linked
//! ```

use crate::error::{AppError, Result};
use alloy_primitives::{hex, Address, Signature};
use std::str::FromStr;
use tracing::warn;

/// Text the wallet signs to sign in with `challenge`.
pub fn sign_in_message(challenge: &str) -> String {
    format!("Sign in to The PAPAFAM NFT Market Place\n\nChallenge: {}", challenge)
}

/// Check that `signature` is a `personal_sign` signature of `message` by `address`.
///
/// # Errors
///
/// - `AppError::InvalidInput` when the address or signature cannot be parsed
/// - `AppError::Unauthorized` when the signature was made by another account
pub fn verify_personal_sign(address: &str, message: &str, signature: &str) -> Result<()> {
    let expected = Address::from_str(address.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid wallet address: {}", e)))?;

    let raw = hex::decode(signature.trim())
        .map_err(|e| AppError::InvalidInput(format!("Invalid signature encoding: {}", e)))?;
    let signature = Signature::from_raw(&raw)
        .map_err(|e| AppError::InvalidInput(format!("Invalid signature: {}", e)))?;

    let signer = signature.recover_address_from_msg(message).map_err(|e| {
        warn!("[SESSION] Signature recovery failed: {}", e);
        AppError::Unauthorized("Signature verification failed".to_string())
    })?;

    if signer != expected {
        warn!("[SESSION] Signature by {} presented for {}", signer, expected);
        return Err(AppError::Unauthorized("Signature verification failed".to_string()));
    }

    Ok(())
}

/// Read-only view of the visitor's wallet connection.
pub trait WalletSession: Send + Sync {
    /// Connected account identifier, if any.
    fn address(&self) -> Option<String>;

    fn is_connected(&self) -> bool {
        self.address().is_some()
    }
}

/// Session state captured at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    address: Option<String>,
}

impl SessionSnapshot {
    pub fn connected(address: impl Into<String>) -> Self {
        Self { address: Some(address.into()) }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }
}

impl From<Option<String>> for SessionSnapshot {
    fn from(address: Option<String>) -> Self {
        Self { address }
    }
}

impl WalletSession for SessionSnapshot {
    fn address(&self) -> Option<String> {
        self.address.clone()
    }
}
