//! # Drop Page DTOs
//!
//! Derived page state served to polling clients, plus wallet session payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a mounted drop page as seen by one visitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DropStateResponse {
    pub slug: String,
    pub loading: bool,
    pub claimed_supply: u64,
    /// Total supply as a decimal string (may exceed `u64`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub sold_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub mint_button: MintButtonDto,
    pub notifications: Vec<NotificationDto>,
}

/// Label and enabled state of the mint affordance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MintButtonDto {
    pub label: String,
    pub disabled: bool,
}

/// Visual style of a transient notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Loading,
    Success,
    Error,
}

/// A transient notification currently visible on the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationDto {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    /// `None` for notifications that stay until dismissed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// One-time sign-in challenge for the visitor's wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeResponse {
    pub challenge: String,
    /// Exact text to pass to `personal_sign`.
    pub message: String,
}

/// Wallet connect request: the account and its `personal_sign` signature of
/// the challenge message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectRequest {
    pub address: String,
    pub signature: String,
    pub challenge: String,
}

/// Current wallet session of the visitor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub connected: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
