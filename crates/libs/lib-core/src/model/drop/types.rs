//! Drop provider payload types.

use crate::error::AppError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Token amount that may exceed `u64` on chain.
///
/// Accepts both JSON numbers and decimal strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct TokenCount(u128);

impl TokenCount {
    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u128 {
        self.0
    }

    /// Numeric value when it fits in `u64`.
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(self.0).ok()
    }
}

impl From<u64> for TokenCount {
    fn from(value: u64) -> Self {
        Self(value as u128)
    }
}

impl From<TokenCount> for String {
    fn from(count: TokenCount) -> Self {
        count.to_string()
    }
}

impl fmt::Display for TokenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenCount {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u128>()
            .map(Self)
            .map_err(|_| AppError::Decoding(format!("Invalid token count: {}", s)))
    }
}

impl<'de> Deserialize<'de> for TokenCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self::from(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Amount of a currency, raw and human-readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrencyValue {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,
    /// Raw amount in the smallest unit.
    #[serde(default)]
    pub value: String,
    /// Amount formatted in whole units, e.g. `"0.01"`.
    #[serde(rename = "displayValue")]
    pub display_value: String,
}

/// One claim phase of a drop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimCondition {
    #[serde(rename = "startTime", default)]
    pub start_time: Option<String>,
    #[serde(rename = "maxClaimableSupply", default)]
    pub max_claimable_supply: Option<String>,
    #[serde(rename = "currencyAddress", default)]
    pub currency_address: Option<String>,
    #[serde(rename = "currencyMetadata")]
    pub currency_metadata: CurrencyValue,
}

/// Token metadata as stored by the drop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NftMetadata {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

/// A claimed token and its owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimedNft {
    pub metadata: NftMetadata,
    #[serde(default)]
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    #[serde(rename = "blockNumber", default)]
    pub block_number: Option<u64>,
}

/// Result of claiming one token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimReceipt {
    /// Claimed token id.
    pub id: String,
    pub receipt: TransactionReceipt,
    #[serde(default)]
    pub metadata: Option<NftMetadata>,
}
