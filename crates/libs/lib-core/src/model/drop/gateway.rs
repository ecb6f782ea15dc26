//! # Drop Gateway Client
//!
//! [`NftDrop`] over a REST gateway that holds the signing wallet and talks to the
//! chain on our behalf. Routes are relative to
//! `{base}/contract/{chain}/{contract_address}/erc721`:
//!
//! | Method | Path | Body | Result |
//! |---|---|---|---|
//! | GET | `claim-conditions/get-all` | | `[ClaimCondition]` |
//! | GET | `get-all-claimed` | | `[ClaimedNft]` |
//! | GET | `total-count` | | decimal string |
//! | POST | `claim-to` | `{ receiver, quantity }` | `[ClaimReceipt]` |
//!
//! Every response is wrapped as `{ "result": ... }`.

use super::types::{ClaimCondition, ClaimReceipt, ClaimedNft, TokenCount};
use super::{DropProvider, NftDrop};
use crate::config::Config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use lib_utils::validate_evm_address;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

#[derive(Debug, Serialize)]
struct ClaimToBody<'a> {
    receiver: &'a str,
    quantity: u32,
}

/// Hands out [`GatewayDrop`] handles sharing one HTTP client.
pub struct GatewayDropProvider {
    http: Client,
    base_url: String,
    chain: String,
    access_token: Option<String>,
}

impl GatewayDropProvider {
    pub fn new(
        base_url: &str,
        chain: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            chain: chain.to_string(),
            access_token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.drop_gateway_url,
            &config.drop_chain,
            config.drop_access_token.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }
}

impl DropProvider for GatewayDropProvider {
    fn drop_at(&self, contract_address: &str) -> Option<Arc<dyn NftDrop>> {
        if let Err(e) = validate_evm_address(contract_address) {
            warn!("[DROP] No handle for contract {:?}: {}", contract_address, e);
            return None;
        }

        Some(Arc::new(GatewayDrop {
            http: self.http.clone(),
            contract_url: format!(
                "{}/contract/{}/{}/erc721",
                self.base_url, self.chain, contract_address
            ),
            contract_address: contract_address.to_string(),
            access_token: self.access_token.clone(),
        }))
    }
}

/// One drop contract behind the gateway.
pub struct GatewayDrop {
    http: Client,
    contract_url: String,
    contract_address: String,
    access_token: Option<String>,
}

impl GatewayDrop {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.contract_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.authorize(self.http.get(self.endpoint(path)));
        read_envelope(path, request).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let request = self.authorize(self.http.post(self.endpoint(path)).json(body));
        read_envelope(path, request).await
    }
}

async fn read_envelope<T: DeserializeOwned>(path: &str, request: RequestBuilder) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| AppError::Drop(format!("{} request failed: {}", path, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Drop(format!("{} returned {}: {}", path, status, body)));
    }

    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| AppError::Decoding(format!("{} parse failed: {}", path, e)))?;

    Ok(envelope.result)
}

#[async_trait]
impl NftDrop for GatewayDrop {
    fn contract_address(&self) -> &str {
        &self.contract_address
    }

    #[instrument(skip(self), fields(contract = %self.contract_address))]
    async fn claim_conditions(&self) -> Result<Vec<ClaimCondition>> {
        self.get("claim-conditions/get-all").await
    }

    #[instrument(skip(self), fields(contract = %self.contract_address))]
    async fn all_claimed(&self) -> Result<Vec<ClaimedNft>> {
        self.get("get-all-claimed").await
    }

    #[instrument(skip(self), fields(contract = %self.contract_address))]
    async fn total_supply(&self) -> Result<TokenCount> {
        self.get("total-count").await
    }

    #[instrument(skip(self), fields(contract = %self.contract_address))]
    async fn claim_to(&self, receiver: &str, quantity: u32) -> Result<Vec<ClaimReceipt>> {
        debug!("[DROP] claim-to receiver={} quantity={}", receiver, quantity);
        self.post("claim-to", &ClaimToBody { receiver, quantity }).await
    }
}
