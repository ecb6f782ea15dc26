//! Test doubles for the content backend, the drop provider and a browser wallet.

use crate::services::SessionStore;
use alloy_primitives::{eip191_hash_message, hex, Address};
use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use lib_core::model::drop::{
    ClaimCondition, ClaimReceipt, ClaimedNft, CurrencyValue, NftMetadata, TransactionReceipt,
};
use lib_core::{AppError, ContentStore, DropProvider, NftDrop, Result, TokenCount};
use parking_lot::Mutex;
use shared::dto::collection::{AssetRef, Collection, Creator, ImageRef, Slug};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use uuid::Uuid;

pub const WALLET: &str = "0x52908400098527886E0F7030069857D2E4169EE7";
pub const CONTRACT: &str = "0x1111111111111111111111111111111111111111";

pub fn sample_collection(slug: &str) -> Collection {
    Collection {
        id: format!("collection-{}", slug),
        title: format!("The {} drop", slug),
        address: CONTRACT.to_string(),
        description: "Hand-drawn apes".to_string(),
        nft_collection_name: format!("PAPAFAM {}", slug),
        main_image: ImageRef {
            asset: AssetRef {
                reference: "image-main01-800x600-png".to_string(),
                kind: Some("reference".to_string()),
            },
        },
        preview_image: ImageRef {
            asset: AssetRef {
                reference: "image-prev01-400x400-jpg".to_string(),
                kind: Some("reference".to_string()),
            },
        },
        slug: Slug { current: slug.to_string() },
        creator: Some(Creator {
            id: "creator-1".to_string(),
            name: "Papa".to_string(),
            address: "0x2222222222222222222222222222222222222222".to_string(),
            slug: Some(Slug { current: "papa".to_string() }),
        }),
    }
}

/// Poll `cond` until it holds, yielding to spawned tasks in between.
pub async fn wait_until(cond: impl Fn() -> bool) {
    for _ in 0..400 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

/// A wallet that answers `personal_sign` like a browser extension would.
pub struct TestWallet {
    key: SigningKey,
}

impl TestWallet {
    pub fn new(seed: u8) -> Self {
        Self {
            key: SigningKey::from_slice(&[seed; 32]).unwrap(),
        }
    }

    pub fn address(&self) -> String {
        Address::from_private_key(&self.key).to_checksum(None)
    }

    pub fn sign(&self, message: &str) -> String {
        let hash = eip191_hash_message(message);
        let (sig, recovery_id) = self.key.sign_prehash_recoverable(hash.as_slice()).unwrap();
        let mut raw = sig.to_bytes().to_vec();
        raw.push(27 + recovery_id.to_byte());
        hex::encode_prefixed(raw)
    }

    /// Run the whole challenge/sign/connect exchange against `store`.
    pub fn connect(&self, store: &SessionStore, visitor: Uuid) -> String {
        let issued = store.issue_challenge(visitor);
        store
            .connect(visitor, &self.address(), &issued.challenge, &self.sign(&issued.message))
            .unwrap();
        self.address()
    }
}

pub struct MockDrop {
    claimed: u64,
    total: TokenCount,
    price: Option<String>,
    hang_reads: bool,
    fail_supply: bool,
    fail_claim: bool,
    empty_claim: bool,
    gate: Option<Arc<Notify>>,
    pub read_calls: AtomicUsize,
    claims: Mutex<Vec<(String, u32)>>,
}

impl MockDrop {
    pub fn new(claimed: u64, total: u64) -> Arc<Self> {
        Arc::new(Self {
            claimed,
            total: TokenCount::from(total),
            price: None,
            hang_reads: false,
            fail_supply: false,
            fail_claim: false,
            empty_claim: false,
            gate: None,
            read_calls: AtomicUsize::new(0),
            claims: Mutex::new(Vec::new()),
        })
    }

    fn edit(self: Arc<Self>, f: impl FnOnce(&mut Self)) -> Arc<Self> {
        let mut inner = Arc::try_unwrap(self).unwrap_or_else(|_| panic!("configure MockDrop before sharing it"));
        f(&mut inner);
        Arc::new(inner)
    }

    pub fn with_price(self: Arc<Self>, price: &str) -> Arc<Self> {
        let price = price.to_string();
        self.edit(|d| d.price = Some(price))
    }

    /// Reads never resolve.
    pub fn hanging(self: Arc<Self>) -> Arc<Self> {
        self.edit(|d| d.hang_reads = true)
    }

    pub fn failing_supply(self: Arc<Self>) -> Arc<Self> {
        self.edit(|d| d.fail_supply = true)
    }

    pub fn failing_claim(self: Arc<Self>) -> Arc<Self> {
        self.edit(|d| d.fail_claim = true)
    }

    /// Claims succeed without returning any receipt.
    pub fn empty_claim(self: Arc<Self>) -> Arc<Self> {
        self.edit(|d| d.empty_claim = true)
    }

    /// Claims wait for one `notify_one` on `gate`.
    pub fn gated(self: Arc<Self>, gate: Arc<Notify>) -> Arc<Self> {
        self.edit(|d| d.gate = Some(gate))
    }

    pub fn claim_calls(&self) -> Vec<(String, u32)> {
        self.claims.lock().clone()
    }

    async fn read(&self) {
        self.read_calls.fetch_add(1, Ordering::SeqCst);
        if self.hang_reads {
            std::future::pending::<()>().await;
        }
    }
}

#[async_trait]
impl NftDrop for MockDrop {
    fn contract_address(&self) -> &str {
        CONTRACT
    }

    async fn claim_conditions(&self) -> Result<Vec<ClaimCondition>> {
        self.read().await;
        Ok(self
            .price
            .iter()
            .map(|price| ClaimCondition {
                start_time: None,
                max_claimable_supply: None,
                currency_address: None,
                currency_metadata: CurrencyValue {
                    name: "Goerli Ether".to_string(),
                    symbol: "ETH".to_string(),
                    decimals: 18,
                    value: "10000000000000000".to_string(),
                    display_value: price.clone(),
                },
            })
            .collect())
    }

    async fn all_claimed(&self) -> Result<Vec<ClaimedNft>> {
        self.read().await;
        if self.fail_supply {
            return Err(AppError::Drop("claimed list unavailable".to_string()));
        }
        Ok((0..self.claimed)
            .map(|i| ClaimedNft {
                metadata: NftMetadata {
                    id: i.to_string(),
                    name: Some(format!("Ape #{}", i)),
                    description: None,
                    image: None,
                    uri: None,
                },
                owner: WALLET.to_string(),
            })
            .collect())
    }

    async fn total_supply(&self) -> Result<TokenCount> {
        self.read().await;
        Ok(self.total)
    }

    async fn claim_to(&self, receiver: &str, quantity: u32) -> Result<Vec<ClaimReceipt>> {
        self.claims.lock().push((receiver.to_string(), quantity));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.fail_claim {
            return Err(AppError::Drop("user rejected transaction".to_string()));
        }

        if self.empty_claim {
            return Ok(vec![]);
        }

        Ok(vec![ClaimReceipt {
            id: self.claimed.to_string(),
            receipt: TransactionReceipt {
                transaction_hash: "0xfeed".to_string(),
                block_number: Some(812),
            },
            metadata: None,
        }])
    }
}

pub struct MockProvider {
    drop: Option<Arc<MockDrop>>,
}

impl MockProvider {
    pub fn with(drop: Arc<MockDrop>) -> Self {
        Self { drop: Some(drop) }
    }

    pub fn empty() -> Self {
        Self { drop: None }
    }
}

impl DropProvider for MockProvider {
    fn drop_at(&self, _contract_address: &str) -> Option<Arc<dyn NftDrop>> {
        self.drop.clone().map(|d| d as Arc<dyn NftDrop>)
    }
}

#[derive(Default)]
pub struct MockContent {
    collections: Mutex<HashMap<String, Collection>>,
    fail: bool,
    pub calls: AtomicUsize,
}

impl MockContent {
    pub fn with(collections: impl IntoIterator<Item = Collection>) -> Self {
        Self {
            collections: Mutex::new(
                collections
                    .into_iter()
                    .map(|c| (c.slug.current.clone(), c))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    /// Publish (or replace) a collection under its slug.
    pub fn put(&self, collection: Collection) {
        self.collections
            .lock()
            .insert(collection.slug.current.clone(), collection);
    }
}

#[async_trait]
impl ContentStore for MockContent {
    async fn collection_by_slug(&self, slug: &str) -> Result<Option<Collection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Content("dataset unavailable".to_string()));
        }
        Ok(self.collections.lock().get(slug).cloned())
    }
}
