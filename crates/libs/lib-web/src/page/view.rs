//! # Page View
//!
//! Everything the template shows, derived from the collection, the page state
//! and the session on every render. Nothing here is stored.

use super::DropPage;
use super::{SupplyState, ToastId};
use lib_core::{ImageUrlBuilder, WalletSession};
use serde::Serialize;
use shared::dto::collection::{Collection, ImageRef};
use shared::dto::drop::{DropStateResponse, MintButtonDto, NotificationKind};
use shared::wallet_badge;
use tracing::warn;

pub const BRAND: &str = "The PAPAFAM NFT Market Place";
pub const SUPPLY_LOADING: &str = "Loading supply count...";

// region: --- Mint Button

/// The mint affordance. The first matching variant wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintButton {
    Loading,
    SoldOut,
    SignIn,
    Mint { price: String },
}

impl MintButton {
    pub fn derive(state: &SupplyState, session: &dyn WalletSession) -> Self {
        if state.loading {
            Self::Loading
        } else if state.sold_out() {
            Self::SoldOut
        } else if !session.is_connected() {
            Self::SignIn
        } else {
            Self::Mint {
                price: state.price.clone().unwrap_or_default(),
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Loading => "Loading...".to_string(),
            Self::SoldOut => "SOLD OUT".to_string(),
            Self::SignIn => "Sign in to Mint".to_string(),
            Self::Mint { price } => format!("Mint NFT ({} ETH)", price),
        }
    }

    pub fn disabled(&self) -> bool {
        !matches!(self, Self::Mint { .. })
    }

    pub fn to_dto(&self) -> MintButtonDto {
        MintButtonDto {
            label: self.label(),
            disabled: self.disabled(),
        }
    }
}
// endregion: --- Mint Button

pub fn supply_line(state: &SupplyState) -> String {
    if state.loading {
        return SUPPLY_LOADING.to_string();
    }
    let total = state
        .total_supply
        .map(|t| t.to_string())
        .unwrap_or_default();
    format!("{} / {} NFT's claimed", state.claimed_supply, total)
}

// region: --- Page View

#[derive(Debug, Clone, Serialize)]
pub struct ToastView {
    pub id: ToastId,
    pub kind: NotificationKind,
    pub message: String,
    pub background: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageView {
    pub brand: &'static str,
    pub slug: String,
    pub title: String,
    pub collection_name: String,
    pub description: String,
    pub main_image_url: String,
    pub preview_image_url: String,
    pub creator_name: Option<String>,
    pub connected: bool,
    pub wallet_badge: Option<String>,
    pub loading: bool,
    pub supply_line: String,
    pub mint_label: String,
    pub mint_disabled: bool,
    pub toasts: Vec<ToastView>,
    /// Reload the page while the supply is loading or a toast is visible.
    pub refresh: bool,
}

impl PageView {
    pub fn build(
        collection: &Collection,
        page: &DropPage,
        session: &dyn WalletSession,
        images: &ImageUrlBuilder,
    ) -> Self {
        let state = page.snapshot();
        let button = MintButton::derive(&state, session);
        let toasts: Vec<ToastView> = page
            .toaster()
            .active()
            .into_iter()
            .map(|t| ToastView {
                id: t.id,
                kind: t.kind,
                message: t.message,
                background: t.style.background,
                color: t.style.color,
            })
            .collect();

        let address = session.address();
        let refresh = (page.has_contract() && state.loading) || !toasts.is_empty();

        Self {
            brand: BRAND,
            slug: collection.slug.current.clone(),
            title: collection.title.clone(),
            collection_name: collection.nft_collection_name.clone(),
            description: collection.description.clone(),
            main_image_url: image_url(images, &collection.main_image),
            preview_image_url: image_url(images, &collection.preview_image),
            creator_name: collection.creator.as_ref().map(|c| c.name.clone()),
            connected: address.is_some(),
            wallet_badge: address.as_deref().map(wallet_badge),
            loading: state.loading,
            supply_line: supply_line(&state),
            mint_label: button.label(),
            mint_disabled: button.disabled(),
            toasts,
            refresh,
        }
    }
}

fn image_url(images: &ImageUrlBuilder, image: &ImageRef) -> String {
    images.url_for(image).unwrap_or_else(|e| {
        warn!("[NFT] Unresolvable image {:?}: {}", image.asset.reference, e);
        String::new()
    })
}
// endregion: --- Page View

/// The derived page state as served to polling clients.
pub fn drop_state(page: &DropPage, session: &dyn WalletSession) -> DropStateResponse {
    let state = page.snapshot();
    let button = MintButton::derive(&state, session);

    DropStateResponse {
        slug: page.key().slug.clone(),
        loading: state.loading,
        claimed_supply: state.claimed_supply,
        total_supply: state.total_supply.map(|t| t.to_string()),
        sold_out: state.sold_out(),
        price: state.price,
        address: session.address(),
        mint_button: button.to_dto(),
        notifications: page.toaster().active().iter().map(|t| t.to_dto()).collect(),
    }
}
