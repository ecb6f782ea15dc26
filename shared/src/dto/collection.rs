//! # Collection DTOs
//!
//! Records returned by the content backend for a single NFT collection.
//!
//! Field names follow the content backend's document shape (`_id`, camelCase),
//! so these types deserialize the query result directly.

use serde::{Deserialize, Serialize};

/// A collection document as projected by the collection query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Contract address of the deployed drop.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "nftCollectionName", default)]
    pub nft_collection_name: String,
    #[serde(rename = "mainImage")]
    pub main_image: ImageRef,
    #[serde(rename = "previewImage")]
    pub preview_image: ImageRef,
    pub slug: Slug,
    #[serde(default)]
    pub creator: Option<Creator>,
}

/// Dereferenced creator of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Creator {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub slug: Option<Slug>,
}

/// Image field holding a reference to an uploaded asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub asset: AssetRef,
}

/// Reference to an uploaded asset, e.g. `image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Human-readable route identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slug {
    pub current: String,
}
