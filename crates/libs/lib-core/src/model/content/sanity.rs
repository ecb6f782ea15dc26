//! # Sanity Query Client
//!
//! HTTP client for the Sanity query API (`/v<date>/data/query/<dataset>`).
//!
//! Query parameters are sent as `$name=<json>` pairs and the response is wrapped
//! in `{ "ms": .., "query": .., "result": .. }`.

use super::ContentStore;
use crate::config::Config;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use shared::dto::collection::Collection;
use std::time::Duration;
use tracing::{debug, instrument};

/// Collection projection used by the drop page, keyed by `$id` (the slug).
pub const COLLECTION_BY_SLUG: &str = r#"*[_type=='collection' && slug.current == $id][0]{
  _id,
  title,
  address,
  description,
  nftCollectionName,
  mainImage {
    asset
  },
  previewImage {
    asset
  },
  slug {
    current
  },
  creator -> {
    _id,
    name,
    address,
    slug {
      current
    }
  }
}"#;

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Client for one project/dataset.
pub struct SanityClient {
    http: Client,
    query_url: String,
    token: Option<String>,
}

impl SanityClient {
    /// Create a client.
    ///
    /// `use_cdn` selects `apicdn.sanity.io` (cached, public data) over `api.sanity.io`.
    pub fn new(
        project_id: &str,
        dataset: &str,
        api_version: &str,
        use_cdn: bool,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            query_url: query_url(project_id, dataset, api_version, use_cdn),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.sanity_project_id,
            &config.sanity_dataset,
            &config.sanity_api_version,
            config.sanity_use_cdn,
            config.sanity_token.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    /// Run a GROQ query with named parameters and decode its `result`.
    pub async fn fetch<T: DeserializeOwned>(&self, query: &str, params: &[(&str, Value)]) -> Result<T> {
        let mut pairs: Vec<(String, String)> = Vec::with_capacity(params.len() + 1);
        pairs.push(("query".to_string(), query.to_string()));
        for (name, value) in params {
            pairs.push((format!("${}", name), serde_json::to_string(value)?));
        }

        let mut request = self.http.get(&self.query_url).query(&pairs);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Content(format!("Query request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Content(format!("Query returned {}: {}", status, body)));
        }

        let body: QueryResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Decoding(format!("Query result parse failed: {}", e)))?;

        Ok(body.result)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    #[instrument(skip(self))]
    async fn collection_by_slug(&self, slug: &str) -> Result<Option<Collection>> {
        let collection: Option<Collection> = self
            .fetch(COLLECTION_BY_SLUG, &[("id", Value::String(slug.to_string()))])
            .await?;

        debug!("[CONTENT] slug={} found={}", slug, collection.is_some());
        Ok(collection)
    }
}

fn query_url(project_id: &str, dataset: &str, api_version: &str, use_cdn: bool) -> String {
    let host = if use_cdn { "apicdn.sanity.io" } else { "api.sanity.io" };
    let version = api_version.trim_start_matches('v');
    format!("https://{}.{}/v{}/data/query/{}", project_id, host, version, dataset)
}
