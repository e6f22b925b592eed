//! HTTP event source for an ESI-style inventory API.
//!
//! Endpoints (relative to `api_url`):
//! - `GET  /corporations/{corporation_id}/assets/?page=N`
//! - `GET  /corporations/{corporation_id}/containers/logs/?page=N`
//! - `POST /universe/names/` with a JSON array of ids
//!
//! List endpoints are paged; the total page count comes back in the
//! `X-Pages` response header. No retries or rate limiting happen here: any
//! failed page fails the whole fetch.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use supplyrecon_core::{LocationId, TypeId};
use supplyrecon_events::MovementLogEntry;
use supplyrecon_inventory::InventoryItem;

use super::{EventSource, SourceError};
use crate::config::SourceConfig;

pub const PAGES_HEADER: &str = "x-pages";

/// Client for the upstream inventory API.
#[derive(Debug, Clone)]
pub struct HttpEventSource {
    client: Client,
    api_url: String,
    corporation_id: i64,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResolvedName {
    id: i64,
    name: String,
    #[serde(default)]
    category: Option<String>,
}

impl HttpEventSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("supplyrecon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Unavailable(format!("http client build failed: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            corporation_id: config.corporation_id,
            token: config.access_token.clone(),
        })
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, SourceError> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Http { status, body });
        }
        Ok(resp)
    }

    /// Fetch every page of a list endpoint.
    async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, SourceError> {
        let url = format!("{}{}", self.api_url, path);
        let mut items = Vec::new();
        let mut page: u32 = 1;

        loop {
            let resp = self
                .send(self.client.get(&url).query(&[("page", page)]))
                .await?;
            let total_pages = page_count(&resp)?;
            let batch: Vec<T> = resp
                .json()
                .await
                .map_err(|e| SourceError::Parse(format!("{path} page {page}: {e}")))?;
            items.extend(batch);

            tracing::debug!(path, page, total_pages, "fetched page");

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

/// Total pages advertised by the response; a missing header means one page.
fn page_count(resp: &Response) -> Result<u32, SourceError> {
    match resp.headers().get(PAGES_HEADER) {
        None => Ok(1),
        Some(raw) => raw
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<u32>().ok())
            .map(|n| n.max(1))
            .ok_or_else(|| SourceError::Parse(format!("invalid {PAGES_HEADER} header: {raw:?}"))),
    }
}

#[async_trait::async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_asset_snapshot(
        &self,
        facility_id: LocationId,
    ) -> Result<Vec<InventoryItem>, SourceError> {
        let path = format!("/corporations/{}/assets/", self.corporation_id);
        let assets: Vec<InventoryItem> = self.get_all_pages(&path).await?;
        Ok(assets
            .into_iter()
            .filter(|a| a.location_id == facility_id)
            .collect())
    }

    async fn fetch_movement_log(
        &self,
        facility_id: LocationId,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<MovementLogEntry>, SourceError> {
        let path = format!("/corporations/{}/containers/logs/", self.corporation_id);
        let logs: Vec<MovementLogEntry> = self.get_all_pages(&path).await?;
        Ok(logs
            .into_iter()
            .filter(|e| e.location_id == facility_id)
            .filter(|e| since.is_none_or(|s| e.logged_at >= s))
            .collect())
    }

    async fn resolve_type_names(
        &self,
        type_ids: &BTreeSet<TypeId>,
    ) -> Result<BTreeMap<TypeId, String>, SourceError> {
        if type_ids.is_empty() {
            return Ok(BTreeMap::new());
        }

        let url = format!("{}/universe/names/", self.api_url);
        let ids: Vec<i64> = type_ids.iter().map(|t| i64::from(t.get())).collect();
        let resp = self.send(self.client.post(&url).json(&ids)).await?;
        let resolved: Vec<ResolvedName> = resp
            .json()
            .await
            .map_err(|e| SourceError::Parse(format!("/universe/names/: {e}")))?;

        Ok(resolved
            .into_iter()
            .filter(|r| r.category.as_deref().is_none_or(|c| c == "inventory_type"))
            .filter_map(|r| {
                let type_id = TypeId::new(i32::try_from(r.id).ok()?);
                type_ids.contains(&type_id).then_some((type_id, r.name))
            })
            .collect())
    }
}
