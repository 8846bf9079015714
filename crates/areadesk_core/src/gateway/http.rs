//! HTTP+JSON gateway over the `/api/v1` REST endpoints.
//!
//! # Responsibility
//! - Issue blocking list/create requests through a shared `ureq` agent.
//! - Follow `nextPageToken` until the listing is complete.
//!
//! # Invariants
//! - Success is a 2xx status with a parseable JSON body; everything else fails.
//! - Pagination stops on an absent/empty token, a repeated token, or after
//!   `max_pages` pages.
//! - No client-side timeout is configured.

use crate::config::ServerConfig;
use crate::gateway::{ensure_active, GatewayError, GatewayResult, HierarchyGateway};
use crate::model::area::{Area, ListAreasResponse};
use crate::model::draft::{CreateAreaRequest, CreateFolderRequest, NewArea, NewFolder};
use crate::model::folder::{Folder, ListFoldersResponse};
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

const AREAS_PATH: &str = "/api/v1/areas";
const FOLDERS_PATH: &str = "/api/v1/folders";
const JSON_CONTENT_TYPE: &str = "application/json";
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Default cap on pages followed by one list call.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Blocking HTTP gateway.
pub struct HttpGateway {
    agent: ureq::Agent,
    base_url: String,
    page_size: Option<u32>,
    max_pages: u32,
}

impl HttpGateway {
    /// Creates a gateway rooted at `base_url` (scheme + host + optional prefix).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_size: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Creates a gateway from the `[server]` configuration section.
    pub fn from_config(config: &ServerConfig) -> Self {
        let mut gateway = Self::new(config.base_url.as_str());
        gateway.page_size = config.page_size;
        gateway.max_pages = config.max_pages.max(1);
        gateway
    }

    /// Requests pages of `page_size` entities.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Caps the number of pages followed by one list call.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn collect_pages<T>(
        &self,
        path: &str,
        entity: &'static str,
        cancel: &CancellationToken,
        decode: fn(&str) -> GatewayResult<(Vec<T>, Option<String>)>,
    ) -> GatewayResult<Vec<T>> {
        let url = self.endpoint(path);
        let mut items = Vec::new();
        let mut seen_tokens = HashSet::new();
        let mut page_token: Option<String> = None;

        for page in 1..=self.max_pages {
            ensure_active(cancel)?;
            let body = self.get(&url, page_token.as_deref())?;
            ensure_active(cancel)?;

            let (mut batch, next_token) = decode(&body)?;
            items.append(&mut batch);

            let Some(next_token) = next_token.filter(|token| !token.is_empty()) else {
                debug!(
                    "event=list_done module=gateway status=ok entity={entity} pages={page} count={}",
                    items.len()
                );
                return Ok(items);
            };
            if !seen_tokens.insert(next_token.clone()) {
                warn!(
                    "event=list_token_repeated module=gateway status=partial entity={entity} pages={page}"
                );
                return Ok(items);
            }
            page_token = Some(next_token);
        }

        warn!(
            "event=list_page_cap module=gateway status=partial entity={entity} max_pages={} count={}",
            self.max_pages,
            items.len()
        );
        Ok(items)
    }

    fn get(&self, url: &str, page_token: Option<&str>) -> GatewayResult<String> {
        let mut request = self.agent.get(url).set("Accept", JSON_CONTENT_TYPE);
        if let Some(page_size) = self.page_size {
            request = request.query("pageSize", &page_size.to_string());
        }
        if let Some(page_token) = page_token {
            request = request.query("pageToken", page_token);
        }
        read_body(request.call())
    }

    fn post_json(&self, url: &str, body: &impl Serialize) -> GatewayResult<()> {
        let payload =
            serde_json::to_string(body).map_err(|err| GatewayError::Encode(err.to_string()))?;
        let response = self
            .agent
            .post(url)
            .set("Accept", JSON_CONTENT_TYPE)
            .set("Content-Type", JSON_CONTENT_TYPE)
            .send_string(&payload);
        let body = read_body(response)?;
        decode_created(&body)
    }
}

impl HierarchyGateway for HttpGateway {
    fn list_areas(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Area>> {
        self.collect_pages(AREAS_PATH, "areas", cancel, decode_areas_page)
    }

    fn list_folders(&self, cancel: &CancellationToken) -> GatewayResult<Vec<Folder>> {
        self.collect_pages(FOLDERS_PATH, "folders", cancel, decode_folders_page)
    }

    fn create_area(&self, area: &NewArea, cancel: &CancellationToken) -> GatewayResult<()> {
        ensure_active(cancel)?;
        self.post_json(&self.endpoint(AREAS_PATH), &CreateAreaRequest { area })?;
        info!("event=area_created module=gateway status=ok");
        Ok(())
    }

    fn create_folder(
        &self,
        folder: &NewFolder,
        cancel: &CancellationToken,
    ) -> GatewayResult<()> {
        ensure_active(cancel)?;
        self.post_json(&self.endpoint(FOLDERS_PATH), &CreateFolderRequest { folder })?;
        info!(
            "event=folder_created module=gateway status=ok area={}",
            folder.area()
        );
        Ok(())
    }
}

fn read_body(result: Result<ureq::Response, ureq::Error>) -> GatewayResult<String> {
    match result {
        Ok(response) => {
            let status = response.status();
            let body = response
                .into_string()
                .map_err(|err| GatewayError::Transport(err.to_string()))?;
            if !(200..300).contains(&status) {
                return Err(GatewayError::Status {
                    status,
                    body: truncate_body(&body),
                });
            }
            Ok(body)
        }
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(GatewayError::Status {
                status,
                body: truncate_body(&body),
            })
        }
        Err(ureq::Error::Transport(transport)) => {
            Err(GatewayError::Transport(transport.to_string()))
        }
    }
}

fn decode_areas_page(body: &str) -> GatewayResult<(Vec<Area>, Option<String>)> {
    let page: ListAreasResponse = serde_json::from_str(body)?;
    Ok((page.areas, page.next_page_token))
}

fn decode_folders_page(body: &str) -> GatewayResult<(Vec<Folder>, Option<String>)> {
    let page: ListFoldersResponse = serde_json::from_str(body)?;
    Ok((page.folders, page.next_page_token))
}

fn decode_created(body: &str) -> GatewayResult<()> {
    serde_json::from_str::<serde_json::Value>(body)?;
    Ok(())
}

fn truncate_body(body: &str) -> String {
    let normalized = body.trim().replace(['\n', '\r'], " ");
    let mut truncated = normalized
        .chars()
        .take(MAX_ERROR_BODY_CHARS)
        .collect::<String>();
    if normalized.chars().count() > MAX_ERROR_BODY_CHARS {
        truncated.push_str("...");
    }
    truncated
}
