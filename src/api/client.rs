// src/api/client.rs
//! HTTP access to the Notion API, plus the cached block source built on it.

use super::cache::{CachedValue, ResponseCache};
use super::parser;
use super::BlockSource;
use crate::constants::{NOTION_API_BASE, NOTION_API_PAGE_SIZE, NOTION_API_VERSION};
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Board, BoardKind};
use crate::types::{ApiKey, NotionId};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// Thin wrapper over reqwest speaking the Notion REST protocol.
pub struct NotionHttpClient {
    http: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
}

impl NotionHttpClient {
    pub fn new(api_key: ApiKey) -> Self {
        Self::with_base_url(api_key, NOTION_API_BASE)
    }

    /// Points the client at a non-default base URL (local proxy, test server).
    pub fn with_base_url(api_key: ApiKey, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: base_url.into(),
        }
    }

    fn request(&self, method: reqwest::Method, endpoint: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, endpoint))
            .bearer_auth(self.api_key.as_str())
            .header("Notion-Version", NOTION_API_VERSION)
    }

    async fn get(&self, endpoint: &str) -> Result<Value, AppError> {
        log::debug!("GET {}", endpoint);
        let response = self.request(reqwest::Method::GET, endpoint).send().await?;
        Self::read_response(response).await
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, AppError> {
        log::debug!("POST {}", endpoint);
        let response = self
            .request(reqwest::Method::POST, endpoint)
            .json(body)
            .send()
            .await?;
        Self::read_response(response).await
    }

    async fn patch(&self, endpoint: &str, body: &Value) -> Result<Value, AppError> {
        log::debug!("PATCH {}", endpoint);
        let response = self
            .request(reqwest::Method::PATCH, endpoint)
            .json(body)
            .send()
            .await?;
        Self::read_response(response).await
    }

    /// Reads a response body, converting API error bodies into the typed
    /// error vocabulary.
    async fn read_response(response: reqwest::Response) -> Result<Value, AppError> {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&text).map_err(|e| {
                AppError::MalformedResponse(format!("unparseable response from {url}: {e}"))
            });
        }

        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        let code = body
            .get("code")
            .and_then(Value::as_str)
            .map(NotionErrorCode::from_api_response)
            .unwrap_or_else(|| NotionErrorCode::from_http_status(status.as_u16()));
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no error message")
            .to_string();

        log::debug!("API error from {}: {} ({})", url, message, code);
        Err(AppError::NotionService {
            code,
            message,
            status,
        })
    }

    /// Normalizes an opaque container id to the hyphenated path form the
    /// API expects; non-UUID ids pass through untouched.
    fn path_id(id: &str) -> String {
        NotionId::parse(id)
            .map(|parsed| parsed.to_hyphenated())
            .unwrap_or_else(|_| id.to_string())
    }

    /// Fetches the full ordered child list of a container, following
    /// pagination cursors.
    pub async fn list_children(&self, container: &str) -> Result<Vec<Block>, AppError> {
        let base = format!("blocks/{}/children", Self::path_id(container));
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let endpoint = match &cursor {
                Some(c) => format!("{base}?page_size={NOTION_API_PAGE_SIZE}&start_cursor={c}"),
                None => format!("{base}?page_size={NOTION_API_PAGE_SIZE}"),
            };
            let body = self.get(&endpoint).await?;
            let page = parser::parse_children_page(&body)?;
            blocks.extend(page.results);
            cursor = page.next_cursor;
            if !page.has_more || cursor.is_none() {
                break;
            }
        }

        log::debug!("fetched {} children of {}", blocks.len(), container);
        Ok(blocks)
    }

    /// Queries all rows of a database, sorted descending by the first
    /// numeric property.
    pub async fn query_rows(&self, database: &str) -> Result<Vec<Board>, AppError> {
        let endpoint = format!("databases/{}/query", Self::path_id(database));
        let mut boards = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = json!({ "page_size": NOTION_API_PAGE_SIZE });
            if let Some(ref c) = cursor {
                body["start_cursor"] = json!(c);
            }
            let response = self.post(&endpoint, &body).await?;
            let page = parser::parse_query_page(&response, database)?;
            boards.extend(page.results);
            cursor = page.next_cursor;
            if !page.has_more || cursor.is_none() {
                break;
            }
        }

        parser::sort_boards_by_first_numeric_desc(&mut boards);
        Ok(boards)
    }

    /// Retrieves a page's icon in displayable form.
    pub async fn page_icon(&self, page: &str) -> Result<Option<String>, AppError> {
        let body = self.get(&format!("pages/{}", Self::path_id(page))).await?;
        Ok(body.get("icon").and_then(parser::icon_display))
    }

    /// Appends a toggle block under `parent` and returns the created block.
    pub async fn append_toggle(&self, parent: &str, title: &str) -> Result<Block, AppError> {
        let body = json!({
            "children": [{
                "object": "block",
                "type": "toggle",
                "toggle": { "rich_text": [{ "text": { "content": title } }] }
            }]
        });
        let endpoint = format!("blocks/{}/children", Self::path_id(parent));
        let response = self.patch(&endpoint, &body).await?;
        let created = response
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
            .ok_or_else(|| {
                AppError::MalformedResponse("append returned no created block".to_string())
            })?;
        Ok(parser::block_from_json(created))
    }
}

/// The production [`BlockSource`]: HTTP client plus short-TTL response cache.
pub struct CachedBlockSource {
    client: NotionHttpClient,
    cache: Mutex<ResponseCache>,
}

impl CachedBlockSource {
    pub fn new(client: NotionHttpClient, ttl: Duration) -> Self {
        Self {
            client,
            cache: Mutex::new(ResponseCache::new(ttl)),
        }
    }
}

#[async_trait::async_trait]
impl BlockSource for CachedBlockSource {
    async fn fetch_children(
        &self,
        container: &str,
        force_refresh: bool,
    ) -> Result<Vec<Block>, AppError> {
        let key = container.to_string();
        if force_refresh {
            self.cache.lock().remove(&key);
        } else if let Some(CachedValue::Blocks(blocks)) =
            self.cache.lock().get(&key, Instant::now())
        {
            log::debug!("cache hit: {}", key);
            return Ok(blocks);
        }

        let blocks = self.client.list_children(container).await?;
        self.cache
            .lock()
            .put(key, CachedValue::Blocks(blocks.clone()), Instant::now());
        Ok(blocks)
    }

    async fn query_database(
        &self,
        database: &str,
        force_refresh: bool,
    ) -> Result<Vec<Board>, AppError> {
        let key = format!("db_{database}");
        if force_refresh {
            self.cache.lock().remove(&key);
        } else if let Some(CachedValue::Boards(boards)) =
            self.cache.lock().get(&key, Instant::now())
        {
            log::debug!("cache hit: {}", key);
            return Ok(boards);
        }

        let boards = self.client.query_rows(database).await?;
        self.cache
            .lock()
            .put(key, CachedValue::Boards(boards.clone()), Instant::now());
        Ok(boards)
    }

    fn invalidate(&self, container: &str) {
        log::debug!("invalidating cache entries for {}", container);
        // Covers the exact key, the db_ variant, and any derived key.
        self.cache.lock().invalidate(|key| key.contains(container));
    }

    async fn fetch_page_icon(&self, page: &str) -> Option<String> {
        match self.client.page_icon(page).await {
            Ok(icon) => icon,
            Err(e) => {
                log::warn!("icon fetch for {} failed: {}", page, e);
                None
            }
        }
    }

    async fn create_board(&self, parent: &str, title: &str) -> Result<Board, AppError> {
        let created = self.client.append_toggle(parent, title).await?;
        self.invalidate(parent);

        let mut board = Board::new(created.id(), title, BoardKind::Toggle).with_parent(parent);
        // The fresh toggle has no children yet; nothing left to load.
        board.is_loaded = true;
        Ok(board)
    }
}
