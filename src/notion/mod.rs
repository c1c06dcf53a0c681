pub mod models;

pub use models::{Block, BlockList, Page, SearchResponse};

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::NotionConfig;
use crate::error::NotionError;
use models::{title_properties, ApiErrorBody};

pub type NotionResult<T> = std::result::Result<T, NotionError>;

/// The subset of the Notion API this tool needs.
#[async_trait]
pub trait NotionApi: Send + Sync {
    /// One page of workspace search results, filtered to pages.
    async fn search_pages(&self, start_cursor: Option<&str>) -> NotionResult<SearchResponse>;

    /// First page of a block's children. The cursor is not followed.
    async fn list_block_children(&self, block_id: &str) -> NotionResult<BlockList>;

    async fn delete_block(&self, block_id: &str) -> NotionResult<()>;

    /// Replace the page's title property with a single text span.
    async fn update_page_title(&self, page_id: &str, title: &str) -> NotionResult<()>;
}

/// Authenticated HTTP client for the Notion REST API.
pub struct NotionClient {
    api_base: String,
    notion_version: String,
    token: String,
    client: reqwest::Client,
}

impl NotionClient {
    pub fn new(config: &NotionConfig, token: impl Into<String>) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            notion_version: config.notion_version.clone(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_base, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.notion_version)
    }

    /// Turn a non-success status into `NotionError::Api`.
    async fn check(response: Response) -> NotionResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or(ApiErrorBody {
            code: String::new(),
            message: text,
        });

        Err(NotionError::Api {
            status: status.as_u16(),
            code: body.code,
            message: body.message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> NotionResult<T> {
        let bytes = Self::check(response).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl NotionApi for NotionClient {
    async fn search_pages(&self, start_cursor: Option<&str>) -> NotionResult<SearchResponse> {
        let mut body = serde_json::json!({
            "query": "",
            "filter": { "property": "object", "value": "page" }
        });
        if let Some(cursor) = start_cursor {
            body["start_cursor"] = serde_json::json!(cursor);
        }

        let response = self.request(Method::POST, "/search").json(&body).send().await?;
        let page: SearchResponse = Self::decode(response).await?;

        log::debug!(
            "Notion: search returned {} result(s), more={}",
            page.results.len(),
            page.has_more
        );
        Ok(page)
    }

    async fn list_block_children(&self, block_id: &str) -> NotionResult<BlockList> {
        let response = self
            .request(Method::GET, &format!("/blocks/{}/children", block_id))
            .send()
            .await?;
        let list: BlockList = Self::decode(response).await?;

        if let Some(cursor) = list.next_cursor.as_deref().filter(|_| list.has_more) {
            log::debug!(
                "Notion: block {} has more children after cursor {}, not followed",
                block_id,
                cursor
            );
        }
        Ok(list)
    }

    async fn delete_block(&self, block_id: &str) -> NotionResult<()> {
        let response = self
            .request(Method::DELETE, &format!("/blocks/{}", block_id))
            .send()
            .await?;
        Self::check(response).await?;

        log::info!("Notion: deleted block {}", block_id);
        Ok(())
    }

    async fn update_page_title(&self, page_id: &str, title: &str) -> NotionResult<()> {
        let body = serde_json::json!({ "properties": title_properties(title) });
        let response = self
            .request(Method::PATCH, &format!("/pages/{}", page_id))
            .json(&body)
            .send()
            .await?;
        Self::check(response).await?;

        log::info!("Notion: updated title of page {}", page_id);
        Ok(())
    }
}
