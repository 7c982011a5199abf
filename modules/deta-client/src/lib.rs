pub mod error;
pub mod models;

pub use error::{DetaError, Result};

use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;

use crate::models::{PutRequest, PutResponse, QueryRequest, QueryResponse};

/// Page size requested from `/query`; the store caps responses on its side too.
const QUERY_PAGE_LIMIT: usize = 1000;

/// Client for the Deta Base HTTP API.
///
/// A project key has the form `<project id>_<secret>`; the project id is part
/// of every request path and the whole key goes in `X-API-Key`.
pub struct DetaClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    project_key: String,
}

impl DetaClient {
    pub fn new(base_url: &str, project_key: &str, timeout: Duration) -> Result<Self> {
        let project_id = project_id_from_key(project_key)?.to_string();
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            project_key: project_key.to_string(),
        })
    }

    fn endpoint(&self, base: &str, path: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.project_id, base, path)
    }

    /// Insert (or overwrite, if the `key` exists) one item in `base`.
    pub async fn put(&self, base: &str, item: Value) -> Result<Value> {
        let items = [item];
        let resp = self
            .client
            .put(self.endpoint(base, "items"))
            .header("X-API-Key", &self.project_key)
            .json(&PutRequest { items: &items })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(DetaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: PutResponse = resp.json().await?;
        if !body.failed.items.is_empty() {
            return Err(DetaError::Rejected(body.failed.items.len()));
        }
        let [item] = items;
        Ok(body.processed.items.into_iter().next().unwrap_or(item))
    }

    /// Fetch every item in `base` matching any of the equality filters
    /// (an empty slice fetches everything), following the paging cursor.
    pub async fn fetch(&self, base: &str, query: &[Map<String, Value>]) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut last: Option<String> = None;

        loop {
            let request = QueryRequest {
                query,
                limit: QUERY_PAGE_LIMIT,
                last: last.as_deref(),
            };
            let resp = self
                .client
                .post(self.endpoint(base, "query"))
                .header("X-API-Key", &self.project_key)
                .json(&request)
                .send()
                .await?;

            let status = resp.status();
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                return Err(DetaError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let page: QueryResponse = resp.json().await?;
            debug!(base, size = page.paging.size, "Fetched page");
            items.extend(page.items);

            match page.paging.last {
                Some(cursor) if !cursor.is_empty() => last = Some(cursor),
                _ => break,
            }
        }

        Ok(items)
    }
}

fn project_id_from_key(key: &str) -> Result<&str> {
    match key.split_once('_') {
        Some((id, secret)) if !id.is_empty() && !secret.is_empty() => Ok(id),
        _ => Err(DetaError::InvalidKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_id_is_key_prefix() {
        assert_eq!(project_id_from_key("a0abc123_s3cr3t_more").unwrap(), "a0abc123");
    }

    #[test]
    fn key_without_separator_is_rejected() {
        assert!(matches!(project_id_from_key("nounderscore"), Err(DetaError::InvalidKey)));
        assert!(matches!(project_id_from_key("_secret"), Err(DetaError::InvalidKey)));
    }

    #[test]
    fn endpoint_joins_project_and_base() {
        let client =
            DetaClient::new("https://database.deta.sh/v1/", "proj_key", Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.endpoint("api-reports", "query"),
            "https://database.deta.sh/v1/proj/api-reports/query"
        );
    }

    #[test]
    fn query_request_omits_empty_filter_and_cursor() {
        let body = serde_json::to_value(QueryRequest {
            query: &[],
            limit: 10,
            last: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"limit": 10}));
    }
}
