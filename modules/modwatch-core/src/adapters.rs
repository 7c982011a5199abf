// Production implementations of the trait seams in traits.rs.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use deta_client::DetaClient;
use hcaptcha_client::HCaptchaClient;

use crate::blocklist::Blocklist;
use crate::traits::{BlocklistSource, CaptchaVerifier, Collection, Filter, RecordStore};

/// [`RecordStore`] backed by two Deta Bases.
pub struct DetaStore {
    client: DetaClient,
    reports_base: String,
    blacklist_base: String,
}

impl DetaStore {
    pub fn new(client: DetaClient, reports_base: &str, blacklist_base: &str) -> Self {
        Self {
            client,
            reports_base: reports_base.to_string(),
            blacklist_base: blacklist_base.to_string(),
        }
    }

    fn base(&self, collection: Collection) -> &str {
        match collection {
            Collection::Reports => &self.reports_base,
            Collection::Blacklist => &self.blacklist_base,
        }
    }
}

#[async_trait]
impl RecordStore for DetaStore {
    async fn put(&self, collection: Collection, item: Value) -> Result<()> {
        let base = self.base(collection);
        self.client
            .put(base, item)
            .await
            .with_context(|| format!("storing item in {base}"))?;
        Ok(())
    }

    async fn fetch(&self, collection: Collection, filter: Filter) -> Result<Vec<Value>> {
        let base = self.base(collection);
        let query = if filter.is_empty() { vec![] } else { vec![filter] };
        let items = self
            .client
            .fetch(base, &query)
            .await
            .with_context(|| format!("querying {base}"))?;
        Ok(items)
    }
}

/// Downloads the published blocklist text on every call.
pub struct HttpBlocklistSource {
    client: reqwest::Client,
    url: String,
}

impl HttpBlocklistSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building blocklist HTTP client")?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl BlocklistSource for HttpBlocklistSource {
    async fn fetch(&self) -> Result<Blocklist> {
        let text = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("fetching blocklist from {}", self.url))?
            .text()
            .await
            .context("reading blocklist body")?;

        let list = Blocklist::parse(&text);
        debug!(entries = list.len(), "Fetched blocklist");
        Ok(list)
    }
}

#[async_trait]
impl CaptchaVerifier for HCaptchaClient {
    async fn verify(&self, token: &str) -> Result<bool> {
        Ok(HCaptchaClient::verify(self, token).await?)
    }
}
