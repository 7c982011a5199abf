// Trait seams for everything the service talks to over the network.
//
// RecordStore: the document store holding `reports` and `blacklist`.
// BlocklistSource: the published blocklist text.
// CaptchaVerifier: the human-verification service.
//
// Production implementations live in adapters.rs; in-memory ones in testing.rs.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::blocklist::Blocklist;

/// Equality filter: every key must match the item's field exactly.
/// An empty filter matches every item.
pub type Filter = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Reports,
    Blacklist,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Reports => write!(f, "reports"),
            Collection::Blacklist => write!(f, "blacklist"),
        }
    }
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one document.
    async fn put(&self, collection: Collection, item: Value) -> Result<()>;

    /// All documents matching `filter`.
    async fn fetch(&self, collection: Collection, filter: Filter) -> Result<Vec<Value>>;
}

#[async_trait]
pub trait BlocklistSource: Send + Sync {
    /// Download and parse the current list. Never cached.
    async fn fetch(&self) -> Result<Blocklist>;
}

#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Ok(false)` when the verifier refused the token.
    async fn verify(&self, token: &str) -> Result<bool>;
}
