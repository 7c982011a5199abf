// In-memory stand-ins for the three trait seams.
//
// - MemoryStore (RecordStore): equality-filter store over Vecs, with call
//   counters and a failing mode.
// - StaticBlocklist (BlocklistSource): a fixed list, or always failing.
// - FixedCaptcha (CaptchaVerifier): same answer for every token.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

use modwatch_common::{BlacklistEntry, Report};

use crate::blocklist::Blocklist;
use crate::traits::{BlocklistSource, CaptchaVerifier, Collection, Filter, RecordStore};

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<Collection, Vec<Value>>>,
    puts: AtomicUsize,
    fetches: AtomicUsize,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call returns an error, as if the store were unreachable.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_blacklist(self, entry: BlacklistEntry) -> Self {
        self.insert_raw(Collection::Blacklist, to_value(&entry));
        self
    }

    pub fn with_report(self, report: Report) -> Self {
        self.insert_report(report);
        self
    }

    /// Seed a report without counting it as a `put`.
    pub fn insert_report(&self, report: Report) {
        self.insert_raw(Collection::Reports, to_value(&report));
    }

    pub fn insert_raw(&self, collection: Collection, item: Value) {
        self.rows
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(item);
    }

    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        self.rows
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Total calls of either kind.
    pub fn access_count(&self) -> usize {
        self.put_count() + self.fetch_count()
    }
}

fn to_value<T: serde::Serialize>(item: &T) -> Value {
    serde_json::to_value(item).expect("test fixture serializes")
}

fn matches(item: &Value, filter: &Filter) -> bool {
    filter.iter().all(|(key, want)| item.get(key) == Some(want))
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn put(&self, collection: Collection, item: Value) -> Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            bail!("MemoryStore: store unavailable");
        }
        self.insert_raw(collection, item);
        Ok(())
    }

    async fn fetch(&self, collection: Collection, filter: Filter) -> Result<Vec<Value>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            bail!("MemoryStore: store unavailable");
        }
        Ok(self
            .rows(collection)
            .into_iter()
            .filter(|item| matches(item, &filter))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// StaticBlocklist
// ---------------------------------------------------------------------------

pub struct StaticBlocklist {
    list: Option<Blocklist>,
    fetches: AtomicUsize,
}

impl StaticBlocklist {
    pub fn new(domains: &[&str]) -> Self {
        Self {
            list: Some(domains.iter().collect()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            list: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistSource for StaticBlocklist {
    async fn fetch(&self) -> Result<Blocklist> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.list {
            Some(list) => Ok(list.clone()),
            None => bail!("StaticBlocklist: source unavailable"),
        }
    }
}

// ---------------------------------------------------------------------------
// FixedCaptcha
// ---------------------------------------------------------------------------

pub struct FixedCaptcha {
    answer: Option<bool>,
    calls: AtomicUsize,
}

impl FixedCaptcha {
    pub fn pass() -> Self {
        Self::answering(Some(true))
    }

    pub fn refuse() -> Self {
        Self::answering(Some(false))
    }

    pub fn unreachable() -> Self {
        Self::answering(None)
    }

    fn answering(answer: Option<bool>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptchaVerifier for FixedCaptcha {
    async fn verify(&self, _token: &str) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answer {
            Some(answer) => Ok(answer),
            None => bail!("FixedCaptcha: verifier unreachable"),
        }
    }
}
