use std::sync::Arc;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use modwatch_common::{BlacklistEntry, Domain, Report, ReportKind};

use crate::traits::{Collection, Filter, RecordStore};

/// Typed access to the two collections on top of a [`RecordStore`].
#[derive(Clone)]
pub struct Records {
    store: Arc<dyn RecordStore>,
}

fn filter(pairs: &[(&str, Value)]) -> Filter {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

impl Records {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Store a new report under a generated key.
    pub async fn insert_report(&self, report: &Report) -> Result<()> {
        let mut item = serde_json::to_value(report).context("serializing report")?;
        if let Some(obj) = item.as_object_mut() {
            obj.insert("key".to_string(), json!(Uuid::new_v4().simple().to_string()));
        }
        self.store.put(Collection::Reports, item).await
    }

    /// True if `reports` holds any row for the domain, whatever its state.
    pub async fn has_report_for(&self, domain: &Domain) -> Result<bool> {
        let rows = self
            .store
            .fetch(Collection::Reports, filter(&[("domain", json!(domain))]))
            .await?;
        Ok(!rows.is_empty())
    }

    /// True if an unreviewed dispute for the domain is already queued.
    pub async fn has_open_dispute_for(&self, domain: &Domain) -> Result<bool> {
        let rows = self
            .store
            .fetch(
                Collection::Reports,
                filter(&[
                    ("domain", json!(domain)),
                    ("type", json!(ReportKind::FalsePositive)),
                    ("reviewed", json!(false)),
                ]),
            )
            .await?;
        Ok(!rows.is_empty())
    }

    pub async fn unreviewed_reports(&self) -> Result<Vec<Report>> {
        let rows = self
            .store
            .fetch(Collection::Reports, filter(&[("reviewed", json!(false))]))
            .await?;
        Ok(decode_rows(Collection::Reports, rows))
    }

    pub async fn count_reports(&self) -> Result<usize> {
        Ok(self.store.fetch(Collection::Reports, Filter::new()).await?.len())
    }

    pub async fn count_reviewed_reports(&self) -> Result<usize> {
        let rows = self
            .store
            .fetch(Collection::Reports, filter(&[("reviewed", json!(true))]))
            .await?;
        Ok(rows.len())
    }

    pub async fn blacklist_rows_for(&self, domain: &Domain) -> Result<Vec<BlacklistEntry>> {
        let rows = self
            .store
            .fetch(Collection::Blacklist, filter(&[("domain", json!(domain))]))
            .await?;
        Ok(decode_rows(Collection::Blacklist, rows))
    }

    pub async fn flagged_blacklist(&self) -> Result<Vec<BlacklistEntry>> {
        let rows = self
            .store
            .fetch(Collection::Blacklist, filter(&[("blacklisted", json!(true))]))
            .await?;
        Ok(decode_rows(Collection::Blacklist, rows))
    }
}

/// Decode rows, skipping (and logging) any the moderation side wrote in a
/// shape we cannot read.
fn decode_rows<T: DeserializeOwned>(collection: Collection, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(%collection, error = %e, "Skipping unreadable row");
                None
            }
        })
        .collect()
}
