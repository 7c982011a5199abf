pub mod report;

use std::sync::Arc;

use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use modwatch_common::{Domain, ReportKind};
use modwatch_core::Progress;

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub struct WaitlistItem {
    domain: Domain,
    #[serde(rename = "type")]
    kind: ReportKind,
    #[serde(with = "modwatch_common::types::timestamp")]
    timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct BlacklistItem {
    domain: Domain,
}

/// Submissions still waiting for a moderator.
pub async fn api_waitlist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WaitlistItem>>, ApiError> {
    let reports = state.records.unreviewed_reports().await?;
    let items = reports
        .into_iter()
        .map(|r| WaitlistItem {
            domain: r.domain,
            kind: r.kind,
            timestamp: r.timestamp,
        })
        .collect();
    Ok(Json(items))
}

/// Domains moderators have blacklisted from submission.
pub async fn api_blacklist(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BlacklistItem>>, ApiError> {
    let entries = state.records.flagged_blacklist().await?;
    let items = entries
        .into_iter()
        .map(|e| BlacklistItem { domain: e.domain })
        .collect();
    Ok(Json(items))
}

pub async fn api_progress(State(state): State<Arc<AppState>>) -> Result<Json<Progress>, ApiError> {
    Ok(Json(Progress::load(&state.records).await?))
}
