use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        ConnectInfo, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use modwatch_common::{ModwatchError, ReportKind};
use modwatch_core::{Classification, Echo, Outcome, Submission};

use crate::alert::Alert;
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct ReportBody {
    domain: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    falsepositive: bool,
}

#[derive(Deserialize)]
pub struct ReportForm {
    domain: Option<String>,
    description: Option<String>,
    #[serde(rename = "captcha-token", alias = "h-captcha-response")]
    captcha_token: Option<String>,
    falsepositive: Option<String>,
}

#[derive(Serialize)]
struct ReportResponse {
    result: Outcome,
    detail: &'static str,
    already_listed: bool,
    under_review: bool,
    blacklist: bool,
    data: Echo,
}

impl From<Classification> for ReportResponse {
    fn from(c: Classification) -> Self {
        Self {
            result: c.outcome,
            detail: c.outcome.detail(),
            already_listed: c.outcome == Outcome::AlreadyListed,
            under_review: c.outcome == Outcome::AlreadyPending,
            blacklist: c.outcome == Outcome::Blacklisted,
            data: c.echo,
        }
    }
}

pub fn status_for(outcome: Outcome) -> StatusCode {
    match outcome {
        Outcome::Success => StatusCode::CREATED,
        Outcome::Blacklisted => StatusCode::BAD_REQUEST,
        Outcome::AlreadyListed | Outcome::AlreadyPending | Outcome::NotListed => {
            StatusCode::CONFLICT
        }
    }
}

fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    })
}

fn required(field: Option<String>, name: &str) -> Result<String, ApiError> {
    field.ok_or_else(|| ApiError::validation(format!("{name} is required")))
}

/// JSON reporting endpoint for new reports and false-positive disputes.
/// No captcha: API clients are trusted to the rate limit.
pub async fn api_report(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    query: Result<Query<ReportQuery>, QueryRejection>,
    payload: Result<Json<ReportBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let Json(body) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let domain = required(body.domain, "domain")?;
    let description = required(body.description, "description")?;

    if !state.rate_limiter.allow(addr.ip()).await {
        return Err(ApiError::TooManyRequests {
            message: format!(
                "Rate limit exceeded, max {} submissions per hour",
                state.rate_limiter.max_per_hour()
            ),
        });
    }

    let classification = state
        .classifier
        .classify(Submission {
            domain,
            description,
            kind: ReportKind::from_flag(query.falsepositive),
        })
        .await?;

    let status = status_for(classification.outcome);
    Ok((status, Json(ReportResponse::from(classification))).into_response())
}

/// Form endpoint for the human-facing pages. Every outcome is a redirect
/// back to the form with an `alert` banner.
pub async fn form_report(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Form(form): Form<ReportForm>,
) -> Result<Response, ApiError> {
    let kind = ReportKind::from_flag(is_truthy(form.falsepositive.as_deref()));
    let back = |alert: Alert| {
        let page = match kind {
            ReportKind::Report => "/forms/report",
            ReportKind::FalsePositive => "/forms/falsepositive",
        };
        Redirect::to(&format!("{page}?alert={}", alert.as_str())).into_response()
    };

    if !state.rate_limiter.allow(addr.ip()).await {
        info!("Form submission rate limited");
        return Ok(back(Alert::Error));
    }

    if !state.gate.passes(form.captcha_token.as_deref()).await {
        return Ok(back(Alert::Captcha));
    }

    let domain = required(form.domain, "domain")?;
    let description = required(form.description, "description")?;

    match state
        .classifier
        .classify(Submission {
            domain,
            description,
            kind,
        })
        .await
    {
        Ok(classification) => Ok(back(Alert::from_outcome(classification.outcome))),
        Err(ModwatchError::Validation(message)) => Err(ApiError::validation(message)),
        Err(e) => {
            warn!(error = %e, "Form submission failed");
            Ok(back(Alert::Error))
        }
    }
}
