use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use modwatch_core::Progress;

use crate::alert::Alert;
use crate::components::{render_home, render_progress, render_submission_form};
use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct AlertQuery {
    alert: Option<String>,
}

impl AlertQuery {
    fn alert(&self) -> Option<Alert> {
        self.alert.as_deref().and_then(Alert::from_query)
    }
}

pub async fn home_page() -> Html<String> {
    Html(render_home())
}

pub async fn report_form_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertQuery>,
) -> Html<String> {
    Html(render_submission_form(false, query.alert(), state.captcha_sitekey.clone()))
}

pub async fn falsepositive_form_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertQuery>,
) -> Html<String> {
    Html(render_submission_form(true, query.alert(), state.captcha_sitekey.clone()))
}

pub async fn progress_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let progress = Progress::load(&state.records).await?;
    Ok(Html(render_progress(progress)))
}
