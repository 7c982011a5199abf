use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use deta_client::DetaClient;
use hcaptcha_client::HCaptchaClient;
use modwatch_common::Config;
use modwatch_core::{CaptchaGate, DetaStore, HttpBlocklistSource, Records, ReportClassifier};

mod alert;
mod components;
mod error;
mod pages;
mod rate_limit;
mod rest;
mod routes;

use rate_limit::RateLimiter;

pub struct AppState {
    pub classifier: ReportClassifier,
    pub records: Records,
    pub gate: CaptchaGate,
    pub captcha_sitekey: Option<String>,
    pub rate_limiter: RateLimiter,
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if std::env::var("LOG_FORMAT").is_ok_and(|f| f == "json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config = Config::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout_secs);

    let deta = DetaClient::new(&config.deta_base_url, &config.deta_token, timeout)
        .context("configuring record store client")?;
    let store = Arc::new(DetaStore::new(deta, &config.reports_base, &config.blacklist_base));
    let records = Records::new(store);

    let blocklist = Arc::new(HttpBlocklistSource::new(&config.blocklist_url, timeout)?);
    let captcha = HCaptchaClient::new(&config.captcha_verify_url, &config.captcha_secret, timeout)
        .context("configuring captcha client")?;

    let state = Arc::new(AppState {
        classifier: ReportClassifier::new(records.clone(), blocklist, config.blacklist_guard),
        records,
        gate: CaptchaGate::new(Arc::new(captcha)),
        captcha_sitekey: config.captcha_sitekey.clone(),
        rate_limiter: RateLimiter::new(config.rate_limit_per_hour),
    });

    let app = routes::build_router(state, &config.allowed_origins);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(
        blocklist = %config.blocklist_url,
        guard = ?config.blacklist_guard,
        "modwatch starting on {addr}"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
