use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

/// How the `blacklist` collection is consulted when classifying a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistGuard {
    /// The domain must have a row, and at least one row in the whole
    /// collection must carry `blacklisted = true`.
    AnyFlagged,
    /// Any row for the domain counts, flagged or not.
    Direct,
}

impl FromStr for BlacklistGuard {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "any-flagged" => Ok(Self::AnyFlagged),
            "direct" => Ok(Self::Direct),
            other => Err(anyhow!("unknown blacklist guard `{other}` (expected any-flagged or direct)")),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Record store
    pub deta_token: String,
    pub deta_base_url: String,
    pub reports_base: String,
    pub blacklist_base: String,
    pub blacklist_guard: BlacklistGuard,

    // Captcha
    pub captcha_secret: String,
    pub captcha_sitekey: Option<String>,
    pub captcha_verify_url: String,

    // Public blocklist
    pub blocklist_url: String,

    // Web server
    pub web_host: String,
    pub web_port: u16,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_hour: usize,
    pub http_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    /// Fails with the variable name when a required value is missing or malformed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} environment variable is required"))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            deta_token: required("DETA_TOKEN")?,
            deta_base_url: or_default("DETA_BASE_URL", "https://database.deta.sh/v1"),
            reports_base: or_default("REPORTS_BASE", "api-reports"),
            blacklist_base: or_default("BLACKLIST_BASE", "api-blacklist"),
            blacklist_guard: or_default("BLACKLIST_GUARD", "any-flagged")
                .parse()
                .context("BLACKLIST_GUARD")?,
            captcha_secret: required("CAPTCHA_SECRET")?,
            captcha_sitekey: lookup("CAPTCHA_SITEKEY").filter(|v| !v.is_empty()),
            captcha_verify_url: or_default("CAPTCHA_VERIFY_URL", "https://hcaptcha.com/siteverify"),
            blocklist_url: or_default("BLOCKLIST_URL", "https://api.stopmodreposts.org/sites.txt"),
            web_host: or_default("WEB_HOST", "0.0.0.0"),
            web_port: or_default("WEB_PORT", "8000")
                .parse()
                .context("WEB_PORT must be a number")?,
            allowed_origins: or_default("ALLOWED_ORIGINS", "")
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            rate_limit_per_hour: or_default("RATE_LIMIT_PER_HOUR", "10")
                .parse()
                .context("RATE_LIMIT_PER_HOUR must be a number")?,
            http_timeout_secs: or_default("HTTP_TIMEOUT_SECS", "30")
                .parse()
                .context("HTTP_TIMEOUT_SECS must be a number")?,
        })
    }
}
