pub mod error;

pub use error::{CaptchaError, Result};

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

/// `siteverify` response body. Only `success` decides the outcome.
#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub success: bool,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

pub struct HCaptchaClient {
    client: reqwest::Client,
    verify_url: String,
    secret: String,
}

impl HCaptchaClient {
    pub fn new(verify_url: &str, secret: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            verify_url: verify_url.to_string(),
            secret: secret.to_string(),
        })
    }

    /// Check a challenge token. `Ok(false)` means the verifier answered and
    /// refused the token; transport problems and non-2xx answers are errors.
    pub async fn verify(&self, token: &str) -> Result<bool> {
        let form = [("secret", self.secret.as_str()), ("response", token)];

        let resp = self.client.post(&self.verify_url).form(&form).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CaptchaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: VerifyResponse = resp.json().await?;
        if !body.success {
            debug!(error_codes = ?body.error_codes, "Captcha token refused");
        }
        Ok(body.success)
    }
}
