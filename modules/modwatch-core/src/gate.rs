use std::sync::Arc;

use tracing::warn;

use crate::traits::CaptchaVerifier;

/// Human-verification check in front of form submissions.
#[derive(Clone)]
pub struct CaptchaGate {
    verifier: Arc<dyn CaptchaVerifier>,
}

impl CaptchaGate {
    pub fn new(verifier: Arc<dyn CaptchaVerifier>) -> Self {
        Self { verifier }
    }

    /// A missing or blank token fails without calling the verifier. A
    /// verifier that cannot be reached also counts as a failure.
    pub async fn passes(&self, token: Option<&str>) -> bool {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return false;
        };
        match self.verifier.verify(token).await {
            Ok(passed) => passed,
            Err(e) => {
                warn!(error = %e, "Captcha verification failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedCaptcha;

    #[tokio::test]
    async fn missing_token_skips_verifier() {
        let verifier = Arc::new(FixedCaptcha::pass());
        let gate = CaptchaGate::new(verifier.clone());
        assert!(!gate.passes(None).await);
        assert!(!gate.passes(Some("  ")).await);
        assert_eq!(verifier.call_count(), 0);
    }

    #[tokio::test]
    async fn verifier_answer_is_used() {
        assert!(CaptchaGate::new(Arc::new(FixedCaptcha::pass())).passes(Some("tok")).await);
        assert!(!CaptchaGate::new(Arc::new(FixedCaptcha::refuse())).passes(Some("tok")).await);
    }

    #[tokio::test]
    async fn unreachable_verifier_fails_closed() {
        let gate = CaptchaGate::new(Arc::new(FixedCaptcha::unreachable()));
        assert!(!gate.passes(Some("tok")).await);
    }
}
