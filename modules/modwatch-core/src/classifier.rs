use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use modwatch_common::{normalize_domain, BlacklistGuard, Domain, ModwatchError, Report, ReportKind};

use crate::records::Records;
use crate::traits::BlocklistSource;

pub const MAX_DOMAIN_LEN: usize = 2048;
pub const MAX_DESCRIPTION_LEN: usize = 4000;

/// A report or dispute as received from either entry point.
#[derive(Debug, Clone)]
pub struct Submission {
    pub domain: String,
    pub description: String,
    pub kind: ReportKind,
}

/// Result of classifying one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Accepted and stored.
    Success,
    /// Report for a domain already on the published list.
    AlreadyListed,
    /// Report for a domain the moderators have blacklisted from submission.
    Blacklisted,
    /// A matching submission is already waiting for review.
    AlreadyPending,
    /// Dispute for a domain that is not on the published list.
    NotListed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }

    pub fn detail(self) -> &'static str {
        match self {
            Outcome::Success => "Success!",
            Outcome::AlreadyListed => "Failed to report - domain already listed",
            Outcome::Blacklisted => "Failed to report - domain blacklisted",
            Outcome::AlreadyPending => "Failed to report - domain already on waitinglist",
            Outcome::NotListed => "Failed to dispute - domain not listed",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Success => write!(f, "success"),
            Outcome::AlreadyListed => write!(f, "already-listed"),
            Outcome::Blacklisted => write!(f, "blacklisted"),
            Outcome::AlreadyPending => write!(f, "already-pending"),
            Outcome::NotListed => write!(f, "not-listed"),
        }
    }
}

/// What the client sent, after normalization, echoed back for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Echo {
    pub domain: Domain,
    pub description: String,
    #[serde(rename = "false-positive")]
    pub false_positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub outcome: Outcome,
    pub echo: Echo,
}

/// Decides whether a submission is accepted and stores it when it is.
///
/// Every call does its own blocklist download and store queries; nothing is
/// cached between submissions.
pub struct ReportClassifier {
    records: Records,
    blocklist: Arc<dyn BlocklistSource>,
    guard: BlacklistGuard,
}

impl ReportClassifier {
    pub fn new(records: Records, blocklist: Arc<dyn BlocklistSource>, guard: BlacklistGuard) -> Self {
        Self {
            records,
            blocklist,
            guard,
        }
    }

    pub async fn classify(&self, submission: Submission) -> Result<Classification, ModwatchError> {
        let raw = submission.domain.trim();
        if raw.is_empty() {
            return Err(ModwatchError::Validation("domain must not be empty".to_string()));
        }
        if raw.chars().count() > MAX_DOMAIN_LEN {
            return Err(ModwatchError::Validation(format!(
                "domain too long (max {MAX_DOMAIN_LEN} characters)"
            )));
        }
        if submission.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ModwatchError::Validation(format!(
                "description too long (max {MAX_DESCRIPTION_LEN} characters)"
            )));
        }

        let domain = normalize_domain(raw).canonical();
        let outcome = match submission.kind {
            ReportKind::Report => self.classify_report(&domain).await?,
            ReportKind::FalsePositive => self.classify_dispute(&domain).await?,
        };

        if outcome.is_success() {
            let report = Report::new(
                domain.clone(),
                submission.kind,
                submission.description.clone(),
                Utc::now(),
            );
            self.records
                .insert_report(&report)
                .await
                .map_err(ModwatchError::upstream)?;
        }

        info!(domain = %domain, kind = %submission.kind, %outcome, "Submission classified");

        Ok(Classification {
            outcome,
            echo: Echo {
                domain,
                description: submission.description,
                false_positive: submission.kind.is_false_positive(),
            },
        })
    }

    async fn classify_report(&self, domain: &Domain) -> Result<Outcome, ModwatchError> {
        if self.is_published(domain).await? {
            return Ok(Outcome::AlreadyListed);
        }
        if self.is_blacklisted(domain).await? {
            return Ok(Outcome::Blacklisted);
        }
        if self
            .records
            .has_report_for(domain)
            .await
            .map_err(ModwatchError::upstream)?
        {
            return Ok(Outcome::AlreadyPending);
        }
        Ok(Outcome::Success)
    }

    async fn classify_dispute(&self, domain: &Domain) -> Result<Outcome, ModwatchError> {
        if !self.is_published(domain).await? {
            return Ok(Outcome::NotListed);
        }
        if self
            .records
            .has_open_dispute_for(domain)
            .await
            .map_err(ModwatchError::upstream)?
        {
            return Ok(Outcome::AlreadyPending);
        }
        Ok(Outcome::Success)
    }

    async fn is_published(&self, domain: &Domain) -> Result<bool, ModwatchError> {
        let list = self.blocklist.fetch().await.map_err(ModwatchError::upstream)?;
        Ok(list.contains(domain))
    }

    async fn is_blacklisted(&self, domain: &Domain) -> Result<bool, ModwatchError> {
        let rows = self
            .records
            .blacklist_rows_for(domain)
            .await
            .map_err(ModwatchError::upstream)?;
        if rows.is_empty() {
            return Ok(false);
        }
        match self.guard {
            BlacklistGuard::Direct => Ok(true),
            BlacklistGuard::AnyFlagged => {
                if rows.iter().any(|row| row.blacklisted) {
                    return Ok(true);
                }
                let flagged = self
                    .records
                    .flagged_blacklist()
                    .await
                    .map_err(ModwatchError::upstream)?;
                Ok(!flagged.is_empty())
            }
        }
    }
}
