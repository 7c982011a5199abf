use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// What a submission asks moderators to do with a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Add the domain to the blocklist.
    Report,
    /// Remove a currently listed domain from the blocklist.
    FalsePositive,
}

impl ReportKind {
    pub fn from_flag(false_positive: bool) -> Self {
        if false_positive {
            ReportKind::FalsePositive
        } else {
            ReportKind::Report
        }
    }

    pub fn is_false_positive(self) -> bool {
        self == ReportKind::FalsePositive
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportKind::Report => write!(f, "report"),
            ReportKind::FalsePositive => write!(f, "false-positive"),
        }
    }
}

/// A row in the `reports` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub domain: Domain,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub description: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub reviewed: bool,
    #[serde(default)]
    pub comment: String,
}

impl Report {
    /// A fresh, unreviewed report.
    pub fn new(domain: Domain, kind: ReportKind, description: String, now: DateTime<Utc>) -> Self {
        Self {
            domain,
            kind,
            description,
            timestamp: now,
            reviewed: false,
            comment: String::new(),
        }
    }
}

/// A row in the `blacklist` collection. Written by the moderation pipeline only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlacklistEntry {
    pub domain: Domain,
    #[serde(default)]
    pub blacklisted: bool,
}

/// Report timestamps: written as RFC 3339, read from RFC 3339 or the older
/// naive `YYYY-MM-DD HH:MM:SS[.ffffff]` form (taken as UTC).
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const LEGACY_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, LEGACY_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }
}
