//! Submission scenarios run against the in-memory store and a fixed blocklist.

use std::sync::Arc;

use chrono::Utc;

use modwatch_common::{BlacklistGuard, Domain, Report, ReportKind};
use modwatch_core::testing::{MemoryStore, StaticBlocklist};
use modwatch_core::{Collection, Outcome, Progress, Records, ReportClassifier, Submission};

fn setup(store: &Arc<MemoryStore>, listed: &[&str]) -> ReportClassifier {
    ReportClassifier::new(
        Records::new(store.clone()),
        Arc::new(StaticBlocklist::new(listed)),
        BlacklistGuard::AnyFlagged,
    )
}

fn submission(domain: &str, kind: ReportKind) -> Submission {
    Submission {
        domain: domain.to_string(),
        description: "test".to_string(),
        kind,
    }
}

#[tokio::test]
async fn new_domain_is_accepted_and_stored() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &[]);

    let result = classifier
        .classify(submission("new-site.example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
    assert_eq!(result.echo.domain.as_str(), "new-site.example");
    assert_eq!(result.echo.description, "test");
    assert!(!result.echo.false_positive);

    let rows = store.rows(Collection::Reports);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["domain"], "new-site.example");
    assert_eq!(rows[0]["type"], "report");
    assert_eq!(rows[0]["reviewed"], false);
    assert_eq!(rows[0]["comment"], "");
    assert_eq!(rows[0]["description"], "test");
}

#[tokio::test]
async fn pending_domain_is_rejected_without_write() {
    let store = Arc::new(MemoryStore::new().with_report(Report::new(
        Domain::from("pending.example"),
        ReportKind::Report,
        "first".to_string(),
        Utc::now(),
    )));
    let classifier = setup(&store, &[]);

    let result = classifier
        .classify(submission("pending.example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::AlreadyPending);
    assert_eq!(store.put_count(), 0);
    assert_eq!(store.rows(Collection::Reports).len(), 1);
}

#[tokio::test]
async fn listed_domain_is_rejected_without_write() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &["listed.example"]);

    let result = classifier
        .classify(submission("listed.example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::AlreadyListed);
    assert_eq!(store.put_count(), 0);
}

#[tokio::test]
async fn published_list_outranks_pending_queue() {
    let store = Arc::new(MemoryStore::new().with_report(Report::new(
        Domain::from("both.example"),
        ReportKind::Report,
        String::new(),
        Utc::now(),
    )));
    let classifier = setup(&store, &["both.example"]);

    let result = classifier
        .classify(submission("both.example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::AlreadyListed);
}

#[tokio::test]
async fn repeated_report_is_accepted_once() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &[]);

    let first = classifier
        .classify(submission("https://www.repeat.example/a", ReportKind::Report))
        .await
        .unwrap();
    let second = classifier
        .classify(submission("repeat.example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(first.outcome, Outcome::Success);
    assert_eq!(second.outcome, Outcome::AlreadyPending);
    assert_eq!(store.put_count(), 1);
}

#[tokio::test]
async fn dispute_for_unlisted_domain_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &["listed.example"]);

    let result = classifier
        .classify(submission("neverlisted.example", ReportKind::FalsePositive))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::NotListed);
    assert!(result.echo.false_positive);
    assert_eq!(store.put_count(), 0);
}

#[tokio::test]
async fn dispute_for_listed_domain_is_stored() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &["listed.example"]);

    let result = classifier
        .classify(submission("https://listed.example/page", ReportKind::FalsePositive))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
    let rows = store.rows(Collection::Reports);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["type"], "false-positive");
    assert_eq!(rows[0]["reviewed"], false);
}

#[tokio::test]
async fn repeated_dispute_is_accepted_once() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &["listed.example"]);

    let first = classifier
        .classify(submission("listed.example", ReportKind::FalsePositive))
        .await
        .unwrap();
    let second = classifier
        .classify(submission("listed.example", ReportKind::FalsePositive))
        .await
        .unwrap();

    assert_eq!(first.outcome, Outcome::Success);
    assert_eq!(second.outcome, Outcome::AlreadyPending);
    assert_eq!(store.rows(Collection::Reports).len(), 1);
}

#[tokio::test]
async fn bare_www_host_matches_listed_entry() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &["www.listed.example"]);

    let report = classifier
        .classify(submission("www.listed.example", ReportKind::Report))
        .await
        .unwrap();
    let dispute = classifier
        .classify(submission("www.listed.example", ReportKind::FalsePositive))
        .await
        .unwrap();

    assert_eq!(report.outcome, Outcome::AlreadyListed);
    assert_eq!(dispute.outcome, Outcome::Success);
    assert_eq!(dispute.echo.domain.as_str(), "listed.example");
    assert_eq!(store.put_count(), 1);
}

#[tokio::test]
async fn pending_check_ignores_case() {
    let store = Arc::new(MemoryStore::new().with_report(Report::new(
        Domain::from("dup.example"),
        ReportKind::Report,
        String::new(),
        Utc::now(),
    )));
    let classifier = setup(&store, &[]);

    let result = classifier
        .classify(submission("Dup.Example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::AlreadyPending);
    assert_eq!(store.put_count(), 0);
}

#[tokio::test]
async fn stored_row_uses_canonical_domain() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &[]);

    classifier
        .classify(submission("WWW.Mixed.Example", ReportKind::Report))
        .await
        .unwrap();
    let again = classifier
        .classify(submission("mixed.example", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(store.rows(Collection::Reports)[0]["domain"], "mixed.example");
    assert_eq!(again.outcome, Outcome::AlreadyPending);
}

#[tokio::test]
async fn substring_of_listed_domain_is_not_listed() {
    let store = Arc::new(MemoryStore::new());
    let classifier = setup(&store, &["notsite.com"]);

    let result = classifier
        .classify(submission("site.com", ReportKind::Report))
        .await
        .unwrap();

    assert_eq!(result.outcome, Outcome::Success);
}

#[tokio::test]
async fn every_classification_downloads_the_list() {
    let store = Arc::new(MemoryStore::new());
    let blocklist = Arc::new(StaticBlocklist::new(&[]));
    let classifier = ReportClassifier::new(
        Records::new(store),
        blocklist.clone(),
        BlacklistGuard::AnyFlagged,
    );

    for domain in ["a.example", "b.example", "a.example"] {
        classifier
            .classify(submission(domain, ReportKind::Report))
            .await
            .unwrap();
    }

    assert_eq!(blocklist.fetch_count(), 3);
}

#[tokio::test]
async fn progress_counts_reviewed_reports() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..10 {
        let mut report = Report::new(
            Domain::from(format!("site{i}.example").as_str()),
            ReportKind::Report,
            String::new(),
            Utc::now(),
        );
        report.reviewed = i < 3;
        store.insert_report(report);
    }
    let records = Records::new(store);

    let progress = Progress::load(&records).await.unwrap();
    assert_eq!(progress, Progress { reviewed: 3, total: 10, percent: 30 });
}

#[tokio::test]
async fn progress_of_empty_store_is_zero() {
    let records = Records::new(Arc::new(MemoryStore::new()));
    let progress = Progress::load(&records).await.unwrap();
    assert_eq!(progress.percent, 0);
}
