use joaat_restore::batch::{BatchReport, FileReport};
use joaat_restore::metrics::Metrics;
use joaat_restore::substitutor::{FailureKind, Outcome};

#[test]
fn counters_follow_report() {
    let metrics = Metrics::new().unwrap();
    let report = BatchReport::new(vec![
        FileReport {
            path: "a.xml".into(),
            outcome: Outcome::Written { replacements: 4 },
        },
        FileReport {
            path: "b.xml".into(),
            outcome: Outcome::Skipped,
        },
        FileReport {
            path: "c.xml".into(),
            outcome: Outcome::Failed {
                kind: FailureKind::Read,
                reason: "gone".into(),
            },
        },
    ]);

    metrics.record(&report);

    assert_eq!(metrics.files_written.get(), 1);
    assert_eq!(metrics.files_skipped.get(), 1);
    assert_eq!(metrics.files_failed.get(), 1);
    assert_eq!(metrics.tokens_replaced.get(), 4);

    let text = metrics.render().unwrap();
    assert!(text.contains("tokens_replaced_total 4"));
}

#[test]
fn dry_run_files_have_their_own_counter() {
    let metrics = Metrics::new().unwrap();
    let report = BatchReport::new(vec![
        FileReport {
            path: "a.xml".into(),
            outcome: Outcome::WouldWrite { replacements: 3 },
        },
        FileReport {
            path: "b.xml".into(),
            outcome: Outcome::WouldWrite { replacements: 2 },
        },
    ]);

    metrics.record(&report);

    assert_eq!(metrics.files_written.get(), 0);
    assert_eq!(metrics.files_would_write.get(), 2);
    assert_eq!(metrics.tokens_replaced.get(), 5);
    assert!(metrics.render().unwrap().contains("files_would_write_total 2"));
}
