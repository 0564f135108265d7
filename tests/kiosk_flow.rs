mod common;

use badge_kiosk::export::{ExportSource, CSV_HEADERS};
use badge_kiosk::{Error, Group};
use tempfile::TempDir;

use common::{draft, kiosk_at, register, CountingRasterizer};

#[test]
fn roster_survives_a_restart_newest_first() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("kiosk.db");
    let ids = {
        let mut kiosk = kiosk_at(&db, dir.path());
        register(&mut kiosk, &["ann", "bo", "cy"])
    };

    let reopened = kiosk_at(&db, dir.path());
    let stored: Vec<&str> = reopened.records().iter().map(|r| r.id.as_str()).collect();
    let expected: Vec<&str> = ids.iter().rev().map(String::as_str).collect();
    assert_eq!(stored, expected);
    assert_eq!(reopened.records()[0].name, "CY");
}

#[test]
fn printed_flags_and_deletions_are_persisted() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("kiosk.db");
    let ids = {
        let mut kiosk = kiosk_at(&db, dir.path());
        let ids = register(&mut kiosk, &["ann", "bo", "cy"]);
        kiosk
            .export_document(
                ExportSource::SingleResult(ids[0].clone()),
                &mut CountingRasterizer::default(),
            )
            .unwrap();
        kiosk.set_selection([ids[1].clone()]);
        assert_eq!(kiosk.bulk_delete_selected().unwrap(), 1);
        ids
    };

    let reopened = kiosk_at(&db, dir.path());
    assert_eq!(reopened.records().len(), 2);
    assert!(reopened.get(&ids[0]).unwrap().printed);
    assert!(reopened.get(&ids[1]).is_none());
    assert!(!reopened.get(&ids[2]).unwrap().printed);
}

#[test]
fn invalid_draft_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), dir.path());

    let mut missing_score = draft("ann", "ISTJ");
    missing_score.score = None;
    let err = kiosk.submit(&missing_score).unwrap_err();
    assert!(err.is_validation());
    assert!(kiosk.records().is_empty());

    let record = kiosk.submit(&draft("  ann ", "ISTJ")).unwrap().record;
    assert_eq!(record.name, "ANN");
    assert_eq!(record.group, Group::Guardian);
}

#[test]
fn csv_exports_selection_or_whole_roster() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("csv");
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), &out);
    let ids = register(&mut kiosk, &["ann", "bo", "cy"]);

    let all = kiosk.export_csv(&out).unwrap();
    assert_eq!(all.count, 3);
    let text = std::fs::read_to_string(&all.path).unwrap();
    let mut lines = text.lines();
    assert!(lines.next().unwrap().contains(CSV_HEADERS[1]));
    assert_eq!(lines.count(), 3);

    kiosk.set_selection([ids[1].clone()]);
    let picked = kiosk.export_csv(&out).unwrap();
    assert_eq!(picked.count, 1);
    let text = std::fs::read_to_string(&picked.path).unwrap();
    assert!(text.contains("\"BO\""));
    assert!(!text.contains("\"ANN\""));
}

#[test]
fn bulk_delete_needs_a_selection() {
    let dir = TempDir::new().unwrap();
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), dir.path());
    register(&mut kiosk, &["ann"]);
    assert!(matches!(
        kiosk.bulk_delete_selected(),
        Err(Error::NothingSelected)
    ));
    assert_eq!(kiosk.records().len(), 1);
}

#[test]
fn stats_report_duplicates() {
    let dir = TempDir::new().unwrap();
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), dir.path());
    register(&mut kiosk, &["ann", "bo", "Ann"]);
    let stats = kiosk.stats();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.printed, 0);
    assert_eq!(stats.duplicate_names, vec!["ANN".to_string()]);
}
