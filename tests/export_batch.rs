mod common;

use badge_kiosk::export::{page_ids, ExportSource, ExportState};
use badge_kiosk::Error;
use tempfile::TempDir;

use common::{files_in, kiosk_at, register, CountingRasterizer};

#[test]
fn admin_batch_marks_printed_and_clears_selection() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), &out);
    let ids = register(&mut kiosk, &["ann", "bo", "cy"]);
    kiosk.set_selection([ids[0].clone(), ids[2].clone()]);

    let mut rasterizer = CountingRasterizer::default();
    let file = kiosk
        .export_document(ExportSource::AdminSelection, &mut rasterizer)
        .unwrap();

    assert_eq!(rasterizer.calls, 2);
    assert_eq!((file.count, file.pages), (2, 1));
    let bytes = std::fs::read(&file.path).unwrap();
    assert_eq!(page_ids(&bytes).unwrap().len(), 1);

    assert!(kiosk.selection().is_empty());
    assert!(kiosk.get(&ids[0]).unwrap().printed);
    assert!(!kiosk.get(&ids[1]).unwrap().printed);
    assert!(kiosk.get(&ids[2]).unwrap().printed);
    assert!(matches!(
        kiosk.export_state(),
        ExportState::Done { exported: 2, .. }
    ));
}

#[test]
fn oversized_selection_is_refused_before_rasterizing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), &out);
    let ids = register(&mut kiosk, &["a", "b", "c", "d", "e"]);
    kiosk.set_selection(ids.clone());

    let mut rasterizer = CountingRasterizer::default();
    let err = kiosk
        .export_document(ExportSource::AdminSelection, &mut rasterizer)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::BatchTooLarge {
            limit: 4,
            requested: 5
        }
    ));
    assert_eq!(rasterizer.calls, 0);
    assert_eq!(kiosk.selection().len(), 5);
    assert_eq!(kiosk.export_state(), &ExportState::Idle);
    assert!(files_in(&out).is_empty());
}

#[test]
fn single_result_is_not_capped_by_the_batch_limit() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), &out);
    let ids = register(&mut kiosk, &["a", "b", "c", "d", "e"]);
    kiosk.set_selection(ids.clone());

    let mut rasterizer = CountingRasterizer::default();
    let file = kiosk
        .export_document(ExportSource::SingleResult(ids[4].clone()), &mut rasterizer)
        .unwrap();

    assert_eq!(file.count, 1);
    assert!(kiosk.get(&ids[4]).unwrap().printed);
    assert!(!kiosk.get(&ids[0]).unwrap().printed);
}

#[test]
fn failing_rasterizer_leaves_roster_untouched() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), &out);
    let ids = register(&mut kiosk, &["ann", "bo", "cy"]);
    kiosk.set_selection(ids.clone());

    let mut rasterizer = CountingRasterizer::failing_on(1);
    let err = kiosk
        .export_document(ExportSource::AdminSelection, &mut rasterizer)
        .unwrap_err();

    assert!(matches!(err, Error::Raster { .. }));
    assert_eq!(rasterizer.calls, 2);
    assert!(kiosk.records().iter().all(|r| !r.printed));
    assert_eq!(kiosk.selection().len(), 3);
    assert!(matches!(kiosk.export_state(), ExportState::Failed(_)));
    assert!(files_in(&out).is_empty());

    kiosk.acknowledge_export();
    assert_eq!(kiosk.export_state(), &ExportState::Idle);
}

#[test]
fn second_request_while_generating_is_refused() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), &out);
    let ids = register(&mut kiosk, &["ann"]);
    kiosk.set_selection(ids.clone());

    let job = kiosk
        .request_document_export(ExportSource::AdminSelection)
        .unwrap();
    assert!(kiosk.export_state().is_generating());
    assert!(matches!(
        kiosk.request_document_export(ExportSource::SingleResult(ids[0].clone())),
        Err(Error::ExportInProgress)
    ));

    let mut rasterizer = CountingRasterizer::default();
    kiosk.run_document_export(&job, &mut rasterizer).unwrap();
    assert_eq!(rasterizer.calls, 1);
}

#[test]
fn empty_selection_is_refused() {
    let dir = TempDir::new().unwrap();
    let mut kiosk = kiosk_at(&dir.path().join("kiosk.db"), dir.path());
    register(&mut kiosk, &["ann"]);

    let mut rasterizer = CountingRasterizer::default();
    assert!(matches!(
        kiosk.export_document(ExportSource::AdminSelection, &mut rasterizer),
        Err(Error::NothingSelected)
    ));
    assert_eq!(rasterizer.calls, 0);
}
