#![allow(dead_code)]

use std::path::Path;

use badge_kiosk::badge::VisualBadge;
use badge_kiosk::db::{open_database, SqliteSlot};
use badge_kiosk::export::{Raster, RasterError, Rasterizer};
use badge_kiosk::store::RecordStore;
use badge_kiosk::{AxisSelection, Kiosk, KioskSettings, ParticipantDraft};

/// Kiosk over an on-disk roster at `db`, writing documents to `out`.
pub fn kiosk_at(db: &Path, out: &Path) -> Kiosk {
    let conn = open_database(db).unwrap();
    let store = RecordStore::open(Box::new(SqliteSlot::participants(conn)));
    let settings = KioskSettings {
        output_dir: out.to_path_buf(),
        ..KioskSettings::default()
    };
    Kiosk::new(store, settings)
}

pub fn draft(name: &str, code: &str) -> ParticipantDraft {
    ParticipantDraft {
        name: name.to_string(),
        selection: AxisSelection::from_code(code).unwrap(),
        interest: "hiking".to_string(),
        score: Some(3),
        link: String::new(),
    }
}

/// Register `names` in order and return their ids, oldest first.
pub fn register(kiosk: &mut Kiosk, names: &[&str]) -> Vec<String> {
    names
        .iter()
        .map(|name| kiosk.submit(&draft(name, "ENFP")).unwrap().record.id)
        .collect()
}

/// Plain white tile, counting every call. Fails on call number `fail_on`
/// (zero-based) when set.
#[derive(Debug, Default)]
pub struct CountingRasterizer {
    pub calls: usize,
    pub fail_on: Option<usize>,
}

impl CountingRasterizer {
    pub fn failing_on(call: usize) -> Self {
        Self {
            calls: 0,
            fail_on: Some(call),
        }
    }
}

impl Rasterizer for CountingRasterizer {
    fn rasterize(&mut self, _badge: &VisualBadge) -> Result<Raster, RasterError> {
        let call = self.calls;
        self.calls += 1;
        if self.fail_on == Some(call) {
            return Err(RasterError("canvas lost".to_string()));
        }
        Ok(Raster {
            width: 4,
            height: 5,
            rgb: vec![255; 4 * 5 * 3],
        })
    }
}

pub fn files_in(dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
