//! In-memory participant roster mirrored to a persistence slot.
//!
//! Records are kept newest-first. Every mutation rewrites the whole roster to
//! the slot; there is no incremental persistence.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::Participant;

/// A named place where the serialized roster lives between runs.
pub trait PersistenceSlot {
    /// Return the stored payload, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored payload.
    fn save(&mut self, payload: &str) -> Result<()>;
}

/// Slot that only lives as long as the process. Used by tests and by the
/// headless commands that must never write.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    payload: Option<String>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing payload, e.g. to simulate a previous session.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }
}

impl PersistenceSlot for MemorySlot {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.payload.clone())
    }

    fn save(&mut self, payload: &str) -> Result<()> {
        self.payload = Some(payload.to_string());
        Ok(())
    }
}

/// Ordered participant collection. The store is the only owner of records;
/// everything else receives slices.
pub struct RecordStore {
    records: Vec<Participant>,
    slot: Box<dyn PersistenceSlot>,
}

impl RecordStore {
    /// Load the roster once. Unreadable or corrupt state means "no prior
    /// data", never a fatal error.
    pub fn open(slot: Box<dyn PersistenceSlot>) -> Self {
        let records = match slot.load() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Participant>>(&payload) {
                Ok(records) => records,
                Err(err) => {
                    warn!(error = %err, "stored roster is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read stored roster, starting empty");
                Vec::new()
            }
        };
        info!(count = records.len(), "roster loaded");
        Self { records, slot }
    }

    pub fn records(&self) -> &[Participant] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Add a record at the front. Duplicate names are allowed; callers flag
    /// them through [`RecordStore::count_by_name`].
    pub fn append(&mut self, record: Participant) -> Result<()> {
        debug!(id = %record.id, name = %record.name, "appending participant");
        self.records.insert(0, record);
        self.persist()
    }

    /// Remove every record whose id is in `ids`. Unknown ids are ignored.
    /// Returns how many records were removed.
    pub fn bulk_delete(&mut self, ids: &HashSet<String>) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|record| !ids.contains(&record.id));
        let removed = before - self.records.len();
        if removed > 0 {
            info!(removed, "deleted participants");
            self.persist()?;
        }
        Ok(removed)
    }

    /// Flag the matching records as printed. Unknown ids are ignored and
    /// already-printed records stay printed. Returns how many ids matched.
    pub fn mark_printed<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<usize> {
        let wanted: HashSet<&str> = ids.iter().map(|id| id.as_ref()).collect();
        let mut touched = 0;
        for record in self
            .records
            .iter_mut()
            .filter(|record| wanted.contains(record.id.as_str()))
        {
            record.printed = true;
            touched += 1;
        }
        if touched > 0 {
            self.persist()?;
        }
        Ok(touched)
    }

    /// Occurrences of each display name across the whole roster.
    pub fn count_by_name(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Names that appear more than once, sorted.
    pub fn duplicate_names(&self) -> Vec<String> {
        self.count_by_name()
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect()
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.records)?;
        self.slot.save(&payload)
    }
}
