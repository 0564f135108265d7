//! Admin-side selection of export candidates and roster filtering.

use std::collections::HashSet;

use crate::models::Participant;

/// Identities currently chosen for export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`. Returns `true` when the id is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Replace the whole selection.
    pub fn set<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.ids
    }

    /// Drop ids that no longer exist in `records`.
    pub fn retain_existing(&mut self, records: &[Participant]) {
        let existing: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        self.ids.retain(|id| existing.contains(id.as_str()));
    }

    /// Selected records in roster order. The roster order, not the order of
    /// clicks, decides badge placement on the page.
    pub fn pick<'a>(&self, records: &'a [Participant]) -> Vec<&'a Participant> {
        records
            .iter()
            .filter(|record| self.ids.contains(&record.id))
            .collect()
    }
}

/// Roster filter used by the admin dashboard. The query matches name,
/// interest, the four-letter code and the group code, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub query: Option<String>,
    pub unprinted_only: bool,
}

impl RosterFilter {
    pub fn matches(&self, record: &Participant) -> bool {
        if self.unprinted_only && record.printed {
            return false;
        }
        let Some(query) = &self.query else {
            return true;
        };
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        record.name.to_lowercase().contains(&needle)
            || record.interest.to_lowercase().contains(&needle)
            || record.code().to_lowercase().contains(&needle)
            || record.group.code().to_lowercase() == needle
    }

    pub fn apply<'a>(&self, records: &'a [Participant]) -> Vec<&'a Participant> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    pub fn is_active(&self) -> bool {
        self.unprinted_only
            || self
                .query
                .as_deref()
                .is_some_and(|q| !q.trim().is_empty())
    }
}
