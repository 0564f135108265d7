//! The kiosk controller.
//!
//! `Kiosk` owns the roster, the admin selection, the document export state
//! and the notifier. Front-ends never touch those directly; every mutation
//! goes through one of the methods below so the selection and the roster
//! cannot drift apart.

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use tracing::{info, warn};

use crate::badge::{BadgeRenderer, VisualBadge};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::{
    csv_file_name, pdf_file_name, write_csv, DocumentExporter, ExportJob, ExportSource,
    ExportState, Rasterizer,
};
use crate::gate::OperatorGate;
use crate::models::{Participant, ParticipantDraft};
use crate::notifier::{self, Notifier, NullNotifier};
use crate::selection::{RosterFilter, SelectionSet};
use crate::store::RecordStore;

/// Tunables the controller needs at runtime.
#[derive(Debug, Clone)]
pub struct KioskSettings {
    pub passcode: String,
    pub batch_limit: usize,
    pub max_interest_chars: usize,
    pub event_title: String,
    pub output_dir: PathBuf,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for KioskSettings {
    fn from(config: &Config) -> Self {
        Self {
            passcode: config.admin.passcode.clone(),
            batch_limit: config.admin.batch_limit,
            max_interest_chars: config.badge.max_interest_chars,
            event_title: config.badge.event_title.clone(),
            output_dir: config.output_dir(),
        }
    }
}

/// Result of a submission. The record exists in memory even when saving it
/// failed; `save_error` tells the front-end to warn the operator.
#[derive(Debug)]
pub struct Submission {
    pub record: Participant,
    pub save_error: Option<Error>,
}

/// A file written by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub count: usize,
    /// Pages in a PDF; always 0 for CSV.
    pub pages: usize,
}

/// Headline numbers for the `stats` command and the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    pub total: usize,
    pub printed: usize,
    pub duplicate_names: Vec<String>,
}

pub struct Kiosk {
    store: RecordStore,
    selection: SelectionSet,
    exporter: DocumentExporter,
    renderer: BadgeRenderer,
    notifier: Box<dyn Notifier>,
    gate: OperatorGate,
    max_interest_chars: usize,
    output_dir: PathBuf,
}

impl Kiosk {
    pub fn new(store: RecordStore, settings: KioskSettings) -> Self {
        let renderer = BadgeRenderer::new(settings.event_title);
        Self {
            store,
            selection: SelectionSet::new(),
            exporter: DocumentExporter::new(renderer.clone(), settings.batch_limit),
            renderer,
            notifier: Box::new(NullNotifier),
            gate: OperatorGate::new(settings.passcode),
            max_interest_chars: settings.max_interest_chars,
            output_dir: settings.output_dir,
        }
    }

    /// Controller wired from a loaded configuration, including the notifier.
    pub fn from_config(store: RecordStore, config: &Config) -> Self {
        Self::new(store, KioskSettings::from(config)).with_notifier(notifier::from_endpoint(
            config.notifier.endpoint.as_deref(),
            config.notifier_timeout(),
        ))
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // --- read side ---

    pub fn records(&self) -> &[Participant] {
        self.store.records()
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.store.get(id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn name_counts(&self) -> BTreeMap<String, usize> {
        self.store.count_by_name()
    }

    pub fn filtered(&self, filter: &RosterFilter) -> Vec<&Participant> {
        filter.apply(self.store.records())
    }

    pub fn export_state(&self) -> &ExportState {
        self.exporter.state()
    }

    pub fn batch_limit(&self) -> usize {
        self.exporter.admin_limit()
    }

    pub fn max_interest_chars(&self) -> usize {
        self.max_interest_chars
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn render(&self, record: &Participant) -> VisualBadge {
        self.renderer.render(record)
    }

    pub fn stats(&self) -> RosterStats {
        RosterStats {
            total: self.store.len(),
            printed: self.store.records().iter().filter(|r| r.printed).count(),
            duplicate_names: self.store.duplicate_names(),
        }
    }

    pub fn unlock(&self, passcode: &str) -> bool {
        self.gate.unlock(passcode)
    }

    // --- registration ---

    pub fn submit(&mut self, draft: &ParticipantDraft) -> Result<Submission> {
        self.submit_at(draft, Utc::now())
    }

    /// Validate and store a draft as if submitted at `now`. Validation
    /// failures create nothing; save failures keep the record in memory.
    pub fn submit_at(&mut self, draft: &ParticipantDraft, now: DateTime<Utc>) -> Result<Submission> {
        let id = self.next_id(now);
        let record = draft.validate(id, now, self.max_interest_chars)?;
        let save_error = self.store.append(record.clone()).err();
        match &save_error {
            Some(err) => warn!(id = %record.id, error = %err, "participant kept in memory only"),
            None => info!(id = %record.id, code = %record.code(), "participant registered"),
        }
        self.notifier.notify(&record);
        Ok(Submission { record, save_error })
    }

    /// Epoch milliseconds, bumped until no stored record uses it.
    fn next_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        while self.store.contains(&millis.to_string()) {
            millis += 1;
        }
        millis.to_string()
    }

    // --- selection ---

    /// Returns whether `id` is selected afterwards.
    pub fn toggle_selected(&mut self, id: &str) -> Result<bool> {
        if !self.store.contains(id) {
            return Err(Error::UnknownRecord(id.to_string()));
        }
        Ok(self.selection.toggle(id))
    }

    /// Replace the selection. Ids not in the roster are dropped.
    pub fn set_selection<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection.set(ids);
        self.selection.retain_existing(self.store.records());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // --- roster mutations ---

    /// Delete every selected record. The deleted ids leave the selection
    /// even if saving the roster fails.
    pub fn bulk_delete_selected(&mut self) -> Result<usize> {
        if self.selection.is_empty() {
            return Err(Error::NothingSelected);
        }
        let ids: HashSet<String> = self.selection.ids().clone();
        let result = self.store.bulk_delete(&ids);
        self.selection.retain_existing(self.store.records());
        result
    }

    pub fn mark_printed<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<usize> {
        self.store.mark_printed(ids)
    }

    // --- exports ---

    /// Write a CSV of the selection (roster order), or of the whole roster
    /// when nothing is selected.
    pub fn export_csv(&self, dir: &Path) -> Result<ExportedFile> {
        let records = self.store.records();
        let candidates: Vec<&Participant> = if self.selection.is_empty() {
            records.iter().collect()
        } else {
            self.selection.pick(records)
        };

        fs::create_dir_all(dir).map_err(|source| Error::DirectoryCreate {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(csv_file_name(Local::now().date_naive()));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_csv(&mut writer, &candidates)?;
        writer.flush()?;

        info!(path = %path.display(), rows = candidates.len(), "CSV exported");
        Ok(ExportedFile {
            path,
            count: candidates.len(),
            pages: 0,
        })
    }

    /// Snapshot the candidates and enter `Generating`. Refusals mutate
    /// nothing.
    pub fn request_document_export(&mut self, source: ExportSource) -> Result<ExportJob> {
        if self.exporter.state().is_generating() {
            return Err(Error::ExportInProgress);
        }
        let candidates: Vec<Participant> = match &source {
            ExportSource::SingleResult(id) => {
                let record = self
                    .store
                    .get(id)
                    .ok_or_else(|| Error::UnknownRecord(id.clone()))?;
                vec![record.clone()]
            }
            ExportSource::AdminSelection => self
                .selection
                .pick(self.store.records())
                .into_iter()
                .cloned()
                .collect(),
        };
        self.exporter.begin(source, candidates)
    }

    /// Rasterize, compose and write the document. On success the exported
    /// records are flagged printed and the selection is cleared; on failure
    /// nothing but the export state changes.
    pub fn run_document_export(
        &mut self,
        job: &ExportJob,
        rasterizer: &mut dyn Rasterizer,
    ) -> Result<ExportedFile> {
        let document = self.exporter.generate(job, rasterizer)?;
        let file_name = pdf_file_name(Utc::now().timestamp_millis());
        let path = self.output_dir.join(&file_name);
        if let Err(err) = self.write_document(&path, &document.bytes) {
            self.exporter.fail(&err);
            return Err(err);
        }

        if let Err(err) = self.store.mark_printed(&job.ids()) {
            warn!(error = %err, "badges exported but printed flags were not saved");
        }
        self.selection.clear();
        self.exporter.complete(file_name, job.len());
        Ok(ExportedFile {
            path,
            count: job.len(),
            pages: document.pages,
        })
    }

    /// Request and run in one go, for callers without a frame to draw.
    pub fn export_document(
        &mut self,
        source: ExportSource,
        rasterizer: &mut dyn Rasterizer,
    ) -> Result<ExportedFile> {
        let job = self.request_document_export(source)?;
        self.run_document_export(&job, rasterizer)
    }

    /// Forget a finished or failed export.
    pub fn acknowledge_export(&mut self) {
        self.exporter.acknowledge();
    }

    fn write_document(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|source| Error::DirectoryCreate {
            path: self.output_dir.clone(),
            source,
        })?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
