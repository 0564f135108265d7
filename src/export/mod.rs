//! Batch export of badges: CSV rosters and paginated PDF documents.
//!
//! The PDF path is a small state machine. [`DocumentExporter::begin`]
//! validates the request and moves to `Generating`; [`DocumentExporter::generate`]
//! rasterizes every candidate one after another and composes the document.
//! The caller decides what "success" mutates (printed flags, selection), so
//! this module never touches the store.

mod csv_export;
mod layout;
mod pdf;
mod raster;

use std::fmt;

use tracing::{debug, info, warn};

pub use csv_export::{csv_file_name, to_csv_string, write_csv, CSV_HEADERS};
pub use layout::{PageGrid, Placement};
pub use pdf::{compose_pdf, page_ids};
pub use raster::{
    pixel_size, Raster, RasterError, Rasterizer, ResvgRasterizer, LOGICAL_PX_PER_MM, PRINT_SCALE,
};

use crate::badge::BadgeRenderer;
use crate::error::{Error, Result};
use crate::models::Participant;

/// Default cap on badges per admin batch.
pub const DEFAULT_ADMIN_BATCH_LIMIT: usize = 4;

/// Where the candidates of a document export come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSource {
    /// The record that was just created on the kiosk. Never capped.
    SingleResult(String),
    /// Whatever the operator selected on the dashboard.
    AdminSelection,
}

/// Lifecycle of the document export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExportState {
    #[default]
    Idle,
    Generating,
    Done {
        file_name: String,
        exported: usize,
    },
    Failed(String),
}

impl ExportState {
    pub fn is_generating(&self) -> bool {
        matches!(self, ExportState::Generating)
    }
}

impl fmt::Display for ExportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportState::Idle => write!(f, "idle"),
            ExportState::Generating => write!(f, "generating"),
            ExportState::Done {
                file_name,
                exported,
            } => write!(f, "saved {exported} badge(s) to {file_name}"),
            ExportState::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Candidates captured when the export was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub source: ExportSource,
    pub candidates: Vec<Participant>,
}

impl ExportJob {
    pub fn ids(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Composed document ready to be written.
#[derive(Debug, Clone)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Drives the document export state machine.
#[derive(Debug)]
pub struct DocumentExporter {
    grid: PageGrid,
    renderer: BadgeRenderer,
    admin_limit: usize,
    state: ExportState,
}

impl DocumentExporter {
    pub fn new(renderer: BadgeRenderer, admin_limit: usize) -> Self {
        Self {
            grid: PageGrid::A4,
            renderer,
            admin_limit,
            state: ExportState::Idle,
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    pub fn admin_limit(&self) -> usize {
        self.admin_limit
    }

    /// Validate a request and enter `Generating`. Refusals leave the state
    /// untouched.
    pub fn begin(&mut self, source: ExportSource, candidates: Vec<Participant>) -> Result<ExportJob> {
        if self.state.is_generating() {
            return Err(Error::ExportInProgress);
        }
        if candidates.is_empty() {
            return Err(Error::NothingSelected);
        }
        if source == ExportSource::AdminSelection && candidates.len() > self.admin_limit {
            return Err(Error::BatchTooLarge {
                limit: self.admin_limit,
                requested: candidates.len(),
            });
        }

        info!(count = candidates.len(), ?source, "document export started");
        self.state = ExportState::Generating;
        Ok(ExportJob { source, candidates })
    }

    /// Rasterize every candidate in order and compose the document. The first
    /// failure aborts the batch and moves to `Failed`.
    pub fn generate(&mut self, job: &ExportJob, rasterizer: &mut dyn Rasterizer) -> Result<Document> {
        match self.try_generate(job, rasterizer) {
            Ok(document) => Ok(document),
            Err(err) => {
                self.fail(&err);
                Err(err)
            }
        }
    }

    fn try_generate(&self, job: &ExportJob, rasterizer: &mut dyn Rasterizer) -> Result<Document> {
        if !self.state.is_generating() {
            warn!(state = %self.state, "generate called outside of an export");
        }
        let mut placed = Vec::with_capacity(job.len());
        for (index, record) in job.candidates.iter().enumerate() {
            let badge = self.renderer.render(record);
            let raster = rasterizer
                .rasterize(&badge)
                .map_err(|err| Error::raster(record.id.clone(), err.to_string()))?;
            debug!(id = %record.id, index, width = raster.width, height = raster.height, "badge rasterized");
            placed.push((self.grid.place(index), raster));
        }
        let bytes = compose_pdf(&self.grid, &placed)?;
        Ok(Document {
            bytes,
            pages: self.grid.page_count(job.len()),
        })
    }

    pub fn complete(&mut self, file_name: impl Into<String>, exported: usize) {
        let file_name = file_name.into();
        info!(%file_name, exported, "document export finished");
        self.state = ExportState::Done {
            file_name,
            exported,
        };
    }

    pub fn fail(&mut self, err: &Error) {
        warn!(error = %err, "document export failed");
        self.state = ExportState::Failed(err.to_string());
    }

    /// Return to `Idle` once the outcome has been shown.
    pub fn acknowledge(&mut self) {
        if !self.state.is_generating() {
            self.state = ExportState::Idle;
        }
    }
}

/// `badges_<epoch-millis>.pdf`
pub fn pdf_file_name(timestamp_millis: i64) -> String {
    format!("badges_{timestamp_millis}.pdf")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::badge::VisualBadge;
    use crate::classifier::classify;
    use crate::models::AxisSelection;

    struct Flat;

    impl Rasterizer for Flat {
        fn rasterize(&mut self, _badge: &VisualBadge) -> std::result::Result<Raster, RasterError> {
            Ok(Raster {
                width: 1,
                height: 1,
                rgb: vec![0, 0, 0],
            })
        }
    }

    fn participant(id: &str) -> Participant {
        let selection = AxisSelection::from_code("ISFJ").unwrap();
        Participant {
            id: id.to_string(),
            name: "KIM".to_string(),
            selection,
            group: classify(&selection),
            interest: "tea".to_string(),
            score: 1,
            link: String::new(),
            created_at: Utc::now(),
            printed: false,
        }
    }

    fn exporter() -> DocumentExporter {
        DocumentExporter::new(BadgeRenderer::default(), DEFAULT_ADMIN_BATCH_LIMIT)
    }

    #[test]
    fn begin_rejects_reentry() {
        let mut exporter = exporter();
        exporter
            .begin(ExportSource::AdminSelection, vec![participant("1")])
            .unwrap();
        let err = exporter
            .begin(ExportSource::AdminSelection, vec![participant("2")])
            .unwrap_err();
        assert!(matches!(err, Error::ExportInProgress));
        assert!(exporter.state().is_generating());
    }

    #[test]
    fn admin_batch_is_capped_but_single_result_is_not() {
        let mut exporter = exporter();
        let five: Vec<_> = (0..5).map(|i| participant(&i.to_string())).collect();
        let err = exporter
            .begin(ExportSource::AdminSelection, five.clone())
            .unwrap_err();
        assert!(matches!(err, Error::BatchTooLarge { limit: 4, requested: 5 }));
        assert_eq!(exporter.state(), &ExportState::Idle);

        let job = exporter
            .begin(ExportSource::SingleResult("0".to_string()), five)
            .unwrap();
        let document = exporter.generate(&job, &mut Flat).unwrap();
        assert_eq!(document.pages, 2);
    }

    #[test]
    fn empty_request_is_refused() {
        let mut exporter = exporter();
        assert!(matches!(
            exporter.begin(ExportSource::AdminSelection, Vec::new()),
            Err(Error::NothingSelected)
        ));
    }

    #[test]
    fn acknowledge_returns_to_idle() {
        let mut exporter = exporter();
        let job = exporter
            .begin(ExportSource::AdminSelection, vec![participant("1")])
            .unwrap();
        exporter.generate(&job, &mut Flat).unwrap();
        exporter.complete("badges_1.pdf", 1);
        assert_eq!(exporter.state().to_string(), "saved 1 badge(s) to badges_1.pdf");
        exporter.acknowledge();
        assert_eq!(exporter.state(), &ExportState::Idle);
    }

    #[test]
    fn pdf_name_has_timestamp() {
        assert_eq!(pdf_file_name(1_700_000_000_000), "badges_1700000000000.pdf");
    }
}
