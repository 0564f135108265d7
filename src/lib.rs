//! Core library surface for the badge kiosk.
//!
//! The `bin` target drives the terminal front-end; the headless commands and
//! the integration tests use the same controller through these re-exports.
pub mod badge;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod gate;
pub mod kiosk;
pub mod logging;
pub mod models;
pub mod notifier;
pub mod selection;
pub mod store;
pub mod ui;

pub use classifier::classify;
pub use config::Config;
pub use error::{Error, Result};

/// The controller every front-end talks to.
pub use kiosk::{ExportedFile, Kiosk, KioskSettings, Submission};

pub use models::{AxisSelection, Group, Participant, ParticipantDraft};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
