//! Best-effort remote append of freshly registered participants.
//!
//! Nothing here reports back to the kiosk: a notification either reaches the
//! endpoint or ends up as a `warn!` line in the log.

use std::thread;
use std::time::Duration;

use chrono::SecondsFormat;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::Participant;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Receives every record right after it was stored.
pub trait Notifier {
    fn notify(&self, record: &Participant);
}

/// Used when no endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, record: &Participant) {
        debug!(id = %record.id, "no notifier endpoint configured");
    }
}

/// Flattened record as the remote sheet expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotifyPayload {
    pub id: String,
    pub name: String,
    pub code: String,
    pub interest: String,
    pub score: u8,
    pub link: String,
    /// RFC 3339 UTC with milliseconds, the same format as the CSV column.
    pub timestamp: String,
}

impl From<&Participant> for NotifyPayload {
    fn from(record: &Participant) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            code: record.code(),
            interest: record.interest.clone(),
            score: record.score,
            link: record.link.clone(),
            timestamp: record
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// POSTs the payload as JSON from a detached thread.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    endpoint: String,
    timeout: Duration,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Notifier for HttpNotifier {
    fn notify(&self, record: &Participant) {
        let payload = NotifyPayload::from(record);
        let endpoint = self.endpoint.clone();
        let timeout = self.timeout;
        let spawned = thread::Builder::new()
            .name("notifier".to_string())
            .spawn(move || {
                if let Err(err) = post(&endpoint, timeout, &payload) {
                    warn!(id = %payload.id, error = %err, "remote append failed");
                }
            });
        if let Err(err) = spawned {
            warn!(error = %err, "could not start notifier thread");
        }
    }
}

fn post(endpoint: &str, timeout: Duration, payload: &NotifyPayload) -> reqwest::Result<()> {
    let http = reqwest::blocking::Client::builder()
        .user_agent(format!("badge-kiosk/{}", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    let response = http.post(endpoint).json(payload).send()?;
    debug!(id = %payload.id, status = response.status().as_u16(), "remote append sent");
    response.error_for_status()?;
    Ok(())
}

/// Build the notifier for an optional endpoint.
pub fn from_endpoint(endpoint: Option<&str>, timeout: Duration) -> Box<dyn Notifier> {
    match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
        Some(endpoint) => Box::new(HttpNotifier::new(endpoint).with_timeout(timeout)),
        None => Box::new(NullNotifier),
    }
}
