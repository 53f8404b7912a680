//! Delivery targets for result events.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

use super::event::ResultEvent;

/// Why a result event could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("cannot encode result event: {0}")]
    Encode(String),

    #[error("channel {channel} unavailable: {detail}")]
    Unavailable { channel: String, detail: String },
}

/// An external channel that accepts result events.
///
/// Delivery is fire-and-forget from the engine's side: a failure is logged
/// and never fails the calling operation.
pub trait ResultSink: Send + Sync {
    fn publish(&self, channel: &str, event: &ResultEvent) -> Result<(), PublishError>;
}

impl<T: ResultSink + ?Sized> ResultSink for Arc<T> {
    fn publish(&self, channel: &str, event: &ResultEvent) -> Result<(), PublishError> {
        (**self).publish(channel, event)
    }
}

/// Writes each event's JSON payload to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn publish(&self, channel: &str, event: &ResultEvent) -> Result<(), PublishError> {
        let payload = event
            .to_json()
            .map_err(|err| PublishError::Encode(err.to_string()))?;
        info!(channel, %payload, "Result event");
        Ok(())
    }
}

/// Keeps every published event in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, ResultEvent)>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(channel, event)` published so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<(String, ResultEvent)> {
        self.events.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl ResultSink for RecordingSink {
    fn publish(&self, channel: &str, event: &ResultEvent) -> Result<(), PublishError> {
        self.events.lock().push((channel.to_string(), event.clone()));
        Ok(())
    }
}
