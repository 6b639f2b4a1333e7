//! Command metadata that flows through application handlers.
//!
//! Handlers accept a single `CommandMetadata` instead of loose correlation,
//! user and trace parameters, and stamp it onto every envelope they publish.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EventEnvelope, UserId};

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The caller executing this command.
    pub user_id: UserId,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,

    /// Source of this command (e.g., "api", "scheduler").
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl CommandMetadata {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            correlation_id: None,
            trace_id: None,
            source: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Copies correlation, user and trace context onto an outgoing envelope.
    ///
    /// All envelopes stamped by one metadata value share a correlation ID, even
    /// when none was supplied by the caller.
    pub fn stamp_all(&self, envelopes: Vec<EventEnvelope>) -> Vec<EventEnvelope> {
        let correlation_id = self.correlation_id();
        envelopes
            .into_iter()
            .map(|envelope| {
                let envelope = envelope
                    .with_correlation_id(correlation_id.clone())
                    .with_user_id(self.user_id.to_string());
                match &self.trace_id {
                    Some(trace_id) => envelope.with_trace_id(trace_id.clone()),
                    None => envelope,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("sponsor-user-1").unwrap()
    }

    #[test]
    fn correlation_id_is_generated_when_missing() {
        let metadata = CommandMetadata::new(user());
        assert!(!metadata.correlation_id().is_empty());
    }

    #[test]
    fn explicit_correlation_id_is_kept() {
        let metadata = CommandMetadata::new(user()).with_correlation_id("corr-7");
        assert_eq!(metadata.correlation_id(), "corr-7");
    }

    #[test]
    fn stamp_all_shares_one_generated_correlation_id() {
        let metadata = CommandMetadata::new(user())
            .with_trace_id("trace-1")
            .with_source("scheduler");
        let envelopes = vec![
            EventEnvelope::new("a.b.v1", "agg", "Agg", json!({})),
            EventEnvelope::new("a.c.v1", "agg", "Agg", json!({})),
        ];

        let stamped = metadata.stamp_all(envelopes);

        assert_eq!(stamped.len(), 2);
        assert!(stamped[0].metadata.correlation_id.is_some());
        assert_eq!(
            stamped[0].metadata.correlation_id,
            stamped[1].metadata.correlation_id
        );
        assert_eq!(stamped[1].metadata.user_id.as_deref(), Some("sponsor-user-1"));
        assert_eq!(stamped[1].metadata.trace_id.as_deref(), Some("trace-1"));
        assert_eq!(metadata.source(), Some("scheduler"));
    }
}
