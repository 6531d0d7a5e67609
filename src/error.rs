//! Pipeline error kinds.
//!
//! Every failure a pipeline run can hit maps onto one of these variants.
//! None of them are retried internally; the caller receives a single
//! terminal outcome per run (see [`crate::ingest`]).

use thiserror::Error;

/// Terminal error for a single pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Network or HTTP failure while fetching a web page.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Malformed tabular input (unreadable file or invalid CSV).
    #[error("failed to parse {input}: {reason}")]
    Parse { input: String, reason: String },

    /// Remote object missing or credentials rejected. Both cases are
    /// collapsed into one kind at this boundary.
    #[error("object unavailable at {location}: {reason}")]
    NotFound { location: String, reason: String },

    /// The normalizer received an input shape it cannot turn into records.
    #[error("unsupported source shape: {0}")]
    UnsupportedShape(String),

    /// The embedding service rejected a batch or was unreachable.
    /// Batches before `batch` remain committed on the remote side.
    #[error("dispatch failed at batch {batch}: {reason}")]
    Dispatch { batch: usize, reason: String },
}

impl PipelineError {
    pub(crate) fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(input: impl Into<String>, reason: impl ToString) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::NotFound {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}
