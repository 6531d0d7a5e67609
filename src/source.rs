//! The source-reader seam.
//!
//! Each data source (web page, local CSV, S3 object) implements
//! [`Source`], producing a shape-tagged [`SourceData`] that the rest of
//! the pipeline consumes without inspecting raw content. A source decides
//! its output shape exactly once, at this boundary.

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::models::SourceData;

/// A data source that produces content for one upload run.
///
/// # Lifecycle
///
/// 1. The CLI builds a source from its arguments.
/// 2. [`load`](Source::load) is called once per pipeline run.
/// 3. The returned [`SourceData`] flows through normalization, batching,
///    and dispatch; nothing is persisted between runs.
#[async_trait]
pub trait Source: Send + Sync {
    /// Identifier used in logs and summaries (e.g. `web:<url>`,
    /// `s3://bucket/key`).
    fn label(&self) -> String;

    /// Fetch the raw content and tag its shape.
    ///
    /// May perform network or filesystem I/O. Any transient local state
    /// (download staging) must be cleaned up before returning, on every
    /// exit path.
    async fn load(&self) -> Result<SourceData, PipelineError>;
}
