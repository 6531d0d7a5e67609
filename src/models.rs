//! Core data types that flow through the upload pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single unit of text destined for embedding.
///
/// `id` is a 1-based positional tag (`vec1`, `vec2`, …) unique within one
/// normalization run; `text` is UTF-8 and non-empty for any non-empty
/// source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub text: String,
}

/// Tabular data produced by the CSV-backed sources.
///
/// Rows keep their source order; every row has one cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Raw content produced by a source, tagged once at the source boundary.
///
/// Downstream stages match on the variant instead of inspecting the data,
/// so a source decides its shape exactly once.
#[derive(Debug, Clone)]
pub enum SourceData {
    /// Ordered plain-text entries (web path, already chunked).
    TextList(Vec<String>),
    /// Ordered rows with named columns (CSV paths).
    Table(Table),
}

/// A pack as the metadata backend reports it.
///
/// Owned and persisted by the backend; the pipeline only reads the name
/// and id when tagging an upload target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub id: i64,
    #[serde(rename = "pack_name")]
    pub name: String,
    pub description: String,
    #[serde(rename = "date_created")]
    pub created_at: DateTime<Utc>,
}

/// One pending upload: a target pack plus its normalized records.
///
/// Callers own the list of jobs and hand it to the dispatcher whole;
/// there is no ambient queue state.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub pack_name: String,
    pub records: Vec<Record>,
}

/// Counters for a completed dispatch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub batches_sent: usize,
    pub records_sent: usize,
}
