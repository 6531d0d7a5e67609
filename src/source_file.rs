//! Local CSV source.
//!
//! Parses a previously saved CSV file into a [`Table`]: the header row
//! becomes the column names, every following row becomes one row of
//! cells, in file order.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::models::{SourceData, Table};
use crate::source::Source;

/// Source backed by a CSV file on the local filesystem.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Source for FileSource {
    fn label(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn load(&self) -> Result<SourceData, PipelineError> {
        let table = read_table(&self.path, &self.label())?;
        Ok(SourceData::Table(table))
    }
}

/// Parse the CSV at `path` into a [`Table`].
///
/// `input` names the source in errors (a path for local files, an
/// `s3://` URL for downloaded objects).
///
/// # Errors
///
/// [`PipelineError::Parse`] when the file cannot be read or any row is
/// malformed (including rows whose field count disagrees with the
/// header).
pub(crate) fn read_table(path: &Path, input: &str) -> Result<Table, PipelineError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| PipelineError::parse(input, e))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::parse(input, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| PipelineError::parse(input, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { columns, rows })
}
