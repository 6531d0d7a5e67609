//! Normalization of source output into embedding-ready records.
//!
//! Every source shape collapses here into one ordered `Vec<Record>` with
//! positional ids (`vec1`, `vec2`, …). Ids depend only on position, so
//! normalizing the same input twice yields the same id sequence.

use tracing::debug;

use crate::error::PipelineError;
use crate::models::{Record, SourceData, Table};

/// Convert source output into an ordered record sequence.
///
/// - Text lists map entry *i* (1-based) to `Record { id: "vec{i}", .. }`.
/// - Tables use the `text_column` cell when the table carries that column;
///   otherwise a row's text is all of its cells joined with single spaces,
///   in column order.
///
/// # Errors
///
/// Returns [`PipelineError::UnsupportedShape`] for a table without
/// columns, the only shape left that cannot become records now that
/// sources tag their output.
pub fn normalize(data: SourceData, text_column: &str) -> Result<Vec<Record>, PipelineError> {
    let records = match data {
        SourceData::TextList(texts) => texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| Record {
                id: format!("vec{}", i + 1),
                text,
            })
            .collect(),
        SourceData::Table(table) => normalize_table(table, text_column)?,
    };

    for record in &records {
        debug!(id = %record.id, bytes = record.text.len(), "normalized record");
    }

    Ok(records)
}

fn normalize_table(table: Table, text_column: &str) -> Result<Vec<Record>, PipelineError> {
    if table.columns.is_empty() {
        return Err(PipelineError::UnsupportedShape(
            "table with no columns".to_string(),
        ));
    }

    let text_idx = table.columns.iter().position(|c| c == text_column);

    let records = table
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let text = match text_idx {
                Some(idx) => row.get(idx).cloned().unwrap_or_default(),
                None => row.join(" "),
            };
            Record {
                id: format!("vec{}", i + 1),
                text,
            }
        })
        .collect();

    Ok(records)
}
