//! Sequential batch dispatch to the remote embedding service.
//!
//! Batches are sent strictly one at a time, in order. A response carrying
//! an `errorMessage` field (or a transport failure) aborts the run at
//! that batch: later batches are never sent, and batches the service
//! already accepted are NOT rolled back. A failed run is therefore
//! partially committed on the remote side; callers must treat it that
//! way. There is no compensation path in the service contract.

use std::time::Duration;

use serde_json::Value;
use tracing::{error, info};

use crate::batch::into_batches;
use crate::config::EmbedderConfig;
use crate::error::PipelineError;
use crate::models::{DispatchReport, Record, UploadJob};

/// Outcome of one batch call, parsed from the service response.
#[derive(Debug, Clone, PartialEq, Eq)]
enum BatchOutcome {
    Accepted,
    Rejected(String),
}

/// Client for the remote embedding service.
///
/// Holds the invocation endpoint, the acting identity tagged onto every
/// request, and the batch size limit. Construct once per run from
/// configuration; the configuration is immutable after startup.
pub struct EmbeddingClient {
    client: reqwest::Client,
    endpoint: String,
    identity: String,
    batch_size: usize,
}

impl EmbeddingClient {
    pub fn new(config: &EmbedderConfig, identity: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            identity: identity.to_string(),
            batch_size: config.batch_size,
        })
    }

    /// Upload a caller-owned list of jobs, each a (pack, records) pair.
    ///
    /// Each job's records are partitioned into batches of at most the
    /// configured size and sent in order, one call in flight at a time.
    /// Jobs with no records produce no calls.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Dispatch`] at the first rejected batch or
    /// transport failure, carrying the 1-based batch index within the
    /// failing job. No retries; prior accepted batches stay committed.
    pub async fn upload_jobs(&self, jobs: &[UploadJob]) -> Result<DispatchReport, PipelineError> {
        let mut report = DispatchReport::default();

        for job in jobs {
            let batches = into_batches(job.records.clone(), self.batch_size);
            info!(
                pack = %job.pack_name,
                records = job.records.len(),
                batches = batches.len(),
                "dispatching upload job"
            );

            for (i, batch) in batches.iter().enumerate() {
                let batch_no = i + 1;
                match self.send_batch(&job.pack_name, batch_no, batch).await? {
                    BatchOutcome::Accepted => {
                        report.batches_sent += 1;
                        report.records_sent += batch.len();
                    }
                    BatchOutcome::Rejected(reason) => {
                        error!(
                            pack = %job.pack_name,
                            batch = batch_no,
                            reason = %reason,
                            "batch rejected; aborting run"
                        );
                        return Err(PipelineError::Dispatch {
                            batch: batch_no,
                            reason,
                        });
                    }
                }
            }
        }

        Ok(report)
    }

    /// Tell the service to drop a pack's records from the remote index.
    pub async fn delete_pack(&self, pack_name: &str) -> anyhow::Result<()> {
        let payload = serde_json::json!({
            "body": {
                "action": "delete_pack",
                "identity": self.identity,
                "pack_name": pack_name,
            }
        });

        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        info!(pack = %pack_name, response = %body, "delete_pack response");

        if !status.is_success() {
            anyhow::bail!("embedding service delete_pack failed (HTTP {})", status);
        }
        if let Some(message) = error_message(&body) {
            anyhow::bail!("embedding service delete_pack failed: {}", message);
        }
        Ok(())
    }

    async fn send_batch(
        &self,
        pack_name: &str,
        batch_no: usize,
        batch: &[Record],
    ) -> Result<BatchOutcome, PipelineError> {
        info!(batch = batch_no, records = batch.len(), "uploading batch");

        let payload = serde_json::json!({
            "body": {
                "action": "create_pack",
                "identity": self.identity,
                "pack_name": pack_name,
                "data": batch,
            }
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PipelineError::Dispatch {
                batch: batch_no,
                reason: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::Dispatch {
                batch: batch_no,
                reason: e.to_string(),
            })?;

        info!(batch = batch_no, response = %body, "embedding service response");

        if !status.is_success() {
            return Ok(BatchOutcome::Rejected(format!("HTTP {}", status)));
        }
        if let Some(message) = error_message(&body) {
            return Ok(BatchOutcome::Rejected(message));
        }
        Ok(BatchOutcome::Accepted)
    }
}

/// Extract the service's error signal, if the response body carries one.
///
/// Presence of an `errorMessage` field marks a rejected batch; any other
/// body (including non-JSON) is acceptance.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("errorMessage")? {
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
