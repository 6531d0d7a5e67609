//! Upload pipeline orchestration.
//!
//! Coordinates one run: source → normalization → batching → dispatch.
//! Stages run to completion sequentially; a failure at any stage is
//! terminal for the run (no retries). Records and batches live only for
//! the duration of the run; nothing intermediate is persisted.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::dispatch::EmbeddingClient;
use crate::models::UploadJob;
use crate::normalize::normalize;
use crate::packs::PackClient;
use crate::source::Source;

/// Run one upload: read the source, normalize, and dispatch into `pack`.
///
/// The pack name is resolved against the metadata backend before any
/// batch is sent, so an unknown target fails the run up front. With
/// `dry_run`, the source is read and normalized but nothing is resolved
/// or dispatched; the run only prints record and batch counts.
pub async fn run_upload(
    config: &Config,
    source: &dyn Source,
    pack: &str,
    dry_run: bool,
) -> Result<()> {
    let label = source.label();

    let data = source
        .load()
        .await
        .with_context(|| format!("reading {}", label))?;

    let records = normalize(data, &config.normalize.text_column)
        .with_context(|| format!("normalizing {}", label))?;
    let record_count = records.len();
    let batch_count = record_count.div_ceil(config.embedder.batch_size);

    if dry_run {
        println!("upload {} (dry-run)", label);
        println!("  records: {}", record_count);
        println!("  estimated batches: {}", batch_count);
        return Ok(());
    }

    let pack_client = PackClient::new(&config.packs, config.identity.user_id)?;
    let target = pack_client
        .resolve(pack)
        .await
        .with_context(|| format!("resolving upload target for {}", label))?;

    let dispatcher = EmbeddingClient::new(&config.embedder, &config.identity.username)?;
    let jobs = vec![UploadJob {
        pack_name: target.name.clone(),
        records,
    }];
    let report = dispatcher
        .upload_jobs(&jobs)
        .await
        .with_context(|| format!("uploading {} to pack '{}'", label, target.name))?;

    println!("upload {}", label);
    println!("  pack: {} (id {})", target.name, target.id);
    println!("  records: {}", record_count);
    println!("  batches dispatched: {}", report.batches_sent);
    println!("ok");

    Ok(())
}
