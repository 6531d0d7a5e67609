//! # Pack Harness CLI (`packs`)
//!
//! The `packs` binary is the interface to the upload pipeline. It
//! provides commands for managing packs (via the metadata backend) and
//! for uploading data sources into a pack (via the embedding service).
//!
//! ## Usage
//!
//! ```bash
//! packs --config ./config/packs.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `packs pack list` | List the acting user's packs |
//! | `packs pack create <name>` | Create a pack in the metadata backend |
//! | `packs pack delete <name>` | Delete a pack and its indexed records |
//! | `packs upload web <url>` | Fetch a page, chunk it, upload |
//! | `packs upload file <path>` | Upload a local CSV file |
//! | `packs upload s3 <bucket> <key>` | Upload a CSV object from S3 |
//!
//! ## Examples
//!
//! ```bash
//! # Create a pack, then fill it from a web page
//! packs pack create articles --description "news articles"
//! packs upload web https://example.com/story --pack articles
//!
//! # Preview a CSV upload without dispatching anything
//! packs upload file ./customers.csv --pack customers --dry-run
//! ```

mod batch;
mod chunk;
mod config;
mod dispatch;
mod error;
mod ingest;
mod models;
mod normalize;
mod pack_cmd;
mod packs;
mod source;
mod source_file;
mod source_s3;
mod source_web;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::source_file::FileSource;
use crate::source_s3::S3Source;
use crate::source_web::WebSource;

/// Pack Harness CLI — a batching ingestion pipeline for pack-organized
/// uploads to a remote embedding service.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/packs.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "packs",
    about = "Pack Harness — batch-upload content sources into named packs for embedding",
    version,
    long_about = "Pack Harness reads content from a web page, a local CSV file, or an S3 \
    object, normalizes it into (id, text) records, and uploads it in bounded batches to a \
    remote embedding service under a named pack. Pack metadata is managed through a \
    separate REST backend."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/packs.toml`. Identity, backend, embedding
    /// service, chunking, and S3 settings are read from this file.
    #[arg(long, global = true, default_value = "./config/packs.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Manage packs in the metadata backend.
    Pack {
        #[command(subcommand)]
        action: PackAction,
    },

    /// Upload a data source into a pack.
    ///
    /// Reads the source, normalizes it into records, and dispatches the
    /// records in batches to the embedding service. The target pack must
    /// already exist.
    Upload {
        #[command(subcommand)]
        source: UploadSource,
    },
}

/// Pack management subcommands.
#[derive(Subcommand)]
enum PackAction {
    /// List the acting user's packs.
    List,

    /// Create a new pack.
    Create {
        /// Pack name (referenced by `upload --pack`).
        name: String,

        /// Human-readable description.
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete a pack: its metadata and its records in the remote index.
    Delete {
        /// Name of the pack to delete.
        name: String,
    },
}

/// Upload source subcommands.
#[derive(Subcommand)]
enum UploadSource {
    /// Fetch a web page, split it into overlapping chunks, and upload.
    Web {
        /// Page URL.
        url: String,

        /// Target pack name.
        #[arg(long)]
        pack: String,

        /// Show record and batch counts without dispatching.
        #[arg(long)]
        dry_run: bool,
    },

    /// Upload a local CSV file (one record per row).
    File {
        /// Path to the CSV file.
        path: PathBuf,

        /// Target pack name.
        #[arg(long)]
        pack: String,

        /// Show record and batch counts without dispatching.
        #[arg(long)]
        dry_run: bool,
    },

    /// Download a CSV object from S3 and upload it (one record per row).
    ///
    /// Credentials come from AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY
    /// (and optionally AWS_SESSION_TOKEN) in the environment or a `.env`
    /// file.
    S3 {
        /// Bucket name.
        bucket: String,

        /// Object key.
        key: String,

        /// Target pack name.
        #[arg(long)]
        pack: String,

        /// Show record and batch counts without dispatching.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Pack { action } => match action {
            PackAction::List => {
                pack_cmd::run_list(&cfg).await?;
            }
            PackAction::Create { name, description } => {
                pack_cmd::run_create(&cfg, &name, &description).await?;
            }
            PackAction::Delete { name } => {
                pack_cmd::run_delete(&cfg, &name).await?;
            }
        },
        Commands::Upload { source } => match source {
            UploadSource::Web { url, pack, dry_run } => {
                let source = WebSource::new(url, cfg.chunking.clone());
                ingest::run_upload(&cfg, &source, &pack, dry_run).await?;
            }
            UploadSource::File {
                path,
                pack,
                dry_run,
            } => {
                let source = FileSource::new(path);
                ingest::run_upload(&cfg, &source, &pack, dry_run).await?;
            }
            UploadSource::S3 {
                bucket,
                key,
                pack,
                dry_run,
            } => {
                let source = S3Source::new(bucket, key, cfg.s3.clone());
                ingest::run_upload(&cfg, &source, &pack, dry_run).await?;
            }
        },
    }

    Ok(())
}
