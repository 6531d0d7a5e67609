//! # Pack Harness
//!
//! A batching ingestion pipeline for uploading pack-organized content to
//! a remote embedding service.
//!
//! Pack Harness reads content from one of three sources (web page, local
//! CSV file, S3 object), normalizes it into a uniform sequence of
//! `(id, text)` records, partitions the records into bounded batches,
//! and dispatches the batches sequentially to a remote embedding
//! service. Pack metadata (names, descriptions) lives in a separate REST
//! backend that this crate only consumes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌────────────┐   ┌─────────┐   ┌────────────┐
//! │  Sources     │──▶│ Normalizer │──▶│ Batcher │──▶│ Dispatcher │
//! │ Web/CSV/S3  │   │ (id, text) │   │  ≤ 96    │   │ sequential │
//! └─────────────┘   └────────────┘   └─────────┘   └─────┬──────┘
//!        │                                               ▼
//!   web path only:                               ┌──────────────┐
//!   overlap chunker                              │  Embedding    │
//!                                                │  service      │
//!                                                └──────────────┘
//! ```
//!
//! Runs are strictly sequential: one stage at a time, one batch in
//! flight, no retries. A rejected batch aborts the run; batches the
//! service already accepted are not rolled back.
//!
//! ## Quick Start
//!
//! ```bash
//! packs pack create articles --description "news articles"
//! packs upload web https://example.com/story --pack articles
//! packs upload file ./customers.csv --pack customers
//! packs upload s3 demo-bucket customers.csv --pack customers
//! packs pack delete articles
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`source`] | Source trait (reader seam) |
//! | [`source_web`] | Web-page source |
//! | [`source_file`] | Local CSV source |
//! | [`source_s3`] | S3 object source |
//! | [`chunk`] | Overlapping text chunker |
//! | [`normalize`] | Record normalization |
//! | [`batch`] | Record batching |
//! | [`dispatch`] | Batch dispatch to the embedding service |
//! | [`packs`] | Pack metadata backend client |
//! | [`ingest`] | Upload run orchestration |

pub mod batch;
pub mod chunk;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod pack_cmd;
pub mod packs;
pub mod source;
pub mod source_file;
pub mod source_s3;
pub mod source_web;
