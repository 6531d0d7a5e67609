use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub identity: IdentityConfig,
    pub packs: PackApiConfig,
    pub embedder: EmbedderConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
    #[serde(default)]
    pub s3: S3Config,
}

/// Acting user identity tagged onto uploads and pack API calls.
///
/// Loaded once at startup; authentication itself is the caller's concern.
#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    /// Username sent to the embedding service with every batch.
    pub username: String,
    /// Numeric user id the pack metadata backend keys packs by.
    pub user_id: i64,
}

/// Pack metadata backend (REST collaborator).
#[derive(Debug, Deserialize, Clone)]
pub struct PackApiConfig {
    /// Base URL, e.g. `https://packs.example.com`.
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Remote embedding service endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct EmbedderConfig {
    /// Invocation URL of the embedding function.
    pub endpoint: String,
    /// Maximum records per call (the remote model's input limit).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NormalizeConfig {
    /// Column used verbatim as record text when a table carries it.
    #[serde(default = "default_text_column")]
    pub text_column: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            text_column: default_text_column(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint for S3-compatible services (MinIO, LocalStack).
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint_url: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_batch_size() -> usize {
    96
}
fn default_chunk_size() -> usize {
    1000
}
fn default_chunk_overlap() -> usize {
    200
}
fn default_text_column() -> String {
    "text".to_string()
}
fn default_region() -> String {
    "us-east-1".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate chunking
    if config.chunking.chunk_size == 0 {
        anyhow::bail!("chunking.chunk_size must be > 0");
    }
    if config.chunking.chunk_overlap >= config.chunking.chunk_size {
        anyhow::bail!("chunking.chunk_overlap must be < chunking.chunk_size");
    }

    // Validate embedder
    if config.embedder.batch_size == 0 {
        anyhow::bail!("embedder.batch_size must be > 0");
    }
    if config.embedder.endpoint.is_empty() {
        anyhow::bail!("embedder.endpoint must be set");
    }

    if config.packs.base_url.is_empty() {
        anyhow::bail!("packs.base_url must be set");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_toml() -> &'static str {
        r#"
[identity]
username = "example-user"
user_id = 2

[packs]
base_url = "http://localhost:8080"

[embedder]
endpoint = "http://localhost:9000/invoke"
"#
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = toml::from_str(base_toml()).unwrap();
        assert_eq!(config.embedder.batch_size, 96);
        assert_eq!(config.chunking.chunk_size, 1000);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert_eq!(config.normalize.text_column, "text");
        assert_eq!(config.s3.region, "us-east-1");
        assert!(config.s3.endpoint_url.is_none());
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        let toml_str = format!(
            "{}\n[chunking]\nchunk_size = 100\nchunk_overlap = 100\n",
            base_toml()
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs.toml");
        std::fs::write(&path, toml_str).unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("chunk_overlap"));
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let toml_str = base_toml().replace(
            "endpoint = \"http://localhost:9000/invoke\"",
            "endpoint = \"http://localhost:9000/invoke\"\nbatch_size = 0",
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("packs.toml");
        std::fs::write(&path, toml_str).unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }
}
