//! Web-page source.
//!
//! Fetches a page over HTTP, extracts its readable text from the HTML,
//! and splits the result into overlapping chunks (see [`crate::chunk`]).
//! This is the only path that chunks: CSV-backed sources already arrive
//! row-shaped.

use async_trait::async_trait;
use scraper::Html;

use crate::chunk::split_text;
use crate::config::ChunkingConfig;
use crate::error::PipelineError;
use crate::models::SourceData;
use crate::source::Source;

/// Elements whose text is never page content.
const SKIP_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Source backed by a remote web page.
pub struct WebSource {
    url: String,
    chunking: ChunkingConfig,
}

impl WebSource {
    pub fn new(url: String, chunking: ChunkingConfig) -> Self {
        Self { url, chunking }
    }
}

#[async_trait]
impl Source for WebSource {
    fn label(&self) -> String {
        format!("web:{}", self.url)
    }

    async fn load(&self) -> Result<SourceData, PipelineError> {
        let response = reqwest::Client::new()
            .get(&self.url)
            .send()
            .await
            .map_err(|e| PipelineError::fetch(&self.url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::fetch(
                &self.url,
                format!("HTTP {}", status),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::fetch(&self.url, e))?;

        let text = extract_text(&body);
        let chunks = split_text(&text, self.chunking.chunk_size, self.chunking.chunk_overlap);
        Ok(SourceData::TextList(chunks))
    }
}

/// Extract readable text from an HTML document.
///
/// Collects every text node outside script/style-like elements and
/// collapses runs of whitespace to single spaces.
fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<&str> = Vec::new();
    for node in document.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let skipped = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| SKIP_ELEMENTS.contains(&el.name()))
                .unwrap_or(false)
        });
        if !skipped {
            parts.push(text);
        }
    }

    parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Doc</title><style>p { color: red; }</style></head>
<body>
    <h1>Heading</h1>
    <p>First paragraph   with
    uneven spacing.</p>
    <script>var hidden = "not content";</script>
    <p>Second paragraph.</p>
</body>
</html>"#;

    #[test]
    fn test_extract_text_skips_script_and_style() {
        let text = extract_text(PAGE);
        assert!(text.contains("Heading"));
        assert!(text.contains("First paragraph with uneven spacing."));
        assert!(text.contains("Second paragraph."));
        assert!(!text.contains("not content"));
        assert!(!text.contains("color: red"));
    }

    #[tokio::test]
    async fn test_load_fetches_and_chunks() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200)
                    .header("content-type", "text/html")
                    .body(PAGE);
            })
            .await;

        let source = WebSource::new(
            server.url("/page"),
            ChunkingConfig {
                chunk_size: 30,
                chunk_overlap: 5,
            },
        );
        let data = source.load().await.unwrap();
        mock.assert_async().await;

        let SourceData::TextList(chunks) = data else {
            panic!("expected text list");
        };
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 30);
        }
    }

    #[tokio::test]
    async fn test_http_error_is_fetch_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let source = WebSource::new(server.url("/missing"), ChunkingConfig::default());
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, PipelineError::Fetch { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_empty_page_yields_no_chunks() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/empty");
                then.status(200).body("<html><body></body></html>");
            })
            .await;

        let source = WebSource::new(server.url("/empty"), ChunkingConfig::default());
        let SourceData::TextList(chunks) = source.load().await.unwrap() else {
            panic!("expected text list");
        };
        assert!(chunks.is_empty());
    }
}
