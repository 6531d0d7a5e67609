//! Pack metadata backend client.
//!
//! The backend owns pack records (name, description, creation date); this
//! client only consumes its REST surface:
//!
//! | Operation | Route |
//! |-----------|-------|
//! | list | `GET {base}/users/{user_id}/packs` |
//! | create | `POST {base}/users/{user_id}/packs` |
//! | delete | `DELETE {base}/users/{user_id}/packs/{pack_id}` |
//!
//! The list response is an envelope, `{"packs": [...]}`, with the wire
//! field names `pack_name`, `description`, `date_created`, `id`.
//! The pipeline uses this client for one thing before dispatch: resolving
//! an upload's target pack name to a known pack.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::config::PackApiConfig;
use crate::models::Pack;

#[derive(Debug, Deserialize)]
struct PackList {
    packs: Vec<Pack>,
}

/// REST client for the pack metadata backend.
pub struct PackClient {
    client: reqwest::Client,
    base_url: String,
    user_id: i64,
}

impl PackClient {
    pub fn new(config: &PackApiConfig, user_id: i64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_id,
        })
    }

    fn packs_url(&self) -> String {
        format!("{}/users/{}/packs", self.base_url, self.user_id)
    }

    /// Fetch the acting user's packs.
    pub async fn list_packs(&self) -> Result<Vec<Pack>> {
        let response = self
            .client
            .get(self.packs_url())
            .send()
            .await
            .context("pack API unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("pack API list failed (HTTP {})", status);
        }

        let list: PackList = response
            .json()
            .await
            .context("invalid pack list response")?;
        Ok(list.packs)
    }

    /// Create a pack and return it as the backend stored it.
    pub async fn create_pack(&self, name: &str, description: &str) -> Result<Pack> {
        let response = self
            .client
            .post(self.packs_url())
            .json(&serde_json::json!({
                "pack_name": name,
                "description": description,
            }))
            .send()
            .await
            .context("pack API unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("pack API create failed (HTTP {})", status);
        }

        response.json().await.context("invalid pack response")
    }

    /// Delete a pack's metadata by id.
    pub async fn delete_pack(&self, pack_id: i64) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/{}", self.packs_url(), pack_id))
            .send()
            .await
            .context("pack API unreachable")?;

        let status = response.status();
        if !status.is_success() {
            bail!("pack API delete failed (HTTP {})", status);
        }
        Ok(())
    }

    /// Resolve a pack name to the backend's record for it.
    pub async fn resolve(&self, name: &str) -> Result<Pack> {
        let packs = self.list_packs().await?;
        packs
            .into_iter()
            .find(|pack| pack.name == name)
            .with_context(|| format!("unknown pack '{}'; create it first", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> PackClient {
        PackClient::new(
            &PackApiConfig {
                base_url: server.base_url(),
                timeout_secs: 5,
            },
            2,
        )
        .unwrap()
    }

    fn pack_json(id: i64, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "pack_name": name,
            "description": format!("{} description", name),
            "date_created": "2024-05-01T12:00:00Z",
        })
    }

    #[tokio::test]
    async fn test_list_unwraps_envelope() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/2/packs");
                then.status(200).json_body(serde_json::json!({
                    "packs": [pack_json(1, "articles"), pack_json(2, "customers")],
                }));
            })
            .await;

        let packs = client_for(&server).list_packs().await.unwrap();
        assert_eq!(packs.len(), 2);
        assert_eq!(packs[0].name, "articles");
        assert_eq!(packs[1].id, 2);
    }

    #[tokio::test]
    async fn test_create_posts_wire_fields() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/users/2/packs")
                    .body_contains(r#""pack_name":"articles""#)
                    .body_contains(r#""description":"news articles""#);
                then.status(201).json_body(pack_json(7, "articles"));
            })
            .await;

        let pack = client_for(&server)
            .create_pack("articles", "news articles")
            .await
            .unwrap();
        mock.assert_async().await;
        assert_eq!(pack.id, 7);
        assert_eq!(pack.name, "articles");
    }

    #[tokio::test]
    async fn test_delete_targets_pack_id() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/users/2/packs/7");
                then.status(204);
            })
            .await;

        client_for(&server).delete_pack(7).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_unknown_pack_fails() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/2/packs");
                then.status(200)
                    .json_body(serde_json::json!({"packs": [pack_json(1, "articles")]}));
            })
            .await;

        let client = client_for(&server);
        let pack = client.resolve("articles").await.unwrap();
        assert_eq!(pack.id, 1);

        let err = client.resolve("missing").await.unwrap_err();
        assert!(err.to_string().contains("unknown pack"));
    }

    #[tokio::test]
    async fn test_backend_error_status_surfaces() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/users/2/packs");
                then.status(500);
            })
            .await;

        let err = client_for(&server).list_packs().await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }
}
