//! CLI handlers for pack management.

use anyhow::Result;

use crate::config::Config;
use crate::dispatch::EmbeddingClient;
use crate::packs::PackClient;

pub async fn run_list(config: &Config) -> Result<()> {
    let client = PackClient::new(&config.packs, config.identity.user_id)?;
    let packs = client.list_packs().await?;

    if packs.is_empty() {
        println!("no packs");
        return Ok(());
    }

    println!("{:<6} {:<24} {:<12} DESCRIPTION", "ID", "NAME", "CREATED");
    for pack in packs {
        println!(
            "{:<6} {:<24} {:<12} {}",
            pack.id,
            pack.name,
            pack.created_at.format("%Y-%m-%d"),
            pack.description
        );
    }
    Ok(())
}

pub async fn run_create(config: &Config, name: &str, description: &str) -> Result<()> {
    let client = PackClient::new(&config.packs, config.identity.user_id)?;
    let pack = client.create_pack(name, description).await?;
    println!("created pack '{}' (id {})", pack.name, pack.id);
    Ok(())
}

/// Delete a pack: metadata first, then its records in the remote index.
///
/// If the index deletion fails the metadata is already gone; the error
/// reports that so the orphaned records can be cleaned up manually.
pub async fn run_delete(config: &Config, name: &str) -> Result<()> {
    let client = PackClient::new(&config.packs, config.identity.user_id)?;
    let pack = client.resolve(name).await?;

    client.delete_pack(pack.id).await?;

    let dispatcher = EmbeddingClient::new(&config.embedder, &config.identity.username)?;
    dispatcher
        .delete_pack(&pack.name)
        .await
        .map_err(|e| e.context("pack metadata deleted, but the remote index still holds its records"))?;

    println!("deleted pack '{}' (id {})", pack.name, pack.id);
    Ok(())
}
