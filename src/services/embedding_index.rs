use crate::{
    error::Result,
    models::{ScoredTag, Tag},
    services::steamship::SteamshipClient,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

const EMBEDDER_PLUGIN: &str = "openai-embedder";
const EMBEDDER_MODEL: &str = "text-embedding-ada-002";
const EMBEDDER_DIMENSIONALITY: usize = 1536;

/// Handle on a named persistent embedding index hosted by the platform.
///
/// The index embeds each tag's `text` with the configured embedder plugin;
/// nearest-neighbor search happens entirely on the platform side.
#[derive(Debug, Clone)]
pub struct EmbeddingIndex {
    client: Arc<SteamshipClient>,
    handle: String,
}

#[derive(Debug, Serialize)]
struct CreateIndexRequest<'a> {
    handle: &'a str,
    fetch_if_exists: bool,
    embedder: EmbedderConfig<'a>,
}

#[derive(Debug, Serialize)]
struct EmbedderConfig<'a> {
    plugin_handle: &'a str,
    model: &'a str,
    dimensionality: usize,
}

#[derive(Debug, Serialize)]
struct InsertItemsRequest<'a> {
    index: &'a str,
    items: &'a [Tag],
}

#[derive(Debug, Serialize)]
struct SearchIndexRequest<'a> {
    index: &'a str,
    query: &'a str,
    k: usize,
}

#[derive(Debug, Deserialize)]
struct SearchOutput {
    items: Vec<ScoredTag>,
}

impl EmbeddingIndex {
    /// Fetch (or create) the index named `handle`.
    pub async fn connect(client: Arc<SteamshipClient>, handle: &str) -> Result<Self> {
        let request = CreateIndexRequest {
            handle,
            fetch_if_exists: true,
            embedder: EmbedderConfig {
                plugin_handle: EMBEDDER_PLUGIN,
                model: EMBEDDER_MODEL,
                dimensionality: EMBEDDER_DIMENSIONALITY,
            },
        };

        client
            .post_and_wait::<_, Value>("embedding-index/create", &request)
            .await?;

        Ok(Self {
            client,
            handle: handle.to_string(),
        })
    }

    pub async fn insert(&self, items: &[Tag]) -> Result<()> {
        let request = InsertItemsRequest {
            index: &self.handle,
            items,
        };

        self.client
            .post_and_wait::<_, Value>("embedding-index/item/create", &request)
            .await?;

        Ok(())
    }

    /// Return the `k` closest items to `query`.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredTag>> {
        let request = SearchIndexRequest {
            index: &self.handle,
            query,
            k,
        };

        let output: SearchOutput = self
            .client
            .post_and_wait("embedding-index/search", &request)
            .await?;

        Ok(output.items)
    }
}
