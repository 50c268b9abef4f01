use crate::{
    error::{ApiError, Result},
    services::steamship::SteamshipClient,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

// Controls randomness of output (range: 0.0-1.0)
const GENERATOR_TEMPERATURE: f64 = 0.8;

/// Handle on a named generation model hosted by the platform.
#[derive(Debug, Clone)]
pub struct GeneratorModel {
    client: Arc<SteamshipClient>,
    handle: String,
}

#[derive(Debug, Serialize)]
struct CreatePluginRequest<'a> {
    handle: &'a str,
    fetch_if_exists: bool,
    config: PluginConfig,
}

#[derive(Debug, Serialize)]
struct PluginConfig {
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    plugin_instance: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateOutput {
    blocks: Vec<Block>,
}

#[derive(Debug, Deserialize)]
struct Block {
    text: String,
}

impl GeneratorModel {
    /// Fetch (or create) the generation model named `handle`.
    pub async fn connect(client: Arc<SteamshipClient>, handle: &str) -> Result<Self> {
        let request = CreatePluginRequest {
            handle,
            fetch_if_exists: true,
            config: PluginConfig {
                temperature: GENERATOR_TEMPERATURE,
            },
        };

        client
            .post_and_wait::<_, Value>("plugin/instance/create", &request)
            .await?;

        Ok(Self {
            client,
            handle: handle.to_string(),
        })
    }

    /// Run one completion and return the first output block's text.
    pub async fn generate(&self, text: &str) -> Result<String> {
        let request = GenerateRequest {
            plugin_instance: &self.handle,
            text,
        };

        let output: GenerateOutput = self
            .client
            .post_and_wait("plugin/instance/generate", &request)
            .await?;

        output
            .blocks
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                ApiError::ExternalService("generator returned no output blocks".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn generator_for(server: &mockito::ServerGuard) -> GeneratorModel {
        let client =
            Arc::new(SteamshipClient::new("test-key", &server.url(), "test-workspace").unwrap());
        GeneratorModel::connect(client, "gpt-4").await.unwrap()
    }

    fn succeeded(data: serde_json::Value) -> String {
        json!({"task": {"task_id": "t", "state": "succeeded"}, "data": data}).to_string()
    }

    #[tokio::test]
    async fn generate_returns_first_block_text() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/plugin/instance/create")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(succeeded(json!({})))
            .create_async()
            .await;

        server
            .mock("POST", "/plugin/instance/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(succeeded(json!({
                "blocks": [{"text": "Tokyo, Japan"}, {"text": "ignored"}]
            })))
            .create_async()
            .await;

        let generator = generator_for(&server).await;
        let completion = generator.generate("where does this story happen?").await.unwrap();

        assert_eq!(completion, "Tokyo, Japan");
    }

    #[tokio::test]
    async fn empty_block_list_is_an_error() {
        let mut server = mockito::Server::new_async().await;

        server
            .mock("POST", "/plugin/instance/create")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(succeeded(json!({})))
            .create_async()
            .await;

        server
            .mock("POST", "/plugin/instance/generate")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(succeeded(json!({"blocks": []})))
            .create_async()
            .await;

        let generator = generator_for(&server).await;
        let result = generator.generate("anything").await;

        assert!(matches!(result, Err(ApiError::ExternalService(_))));
    }
}
