use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Deployment configuration, resolved once at startup.
///
/// The workspace/instance/version handles identify the deployed package on
/// the hosted platform; they used to be hard-coded in the operator scripts
/// and are now explicit configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub steamship_api_key: String,
    pub steamship_base_url: String,
    pub workspace_handle: String,
    pub instance_handle: String,
    pub version_handle: String,
    pub index_handle: String,
    pub generator_handle: String,
    /// Invocation base for the deployed package, used by the operator
    /// scripts. Derived from the workspace/instance handles unless
    /// overridden.
    pub package_base_url: String,
    pub story_data: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let workspace_handle =
            env::var("STEAMSHIP_WORKSPACE").context("STEAMSHIP_WORKSPACE must be set")?;
        let instance_handle =
            env::var("STEAMSHIP_INSTANCE").context("STEAMSHIP_INSTANCE must be set")?;

        let package_base_url = env::var("PACKAGE_BASE_URL").unwrap_or_else(|_| {
            format!("https://{workspace_handle}.steamship.run/{instance_handle}")
        });

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            steamship_api_key: env::var("STEAMSHIP_API_KEY")
                .context("STEAMSHIP_API_KEY must be set")?,
            steamship_base_url: env::var("STEAMSHIP_BASE_URL")
                .unwrap_or_else(|_| "https://api.steamship.com/api/v1".to_string()),
            workspace_handle,
            instance_handle,
            version_handle: env::var("STEAMSHIP_VERSION").unwrap_or_else(|_| "1.0.5".to_string()),
            index_handle: env::var("STORY_INDEX_HANDLE")
                .unwrap_or_else(|_| "story-embedding-index".to_string()),
            generator_handle: env::var("GENERATOR_HANDLE").unwrap_or_else(|_| "gpt-4".to_string()),
            package_base_url,
            story_data: env::var("STORY_DATA")
                .unwrap_or_else(|_| "./data/stories.csv".to_string())
                .into(),
        })
    }
}
