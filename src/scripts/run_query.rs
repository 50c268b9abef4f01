use crate::{config::Config, error::Result, models::SearchRequest, services::PackageClient};
use console::style;
use serde_json::Value;

/// Canned demo query issued against the deployed service.
const SUGGEST_QUERY: &str =
    "A person travels Goa expecting the beach, but finds a war with Portugal";

/// Ask the deployed service for enriched suggestions and print the raw
/// response.
pub async fn run_query(config: &Config) -> Result<()> {
    let client = PackageClient::new(config)?;

    println!("{}", style("Story recommendations").bold());
    println!("{} {SUGGEST_QUERY}", style("QUERY:").dim());

    let request = SearchRequest {
        query: SUGGEST_QUERY.to_string(),
        k: 3,
    };
    let response: Value = client.invoke("suggest_story", &request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
