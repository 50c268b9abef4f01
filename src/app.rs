use crate::{
    config::Config,
    error::Result,
    handlers, models,
    routes::{api_routes, openapi_route, swagger_routes},
    services::{EmbeddingIndex, GeneratorModel, RecommendationService, SteamshipClient},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::net::TcpListener;
use std::sync::Arc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::stories::insert,
        handlers::stories::search,
        handlers::stories::suggest_story,
    ),
    components(schemas(
        models::InsertRequest,
        models::SearchRequest,
        models::HealthResponse,
        models::ErrorResponse,
        models::Tag,
        models::ScoredTag,
    )),
    tags(
        (name = "Stories", description = "Story indexing, search and suggestion operations"),
        (name = "System", description = "Service health"),
    )
)]
pub struct ApiDoc;

pub struct Application {
    port: u16,
    host: String,
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            port: config.port,
            host: config.host.clone(),
            config: config.clone(),
        }
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        // Always bind to 0.0.0.0 for container compatibility
        let bind_address = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}:{}", self.host, self.port);

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(&self, listener: TcpListener) -> Result<()> {
        let client = Arc::new(
            SteamshipClient::new(
                &self.config.steamship_api_key,
                &self.config.steamship_base_url,
                &self.config.workspace_handle,
            )
            .context("Failed to create platform client")?,
        );

        // Both handles are fetched by name up front; a missing index or
        // model is a startup failure, not a per-request one.
        let index = EmbeddingIndex::connect(client.clone(), &self.config.index_handle)
            .await
            .context("Failed to connect embedding index")?;
        let generator = GeneratorModel::connect(client, &self.config.generator_handle)
            .await
            .context("Failed to connect generator model")?;

        let recommendation_service =
            web::Data::new(RecommendationService::new(index, generator));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .service(api_routes())
                .service(swagger_routes())
                .service(openapi_route())
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}
