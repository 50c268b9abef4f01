use crate::{
    error::{ApiError, Result},
    models::{ErrorResponse, InsertRequest, ScoredTag, SearchRequest, Tag},
    services::RecommendationService,
};
use actix_web::{post, web, HttpResponse};

/// Index one or more story tags
#[utoipa::path(
    post,
    path = "/api/insert",
    tag = "Stories",
    request_body = InsertRequest,
    responses(
        (status = 200, description = "Tags were embedded and indexed", body = bool),
        (status = 500, description = "Indexing failed", body = ErrorResponse),
    )
)]
#[post("/insert")]
pub async fn insert(
    request: web::Json<InsertRequest>,
    service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    let items: Vec<Tag> = request.into_inner().items.into();
    let inserted = service.insert(items).await?;
    Ok(HttpResponse::Ok().json(inserted))
}

/// Return the closest indexed stories for a query
#[utoipa::path(
    post,
    path = "/api/search",
    tag = "Stories",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Nearest items with similarity scores", body = [ScoredTag]),
        (status = 400, description = "Invalid input parameters", body = ErrorResponse),
        (status = 500, description = "Search failed", body = ErrorResponse),
    )
)]
#[post("/search")]
pub async fn search(
    request: web::Json<SearchRequest>,
    service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    if request.query.trim().is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let hits = service.search(&request.query, request.k).await?;
    Ok(HttpResponse::Ok().json(hits))
}

/// Return the closest indexed stories, enriched with derived
/// topic/audience/location/explanation strings
#[utoipa::path(
    post,
    path = "/api/suggest_story",
    tag = "Stories",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Enriched suggestions", body = [ScoredTag]),
        (status = 400, description = "Invalid input parameters", body = ErrorResponse),
        (status = 500, description = "Search or enrichment failed", body = ErrorResponse),
    )
)]
#[post("/suggest_story")]
pub async fn suggest_story(
    request: web::Json<SearchRequest>,
    service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    if request.query.trim().is_empty() {
        return Err(ApiError::InvalidInput("Query cannot be empty".to_string()));
    }

    let suggestions = service.suggest_story(&request.query, request.k).await?;
    Ok(HttpResponse::Ok().json(suggestions))
}
