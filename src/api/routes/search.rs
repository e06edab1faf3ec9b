//! Search handlers: merged provider queries for videos and images.

use super::SearchQuery;
use crate::api::AppState;
use crate::error::Error;
use axum::{Json, extract::Query, extract::State, response::IntoResponse};

fn require_query(params: SearchQuery) -> Result<String, Error> {
    match params.query {
        Some(q) if !q.trim().is_empty() => Ok(q),
        _ => Err(Error::validation("missing query parameter")),
    }
}

/// GET /search_videos - Merged video search
#[utoipa::path(
    get,
    path = "/search_videos",
    tag = "search",
    params(
        ("query" = String, Query, description = "Search keyword")
    ),
    responses(
        (status = 200, description = "Merged video results (Pexels first, then Coverr)", body = [MediaRecord]),
        (status = 400, description = "Missing query parameter")
    )
)]
pub async fn search_videos(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, Error> {
    let query = require_query(params)?;
    let records = state.search.search_videos(&query).await;
    Ok(Json(records))
}

/// GET /search_images - Merged image search
#[utoipa::path(
    get,
    path = "/search_images",
    tag = "search",
    params(
        ("query" = String, Query, description = "Search keyword")
    ),
    responses(
        (status = 200, description = "Merged image results (Wikimedia first, then Pexels)", body = [MediaRecord]),
        (status = 400, description = "Missing query parameter")
    )
)]
pub async fn search_images(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, Error> {
    let query = require_query(params)?;
    let records = state.search.search_images(&query).await;
    Ok(Json(records))
}
