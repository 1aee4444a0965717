use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    error::Result,
    models::{CatalogParams, CatalogQuery, ProductFragment},
    services::catalog_service,
};

/// Header set by browsers' script-driven fetches.
pub const ASYNC_FETCH_HEADER: &str = "x-requested-with";
pub const ASYNC_FETCH_VALUE: &str = "XMLHttpRequest";

pub fn is_async_fetch(headers: &HeaderMap) -> bool {
    headers
        .get(ASYNC_FETCH_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case(ASYNC_FETCH_VALUE))
}

pub async fn index(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CatalogParams>,
) -> Result<Response> {
    let query = CatalogQuery::from(params);

    if is_async_fetch(&headers) {
        let products = catalog_service::search_products(&state.db, &query).await?;
        return Ok(Json(ProductFragment { products }).into_response());
    }

    let page = catalog_service::load_catalog_page(&state.db, &query).await?;
    Ok(Json(page).into_response())
}
