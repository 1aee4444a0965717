use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::Result,
    models::{CategoryForm, CategoryFormView, CategoryWithCount},
    queries::category_queries,
    services::catalog_service,
    utils::multipart::read_form,
};

pub const CATEGORIES_INDEX: &str = "/Categories";

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CategoryWithCount>>> {
    let categories = catalog_service::categories_with_counts(&state.db).await?;

    Ok(Json(categories))
}

pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let data = read_form(multipart, None).await?;
    let form = CategoryForm::from_fields(data.fields);

    let name = match form.validate() {
        Ok(name) => name,
        Err(errors) => {
            let view = CategoryFormView { form, errors };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response());
        }
    };

    let category = category_queries::create_category(&state.db, &name).await?;
    tracing::info!(category_id = category.id, "Category created");

    Ok(Redirect::to(CATEGORIES_INDEX).into_response())
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    if category_queries::delete_category(&state.db, id).await? {
        tracing::info!(category_id = id, "Category deleted");
    }

    Ok(Redirect::to(CATEGORIES_INDEX))
}
