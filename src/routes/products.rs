use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::{AppError, Result},
    models::{
        CatalogPage, CatalogParams, CatalogQuery, FieldErrors, ProductEditView, ProductForm,
        ProductFormView, ProductInput, ProductWithCategory,
    },
    queries::{category_queries, product_queries},
    services::{ImageFolder, catalog_service},
    utils::multipart::{IMAGE_FIELD, read_form},
};

pub const PRODUCTS_INDEX: &str = "/Products";

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<CatalogPage>> {
    let query = CatalogQuery::from(params);
    let page = catalog_service::load_catalog_page(&state.db, &query).await?;

    Ok(Json(page))
}

pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductWithCategory>> {
    let product = product_queries::find_with_category(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(product))
}

pub async fn create_form(State(state): State<AppState>) -> Result<Json<ProductFormView>> {
    let categories = category_queries::get_all(&state.db).await?;

    Ok(Json(ProductFormView {
        form: ProductForm::default(),
        errors: FieldErrors::new(),
        categories,
    }))
}

pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let data = read_form(multipart, Some(IMAGE_FIELD)).await?;
    let form = ProductForm::from_fields(data.fields);

    let input = match validate(&state, &form).await? {
        Ok(input) => input,
        Err(errors) => return invalid_form(&state, form, errors).await,
    };

    let image_path = match data.file.as_ref().filter(|f| !f.is_empty()) {
        Some(file) => Some(state.uploads.save(ImageFolder::Products, file).await?),
        None => None,
    };

    let product = product_queries::create_product(&state.db, &input, image_path.as_deref()).await?;
    tracing::info!(product_id = product.id, "Product created");

    Ok(Redirect::to(PRODUCTS_INDEX).into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductEditView>> {
    let product = product_queries::find_with_category(&state.db, id)
        .await?
        .ok_or_else(not_found)?;
    let categories = category_queries::get_all(&state.db).await?;

    Ok(Json(ProductEditView {
        product,
        categories,
    }))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response> {
    let data = read_form(multipart, Some(IMAGE_FIELD)).await?;
    let form = ProductForm::from_fields(data.fields);

    if form.id() != Some(id) {
        return Err(not_found());
    }

    let input = match validate(&state, &form).await? {
        Ok(input) => input,
        Err(errors) => return invalid_form(&state, form, errors).await,
    };

    let existing = product_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    let image_path = state
        .uploads
        .resolve_image(
            ImageFolder::Products,
            existing.image_path.as_deref(),
            data.file.as_ref(),
        )
        .await?;

    let updated =
        product_queries::update_product(&state.db, id, &input, image_path.as_deref()).await?;
    if !updated {
        if !product_queries::exists(&state.db, id).await? {
            return Err(not_found());
        }
        return Err(AppError::InternalError(format!(
            "Product {} was modified concurrently",
            id
        )));
    }

    tracing::info!(product_id = id, "Product updated");

    Ok(Redirect::to(PRODUCTS_INDEX).into_response())
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductWithCategory>> {
    let product = product_queries::find_with_category(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(product))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    if let Some(product) = product_queries::find_by_id(&state.db, id).await? {
        state
            .uploads
            .delete_if_exists(product.image_path.as_deref())
            .await;
        product_queries::delete_product(&state.db, id).await?;
        tracing::info!(product_id = id, "Product deleted");
    }

    Ok(Redirect::to(PRODUCTS_INDEX))
}

/// Field validation plus the check that a chosen category exists.
async fn validate(
    state: &AppState,
    form: &ProductForm,
) -> Result<std::result::Result<ProductInput, FieldErrors>> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(Err(errors)),
    };

    if let Some(category_id) = input.category_id
        && category_queries::find_by_id(&state.db, category_id)
            .await?
            .is_none()
    {
        let mut errors = FieldErrors::new();
        errors.insert("CategoryId", "The selected category does not exist.".to_string());
        return Ok(Err(errors));
    }

    Ok(Ok(input))
}

async fn invalid_form(state: &AppState, form: ProductForm, errors: FieldErrors) -> Result<Response> {
    let categories = category_queries::get_all(&state.db).await?;
    let view = ProductFormView {
        form,
        errors,
        categories,
    };

    Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(view)).into_response())
}
