use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;

use crate::{
    AppState,
    error::{AppError, Result},
    models::{FieldErrors, News, NewsForm, NewsFormView},
    queries::news_queries,
    services::ImageFolder,
    utils::multipart::{IMAGE_FIELD, read_form},
};

pub const NEWS_INDEX: &str = "/News";

fn not_found() -> AppError {
    AppError::NotFound("News article not found".to_string())
}

pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<News>>> {
    let news = news_queries::get_all(&state.db).await?;

    Ok(Json(news))
}

pub async fn details(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<News>> {
    let news = news_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(news))
}

pub async fn create_form() -> Json<NewsFormView> {
    Json(NewsFormView {
        form: NewsForm::default(),
        errors: FieldErrors::new(),
    })
}

pub async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Response> {
    let data = read_form(multipart, Some(IMAGE_FIELD)).await?;
    let form = NewsForm::from_fields(data.fields);

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(invalid_form(form, errors)),
    };

    let image_path = match data.file.as_ref().filter(|f| !f.is_empty()) {
        Some(file) => Some(state.uploads.save(ImageFolder::News, file).await?),
        None => None,
    };

    // The publish date is always server time on creation.
    let news = news_queries::create_news(
        &state.db,
        &input.title,
        &input.content,
        Utc::now(),
        image_path.as_deref(),
    )
    .await?;
    tracing::info!(news_id = news.id, "News article created");

    Ok(Redirect::to(NEWS_INDEX).into_response())
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<News>> {
    let news = news_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(news))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response> {
    let data = read_form(multipart, Some(IMAGE_FIELD)).await?;
    let form = NewsForm::from_fields(data.fields);

    if form.id() != Some(id) {
        return Err(not_found());
    }

    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(invalid_form(form, errors)),
    };

    let existing = news_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    let image_path = state
        .uploads
        .resolve_image(
            ImageFolder::News,
            existing.image_path.as_deref(),
            data.file.as_ref(),
        )
        .await?;

    let published_date = input.published_date.unwrap_or(existing.published_date);

    let updated = news_queries::update_news(
        &state.db,
        id,
        &input.title,
        &input.content,
        published_date,
        image_path.as_deref(),
    )
    .await?;
    if !updated {
        if !news_queries::exists(&state.db, id).await? {
            return Err(not_found());
        }
        return Err(AppError::InternalError(format!(
            "News article {} was modified concurrently",
            id
        )));
    }

    tracing::info!(news_id = id, "News article updated");

    Ok(Redirect::to(NEWS_INDEX).into_response())
}

pub async fn delete_confirm(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<News>> {
    let news = news_queries::find_by_id(&state.db, id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(news))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect> {
    if let Some(news) = news_queries::find_by_id(&state.db, id).await? {
        state.uploads.delete_if_exists(news.image_path.as_deref()).await;
        news_queries::delete_news(&state.db, id).await?;
        tracing::info!(news_id = id, "News article deleted");
    }

    Ok(Redirect::to(NEWS_INDEX))
}

fn invalid_form(form: NewsForm, errors: FieldErrors) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(NewsFormView { form, errors })).into_response()
}
