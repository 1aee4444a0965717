use axum::{Extension, Json, extract::State};

use crate::{
    AppState,
    error::{AppError, Result},
    models::UserProfile,
    queries::user_queries,
    utils::jwt::Claims,
};

pub async fn current_user(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserProfile>> {
    let user_id = claims
        .sub
        .parse::<i32>()
        .map_err(|_| AppError::Unauthorized("Unauthorized".to_string()))?;

    // A token can outlive its account.
    let user = user_queries::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    Ok(Json(user.into()))
}
