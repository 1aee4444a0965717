use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    config::AppConfig,
    database,
    error::Result,
    routes,
    services::{ImageFolder, UploadService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub uploads: UploadService,
    pub jwt_secret: Arc<str>,
}

impl AppState {
    pub fn new(db: PgPool, config: &AppConfig) -> Self {
        Self {
            db,
            uploads: UploadService::new(config.uploads.root.clone()),
            jwt_secret: Arc::from(config.auth.jwt_secret.as_str()),
        }
    }
}

pub async fn build(config: &AppConfig) -> Result<Router> {
    let pool = database::create_pool(&config.database).await?;
    tokio::fs::create_dir_all(&config.uploads.root).await?;
    router(AppState::new(pool, config), config)
}

/// Routes, static image folders and middleware around an existing state.
pub fn router(state: AppState, config: &AppConfig) -> Result<Router> {
    let allowed_origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|_| {
                crate::error::AppError::ConfigError(format!("Invalid CORS origin: {}", origin))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::header::AUTHORIZATION,
            http::header::HeaderName::from_static("x-requested-with"),
        ])
        .allow_origin(allowed_origins);

    let mut app = routes::create_router(state.clone());
    for folder in [ImageFolder::Products, ImageFolder::News] {
        app = app.nest_service(
            &format!("/{}", folder.dir_name()),
            ServeDir::new(state.uploads.folder_path(folder)),
        );
    }

    let app = app
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}
