#![allow(dead_code)]

use std::path::Path;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use mystore::{
    AppConfig, AppState, app,
    config::{AuthConfig, CorsConfig, DatabaseConfig, ServerConfig, UploadConfig},
    models::{Category, News, Product, ProductInput},
    queries::{category_queries, news_queries, product_queries},
};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----mystore-test-boundary";
pub const JWT_SECRET: &str = "test-secret";

pub fn test_config(upload_root: &Path) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            max_body_size: 10 * 1024 * 1024,
        },
        database: DatabaseConfig {
            url: String::new(),
            max_connections: 1,
        },
        cors: CorsConfig {
            allowed_origins: Vec::new(),
        },
        uploads: UploadConfig {
            root: upload_root.to_path_buf(),
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
        },
    }
}

pub fn test_app(pool: PgPool, upload_root: &Path) -> Router {
    let config = test_config(upload_root);
    app::router(AppState::new(pool, &config), &config).unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_xhr(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("X-Requested-With", "XMLHttpRequest")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::post(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_form(app: &Router, uri: &str, form: MultipartForm) -> Response<Body> {
    let request = Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(form.finish()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// File on disk behind a root-relative image URL.
pub fn stored_file(upload_root: &Path, image_path: &str) -> std::path::PathBuf {
    upload_root.join(image_path.trim_start_matches('/'))
}

#[derive(Debug, Default)]
pub struct MultipartForm {
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, content: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(content);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        self.body
    }
}

pub async fn seed_category(pool: &PgPool, name: &str) -> Category {
    category_queries::create_category(pool, name).await.unwrap()
}

pub async fn seed_product(
    pool: &PgPool,
    name: &str,
    description: Option<&str>,
    category_id: Option<i32>,
    image_path: Option<&str>,
) -> Product {
    let input = ProductInput {
        name: name.to_string(),
        description: description.map(str::to_string),
        price: Decimal::new(999, 2),
        stock: 5,
        category_id,
    };
    product_queries::create_product(pool, &input, image_path)
        .await
        .unwrap()
}

pub async fn seed_news(
    pool: &PgPool,
    title: &str,
    published: chrono::DateTime<chrono::Utc>,
    image_path: Option<&str>,
) -> News {
    news_queries::create_news(pool, title, "Body text", published, image_path)
        .await
        .unwrap()
}

pub async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
