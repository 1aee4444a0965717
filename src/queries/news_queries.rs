use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{error::Result, models::News};

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<News>> {
    let news = sqlx::query_as::<_, News>("SELECT * FROM news_articles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(news)
}

pub async fn exists(pool: &PgPool, id: i32) -> Result<bool> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM news_articles WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;

    Ok(exists)
}

pub async fn get_all(pool: &PgPool) -> Result<Vec<News>> {
    let news = sqlx::query_as::<_, News>(
        "SELECT * FROM news_articles ORDER BY published_date DESC, id DESC",
    )
    .fetch_all(pool)
    .await?;

    Ok(news)
}

/// The `limit` most recent articles. Sorted before the cap is applied.
pub async fn get_recent(pool: &PgPool, limit: i64) -> Result<Vec<News>> {
    let news = sqlx::query_as::<_, News>(
        "SELECT * FROM news_articles ORDER BY published_date DESC, id DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(news)
}

pub async fn create_news(
    pool: &PgPool,
    title: &str,
    content: &str,
    published_date: DateTime<Utc>,
    image_path: Option<&str>,
) -> Result<News> {
    let news = sqlx::query_as::<_, News>(
        "INSERT INTO news_articles (title, content, published_date, image_path)
         VALUES ($1, $2, $3, $4)
         RETURNING *",
    )
    .bind(title)
    .bind(content)
    .bind(published_date)
    .bind(image_path)
    .fetch_one(pool)
    .await?;

    Ok(news)
}

/// Replaces every mutable field. Returns `false` when no row was touched.
pub async fn update_news(
    pool: &PgPool,
    id: i32,
    title: &str,
    content: &str,
    published_date: DateTime<Utc>,
    image_path: Option<&str>,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE news_articles
         SET title = $1, content = $2, published_date = $3, image_path = $4
         WHERE id = $5",
    )
    .bind(title)
    .bind(content)
    .bind(published_date)
    .bind(image_path)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_news(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM news_articles WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
