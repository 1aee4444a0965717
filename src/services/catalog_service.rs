use sqlx::PgPool;

use crate::{
    error::Result,
    models::{CatalogPage, CatalogQuery, CategoryWithCount, News, ProductWithCategory},
    queries::{category_queries, news_queries, product_queries},
};

pub const CATALOG_PAGE_SIZE: i64 = 10;
pub const RECENT_NEWS_COUNT: i64 = 3;

pub async fn search_products(pool: &PgPool, query: &CatalogQuery) -> Result<Vec<ProductWithCategory>> {
    product_queries::search(
        pool,
        query.search_string.as_deref(),
        query.category_id,
        CATALOG_PAGE_SIZE,
    )
    .await
}

/// Counts cover every product of a category, regardless of the current filter.
pub async fn categories_with_counts(pool: &PgPool) -> Result<Vec<CategoryWithCount>> {
    category_queries::get_with_product_counts(pool).await
}

pub async fn recent_news(pool: &PgPool) -> Result<Vec<News>> {
    news_queries::get_recent(pool, RECENT_NEWS_COUNT).await
}

pub async fn load_catalog_page(pool: &PgPool, query: &CatalogQuery) -> Result<CatalogPage> {
    let products = search_products(pool, query).await?;
    let categories = categories_with_counts(pool).await?;
    let recent_news = recent_news(pool).await?;

    Ok(CatalogPage {
        products,
        categories,
        recent_news,
    })
}
