use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{Product, ProductInput, ProductWithCategory},
};

const SELECT_WITH_CATEGORY: &str = "SELECT p.*, c.name AS category_name
     FROM products p
     LEFT JOIN categories c ON c.id = p.category_id";

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(product)
}

pub async fn find_with_category(pool: &PgPool, id: i32) -> Result<Option<ProductWithCategory>> {
    let product = sqlx::query_as::<_, ProductWithCategory>(&format!(
        "{} WHERE p.id = $1",
        SELECT_WITH_CATEGORY
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn exists(pool: &PgPool, id: i32) -> Result<bool> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Products whose name or description contains `search` (case-insensitive)
/// and whose category is `category_id`, both filters optional.
pub async fn search(
    pool: &PgPool,
    search: Option<&str>,
    category_id: Option<i32>,
    limit: i64,
) -> Result<Vec<ProductWithCategory>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_WITH_CATEGORY);
    query.push(" WHERE 1=1");

    if let Some(q) = search.filter(|q| !q.is_empty()) {
        let pattern = like_pattern(q);
        query.push(" AND (p.name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR p.description ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }

    if let Some(category_id) = category_id {
        query.push(" AND p.category_id = ");
        query.push_bind(category_id);
    }

    query.push(" ORDER BY p.id ASC LIMIT ");
    query.push_bind(limit);

    let products = query
        .build_query_as::<ProductWithCategory>()
        .fetch_all(pool)
        .await?;

    Ok(products)
}

pub async fn create_product(
    pool: &PgPool,
    input: &ProductInput,
    image_path: Option<&str>,
) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name, description, price, stock, image_path, category_id)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING *",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.stock)
    .bind(image_path)
    .bind(input.category_id)
    .fetch_one(pool)
    .await?;

    Ok(product)
}

/// Replaces every mutable field. Returns `false` when no row was touched.
pub async fn update_product(
    pool: &PgPool,
    id: i32,
    input: &ProductInput,
    image_path: Option<&str>,
) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE products
         SET name = $1, description = $2, price = $3, stock = $4, image_path = $5, category_id = $6
         WHERE id = $7",
    )
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.price)
    .bind(input.stock)
    .bind(image_path)
    .bind(input.category_id)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_product(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// `%term%` with LIKE wildcards in `term` escaped.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}
