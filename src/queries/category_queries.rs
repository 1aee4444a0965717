use sqlx::PgPool;

use crate::{
    error::Result,
    models::{Category, CategoryWithCount},
};

/// Find category by ID
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(category)
}

/// Get all categories (flat list)
pub async fn get_all(pool: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC, id ASC")
        .fetch_all(pool)
        .await?;

    Ok(categories)
}

/// Every category with the number of products referencing it
pub async fn get_with_product_counts(pool: &PgPool) -> Result<Vec<CategoryWithCount>> {
    let categories = sqlx::query_as::<_, CategoryWithCount>(
        "SELECT
            c.id,
            c.name,
            COUNT(p.id)::bigint AS product_count
         FROM categories c
         LEFT JOIN products p ON p.category_id = c.id
         GROUP BY c.id, c.name
         ORDER BY c.name ASC, c.id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// Create a new category
pub async fn create_category(pool: &PgPool, name: &str) -> Result<Category> {
    let category =
        sqlx::query_as::<_, Category>("INSERT INTO categories (name) VALUES ($1) RETURNING *")
            .bind(name)
            .fetch_one(pool)
            .await?;

    Ok(category)
}

/// Delete a category. Its products stay, with `category_id` set to NULL.
pub async fn delete_category(pool: &PgPool, id: i32) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
