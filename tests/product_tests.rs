mod common;

use axum::http::StatusCode;
use common::*;
use mystore::models::Product;
use sqlx::PgPool;
use tempfile::TempDir;

async fn latest_product(pool: &PgPool) -> Product {
    sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY id DESC LIMIT 1")
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn load_product(pool: &PgPool, id: i32) -> Option<Product> {
    sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

/// Saves an image through the create endpoint and returns the stored product.
async fn create_with_image(app: &axum::Router, pool: &PgPool, content: &[u8]) -> Product {
    let form = MultipartForm::new()
        .text("Name", "Teapot")
        .text("Price", "30.00")
        .text("Stock", "2")
        .file("imageFile", "teapot.png", content);
    let response = post_form(app, "/Products/Create", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    latest_product(pool).await
}

#[sqlx::test]
async fn create_stores_product_and_image(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let tea = seed_category(&pool, "Tea").await;
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Name", "Green Tea")
        .text("Description", "Loose leaf")
        .text("Price", "12.50")
        .text("Stock", "40")
        .text("CategoryId", &tea.id.to_string())
        .file("imageFile", "green.jpg", b"jpeg-bytes");
    let response = post_form(&app, "/Products/Create", form).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Products");

    let product = latest_product(&pool).await;
    assert_eq!(product.name, "Green Tea");
    assert_eq!(product.description.as_deref(), Some("Loose leaf"));
    assert_eq!(product.price.to_string(), "12.50");
    assert_eq!(product.stock, 40);
    assert_eq!(product.category_id, Some(tea.id));

    let image_path = product.image_path.unwrap();
    assert!(image_path.starts_with("/images/"));
    assert!(image_path.ends_with(".jpg"));
    assert_eq!(
        std::fs::read(stored_file(uploads.path(), &image_path)).unwrap(),
        b"jpeg-bytes"
    );

    let served = get(&app, &image_path).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, b"jpeg-bytes");
}

#[sqlx::test]
async fn create_without_image_leaves_path_empty(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Name", "Mug")
        .text("Price", "4")
        .text("Stock", "10")
        .text("CategoryId", "")
        .file("imageFile", "", b"");
    let response = post_form(&app, "/Products/Create", form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let product = latest_product(&pool).await;
    assert_eq!(product.image_path, None);
    assert_eq!(product.category_id, None);
    assert!(!uploads.path().join("images").exists());
}

#[sqlx::test]
async fn invalid_create_redisplays_form_without_writing(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    seed_category(&pool, "Tea").await;
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Description", "No name given")
        .text("Price", "abc")
        .text("Stock", "1")
        .file("imageFile", "x.png", b"png");
    let response = post_form(&app, "/Products/Create", form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["Name"], "The Name field is required.");
    assert_eq!(body["errors"]["Price"], "The value is not valid for Price.");
    assert_eq!(body["form"]["Description"], "No name given");
    assert_eq!(body["categories"][0]["name"], "Tea");

    assert_eq!(count(&pool, "products").await, 0);
    assert!(!uploads.path().join("images").exists());
}

#[sqlx::test]
async fn create_rejects_unknown_category(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Name", "Orphan")
        .text("Price", "1")
        .text("Stock", "1")
        .text("CategoryId", "999");
    let response = post_form(&app, "/Products/Create", form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["CategoryId"], "The selected category does not exist.");
    assert_eq!(count(&pool, "products").await, 0);
}

#[sqlx::test]
async fn create_accepts_long_names(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());
    let name = "x".repeat(300);

    let form = MultipartForm::new()
        .text("Name", &name)
        .text("Price", "1")
        .text("Stock", "1");
    let response = post_form(&app, "/Products/Create", form).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(latest_product(&pool).await.name, name);
}

#[sqlx::test]
async fn create_rejects_price_beyond_column_range(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Name", "Gold bar")
        .text("Price", "10000000000000000000")
        .text("Stock", "1");
    let response = post_form(&app, "/Products/Create", form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["Price"], "The value is out of range for Price.");
    assert_eq!(count(&pool, "products").await, 0);
}

#[sqlx::test]
async fn create_form_lists_categories(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    seed_category(&pool, "Tea").await;
    seed_category(&pool, "Coffee").await;
    let app = test_app(pool, uploads.path());

    let body = body_json(get(&app, "/Products/Create").await).await;
    let names: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Coffee", "Tea"]);
    assert!(body["errors"].as_object().unwrap().is_empty());
}

#[sqlx::test]
async fn edit_without_new_image_keeps_previous_path(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());
    let product = create_with_image(&app, &pool, b"original").await;
    let original_path = product.image_path.clone().unwrap();

    let form = MultipartForm::new()
        .text("Id", &product.id.to_string())
        .text("Name", "Teapot XL")
        .text("Price", "35.00")
        .text("Stock", "1")
        .file("imageFile", "", b"");
    let response = post_form(&app, &format!("/Products/Edit/{}", product.id), form).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Products");

    let updated = load_product(&pool, product.id).await.unwrap();
    assert_eq!(updated.name, "Teapot XL");
    assert_eq!(updated.stock, 1);
    assert_eq!(updated.image_path.as_deref(), Some(original_path.as_str()));
    assert!(stored_file(uploads.path(), &original_path).exists());
}

#[sqlx::test]
async fn edit_with_new_image_replaces_old_file(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());
    let product = create_with_image(&app, &pool, b"original").await;
    let original_path = product.image_path.clone().unwrap();

    let form = MultipartForm::new()
        .text("Id", &product.id.to_string())
        .text("Name", "Teapot")
        .text("Price", "30.00")
        .text("Stock", "2")
        .file("imageFile", "teapot-v2.webp", b"replacement");
    let response = post_form(&app, &format!("/Products/Edit/{}", product.id), form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let updated = load_product(&pool, product.id).await.unwrap();
    let new_path = updated.image_path.unwrap();
    assert_ne!(new_path, original_path);
    assert!(new_path.ends_with(".webp"));
    assert!(!stored_file(uploads.path(), &original_path).exists());
    assert_eq!(
        std::fs::read(stored_file(uploads.path(), &new_path)).unwrap(),
        b"replacement"
    );
}

#[sqlx::test]
async fn edit_with_mismatched_id_is_not_found(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let product = seed_product(&pool, "Kettle", None, None, None).await;
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Id", &(product.id + 1).to_string())
        .text("Name", "Renamed")
        .text("Price", "1")
        .text("Stock", "1");
    let response = post_form(&app, &format!("/Products/Edit/{}", product.id), form).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(load_product(&pool, product.id).await.unwrap().name, "Kettle");
}

#[sqlx::test]
async fn edit_of_missing_product_is_not_found(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool, uploads.path());

    let form = MultipartForm::new()
        .text("Id", "41")
        .text("Name", "Ghost")
        .text("Price", "1")
        .text("Stock", "1");
    let response = post_form(&app, "/Products/Edit/41", form).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn invalid_edit_does_not_update(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let product = seed_product(&pool, "Kettle", None, None, None).await;
    let app = test_app(pool.clone(), uploads.path());

    let form = MultipartForm::new()
        .text("Id", &product.id.to_string())
        .text("Name", "")
        .text("Price", "1")
        .text("Stock", "many");
    let response = post_form(&app, &format!("/Products/Edit/{}", product.id), form).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["errors"]["Name"].is_string());
    assert!(body["errors"]["Stock"].is_string());
    assert_eq!(load_product(&pool, product.id).await.unwrap().name, "Kettle");
}

#[sqlx::test]
async fn edit_form_shows_product_with_categories(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let tea = seed_category(&pool, "Tea").await;
    let product = seed_product(&pool, "Green Tea", None, Some(tea.id), None).await;
    let app = test_app(pool, uploads.path());

    let body = body_json(get(&app, &format!("/Products/Edit/{}", product.id)).await).await;
    assert_eq!(body["product"]["name"], "Green Tea");
    assert_eq!(body["product"]["category_name"], "Tea");
    assert_eq!(body["categories"][0]["id"], tea.id);

    assert_eq!(get(&app, "/Products/Edit/999").await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn delete_removes_row_and_image(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool.clone(), uploads.path());
    let product = create_with_image(&app, &pool, b"doomed").await;
    let image_path = product.image_path.clone().unwrap();

    let confirm = get(&app, &format!("/Products/Delete/{}", product.id)).await;
    assert_eq!(confirm.status(), StatusCode::OK);
    assert_eq!(body_json(confirm).await["name"], "Teapot");

    let response = post_empty(&app, &format!("/Products/Delete/{}", product.id)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Products");

    assert!(load_product(&pool, product.id).await.is_none());
    assert!(!stored_file(uploads.path(), &image_path).exists());

    let details = get(&app, &format!("/Products/Details/{}", product.id)).await;
    assert_eq!(details.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn delete_of_missing_product_still_redirects(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let app = test_app(pool, uploads.path());

    let response = post_empty(&app, "/Products/Delete/12345").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/Products");

    let confirm = get(&app, "/Products/Delete/12345").await;
    assert_eq!(confirm.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test]
async fn delete_tolerates_image_missing_on_disk(pool: PgPool) {
    let uploads = TempDir::new().unwrap();
    let product = seed_product(&pool, "Kettle", None, None, Some("/images/gone.png")).await;
    let app = test_app(pool.clone(), uploads.path());

    let response = post_empty(&app, &format!("/Products/Delete/{}", product.id)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(load_product(&pool, product.id).await.is_none());
}
