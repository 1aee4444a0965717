mod account;
mod categories;
mod health;
mod home;
mod login;
mod news;
mod products;
mod register;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{AppState, middleware::auth_middleware};

pub use home::{ASYNC_FETCH_HEADER, ASYNC_FETCH_VALUE, is_async_fetch};

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/Home", get(home::index))
        .route("/Home/Index", get(home::index))
        .merge(product_routes())
        .merge(news_routes())
        .merge(category_routes())
        .merge(account_routes(state))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/Products", get(products::index))
        .route("/Products/Index", get(products::index))
        .route(
            "/Products/Create",
            get(products::create_form).post(products::create),
        )
        .route(
            "/Products/Edit/{id}",
            get(products::edit_form).post(products::edit),
        )
        .route(
            "/Products/Delete/{id}",
            get(products::delete_confirm).post(products::delete),
        )
        .route("/Products/Details/{id}", get(products::details))
}

fn news_routes() -> Router<AppState> {
    Router::new()
        .route("/News", get(news::index))
        .route("/News/Index", get(news::index))
        .route("/News/Create", get(news::create_form).post(news::create))
        .route("/News/Edit/{id}", get(news::edit_form).post(news::edit))
        .route(
            "/News/Delete/{id}",
            get(news::delete_confirm).post(news::delete),
        )
        .route("/News/Details/{id}", get(news::details))
}

fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/Categories", get(categories::index))
        .route("/Categories/Create", post(categories::create))
        .route("/Categories/Delete/{id}", post(categories::delete))
}

fn account_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/Account/Me", get(account::current_user))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new()
        .route("/Account/Register", post(register::register_user))
        .route("/Account/Login", post(login::login_user))
        .merge(protected)
}
