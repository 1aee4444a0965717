pub mod category_queries;
pub mod news_queries;
pub mod product_queries;
pub mod user_queries;
