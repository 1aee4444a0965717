mod connection;

pub use connection::{check_health, create_pool};
