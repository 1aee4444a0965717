mod catalog;
mod category;
mod form;
mod news;
mod product;
mod user;

pub use catalog::*;
pub use category::*;
pub use form::{FieldErrors, FormFields};
pub use news::*;
pub use product::*;
pub use user::*;
