use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{
    Category, FieldErrors, FormFields,
    form::{invalid, non_blank, parse_optional_i32, required, take_field},
};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub image_path: Option<String>,
    pub category_id: Option<i32>,
}

/// Product joined with the name of its category, if any.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

/// Product form as submitted, before validation.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub category_id: Option<String>,
}

/// Validated mutable fields of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<i32>,
}

impl ProductForm {
    pub fn from_fields(mut fields: FormFields) -> Self {
        Self {
            id: take_field(&mut fields, "Id"),
            name: take_field(&mut fields, "Name"),
            description: take_field(&mut fields, "Description"),
            price: take_field(&mut fields, "Price"),
            stock: take_field(&mut fields, "Stock"),
            category_id: take_field(&mut fields, "CategoryId"),
        }
    }

    /// Identifier carried in the body; `None` when absent or not a number.
    pub fn id(&self) -> Option<i32> {
        non_blank(&self.id).and_then(|v| v.parse().ok())
    }

    pub fn validate(&self) -> Result<ProductInput, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = non_blank(&self.name).map(str::to_string);
        if name.is_none() {
            required("Name", &mut errors);
        }

        let price = match non_blank(&self.price) {
            None => {
                required("Price", &mut errors);
                None
            }
            Some(raw) => match Decimal::from_str(raw) {
                Ok(price) if fits_price_column(price) => Some(price),
                Ok(_) => {
                    errors.insert("Price", "The value is out of range for Price.".to_string());
                    None
                }
                Err(_) => {
                    invalid("Price", &mut errors);
                    None
                }
            },
        };

        let stock = match non_blank(&self.stock) {
            None => {
                required("Stock", &mut errors);
                None
            }
            Some(raw) => match raw.parse::<i32>() {
                Ok(stock) => Some(stock),
                Err(_) => {
                    invalid("Stock", &mut errors);
                    None
                }
            },
        };

        let category_id = parse_optional_i32("CategoryId", &self.category_id, &mut errors);
        parse_optional_i32("Id", &self.id, &mut errors);

        match (name, price, stock) {
            (Some(name), Some(price), Some(stock)) if errors.is_empty() => Ok(ProductInput {
                name,
                description: non_blank(&self.description).map(str::to_string),
                price,
                stock,
                category_id,
            }),
            _ => Err(errors),
        }
    }
}

/// `price` is `NUMERIC(18, 2)`: sixteen digits before the decimal point.
fn fits_price_column(price: Decimal) -> bool {
    price.round_dp(2).abs() < Decimal::from(10_000_000_000_000_000_i64)
}

/// Create/edit form redisplayed with its errors and the category choices.
#[derive(Debug, Serialize)]
pub struct ProductFormView {
    pub form: ProductForm,
    pub errors: FieldErrors,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize)]
pub struct ProductEditView {
    pub product: ProductWithCategory,
    pub categories: Vec<Category>,
}
