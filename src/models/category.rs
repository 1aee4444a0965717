use serde::{Deserialize, Serialize};

use super::{
    FieldErrors, FormFields,
    form::{non_blank, required, take_field},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// Category paired with the number of products referencing it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CategoryForm {
    pub name: Option<String>,
}

impl CategoryForm {
    pub fn from_fields(mut fields: FormFields) -> Self {
        Self {
            name: take_field(&mut fields, "Name"),
        }
    }

    pub fn validate(&self) -> Result<String, FieldErrors> {
        match non_blank(&self.name) {
            Some(name) => Ok(name.to_string()),
            None => {
                let mut errors = FieldErrors::new();
                required("Name", &mut errors);
                Err(errors)
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryFormView {
    pub form: CategoryForm,
    pub errors: FieldErrors,
}
