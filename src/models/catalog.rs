use serde::{Deserialize, Serialize};

use super::{CategoryWithCount, News, ProductWithCategory};

/// Query string of the catalog pages: `?searchString=&categoryId=`.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogParams {
    #[serde(rename = "searchString")]
    pub search_string: Option<String>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogQuery {
    pub search_string: Option<String>,
    pub category_id: Option<i32>,
}

impl From<CatalogParams> for CatalogQuery {
    fn from(params: CatalogParams) -> Self {
        Self {
            search_string: params.search_string.filter(|s| !s.is_empty()),
            // Unparseable ids bind to "no filter", same as an empty value.
            category_id: params
                .category_id
                .and_then(|raw| raw.trim().parse().ok()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub products: Vec<ProductWithCategory>,
    pub categories: Vec<CategoryWithCount>,
    pub recent_news: Vec<News>,
}

/// The product list alone, returned to asynchronous refreshes.
#[derive(Debug, Serialize)]
pub struct ProductFragment {
    pub products: Vec<ProductWithCategory>,
}
