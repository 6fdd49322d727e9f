// 📦 Model Entity - a product line under one brand

use super::Brand;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,

    /// Foreign key → brands.id
    pub brand_id: String,

    pub title: String,
}

impl Model {
    /// Create a model owned by `brand`
    pub fn new(title: impl Into<String>, brand: &Brand) -> Self {
        Model {
            id: super::new_id(),
            brand_id: brand.id.clone(),
            title: title.into(),
        }
    }
}
