// 🏷️ Brand Entity - equipment manufacturer
//
// "Brand title is the dedup KEY, Brand UUID is the IDENTITY"
// Models reference brands by id, never by title.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Stable identity (UUID)
    pub id: String,

    /// Manufacturer name as written in the sheet
    pub title: String,
}

impl Brand {
    /// Create new brand entity with UUID
    pub fn new(title: impl Into<String>) -> Self {
        Brand {
            id: super::new_id(),
            title: title.into(),
        }
    }
}
