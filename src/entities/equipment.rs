// 🖧 Equipment - one model exposed on one port (a catalog entry)
//
// Not deduplicated: every linkable row produces its own record.

use super::{Model, Port};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,

    /// Foreign key → models.id
    pub model_id: String,

    /// Foreign key → ports.id
    pub port_id: String,

    /// No sheet column drives this yet, always published
    pub is_published: bool,
}

impl Equipment {
    pub fn new(model: &Model, port: &Port) -> Self {
        Equipment {
            id: super::new_id(),
            model_id: model.id.clone(),
            port_id: port.id.clone(),
            is_published: true,
        }
    }
}
