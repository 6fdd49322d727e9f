// 📡 Protocol Entity - HTTP, MQTT, Modbus, ...

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protocol {
    pub id: String,
    pub title: String,
}

impl Protocol {
    pub fn new(title: impl Into<String>) -> Self {
        Protocol {
            id: super::new_id(),
            title: title.into(),
        }
    }
}
