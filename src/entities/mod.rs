// Entity Models
//
// Each entity has:
// - Stable identity (UUIDv4) assigned once, at first sighting
// - Immutable values for the duration of a run
// - A foreign key (by id) to its parent where the schema has one

pub mod brand;
pub mod model;
pub mod protocol;
pub mod port;
pub mod equipment;

pub use brand::Brand;
pub use model::Model;
pub use protocol::Protocol;
pub use port::{parse_port_value, Port};
pub use equipment::Equipment;

/// Generate a fresh entity identity
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
