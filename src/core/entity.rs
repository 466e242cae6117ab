//! Entity traits defining the core abstraction for stored records

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base trait for every record kept in a JSON file store.
///
/// All entities have:
/// - id: integer identifier assigned by the store on creation
/// - type: entity type name used in logs and errors (e.g., "toy", "user")
///
/// Entities are plain data: the store owns them, clones them out on reads and
/// replaces them wholesale on updates.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The singular entity type name (e.g., "toy", "basket")
    fn entity_type() -> &'static str;

    /// Get the identifier of this entity instance
    fn id(&self) -> i32;

    /// Overwrite the identifier (used by the store when assigning ids)
    fn set_id(&mut self, id: i32);
}

/// Trait for entities that carry a human-readable name.
///
/// Named entities can be searched by substring and are checked for duplicate
/// names on creation.
pub trait Named: Entity {
    fn name(&self) -> &str;

    /// Case-sensitive substring match; `None` matches everything
    fn name_contains(&self, text: Option<&str>) -> bool {
        text.is_none_or(|t| self.name().contains(t))
    }
}
