//! Service traits for entity stores and cross-store capabilities

use crate::core::entity::Entity;
use crate::core::error::{Result, StorageError};
use crate::entities::Toy;
use async_trait::async_trait;

/// Service trait for managing stored entities
///
/// Reads are served from memory and cannot fail; every mutation rewrites the
/// backing storage and reports the write failure, if any.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// List all entities, ordered by id
    async fn list(&self) -> Vec<T>;

    /// Get an entity by id
    async fn get(&self, id: i32) -> Option<T>;

    /// Store a new entity under a freshly assigned id
    ///
    /// Any id carried by `entity` is ignored.
    async fn create(&self, entity: T) -> Result<T, StorageError>;

    /// Replace an existing entity
    ///
    /// Returns `None` when no entity has the same id.
    async fn update(&self, entity: T) -> Result<Option<T>, StorageError>;

    /// Delete an entity, returning whether anything was removed
    async fn delete(&self, id: i32) -> Result<bool, StorageError>;
}

/// Basket access needed by the catalog to keep baskets in sync.
///
/// Each call edits every basket inside one critical section of the basket
/// store, so cart edits running at the same time are never overwritten.
#[async_trait]
pub trait BasketDirectory: Send + Sync {
    /// Mirror a catalog edit into every basket entry for `toy.id`.
    ///
    /// Returns how many baskets changed.
    async fn sync_toy_everywhere(&self, toy: &Toy) -> Result<usize>;

    /// Drop every entry for `toy_id` from every basket; returns how many
    /// baskets changed
    async fn remove_toy_everywhere(&self, toy_id: i32) -> Result<usize>;
}
