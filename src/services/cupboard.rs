//! Cupboard (toy catalog) service.
//!
//! Besides plain catalog CRUD this service keeps baskets consistent with the
//! catalog: editing or deleting a toy is first mirrored into every basket
//! that holds it. The basket side runs as one locked pass over all baskets.
//! There is no transaction spanning the catalog and basket files, and nothing
//! is rolled back on a later failure.

use crate::core::error::{EntityError, Result};
use crate::core::service::{BasketDirectory, DataService};
use crate::core::Entity;
use crate::entities::Toy;
use crate::storage::JsonFileStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct CupboardService {
    toys: Arc<JsonFileStore<Toy>>,
    baskets: Arc<dyn BasketDirectory>,
}

impl CupboardService {
    pub fn new(toys: Arc<JsonFileStore<Toy>>, baskets: Arc<dyn BasketDirectory>) -> Self {
        Self { toys, baskets }
    }

    pub async fn all_toys(&self) -> Vec<Toy> {
        self.toys.list().await
    }

    pub async fn get_toy(&self, id: i32) -> Option<Toy> {
        self.toys.get(id).await
    }

    pub async fn find_toys(&self, name: Option<&str>) -> Vec<Toy> {
        self.toys.find(name).await
    }

    /// Add a toy to the catalog under a new id.
    ///
    /// Rejects a non-positive quantity or negative cost, then a name already
    /// used by another toy. The name check and the insert are one store call.
    pub async fn create_toy(&self, toy: Toy) -> Result<Toy> {
        toy.validate_new()?;

        let name = toy.name.clone();
        let Some(created) = self.toys.create_named(toy).await? else {
            return Err(EntityError::AlreadyExists {
                entity_type: Toy::entity_type(),
                name,
            }
            .into());
        };
        tracing::info!(toy_id = created.id, name = %created.name, "toy added to cupboard");
        Ok(created)
    }

    /// Update a catalog toy, mirroring the change into every basket first.
    ///
    /// Returns `None` when the catalog has no toy with that id. Setting the
    /// quantity to zero takes the toy out of the catalog after the update.
    pub async fn update_toy(&self, toy: Toy) -> Result<Option<Toy>> {
        toy.validate_update()?;

        self.update_toy_across_baskets(&toy).await?;
        let Some(updated) = self.toys.update(toy).await? else {
            return Ok(None);
        };

        if updated.quantity == 0 {
            tracing::info!(toy_id = updated.id, "toy out of stock, removing from cupboard");
            self.delete_toy(updated.id).await?;
        }
        Ok(Some(updated))
    }

    /// Delete a catalog toy after removing it from every basket
    pub async fn delete_toy(&self, id: i32) -> Result<bool> {
        self.remove_toy_from_baskets(id).await?;
        Ok(self.toys.delete(id).await?)
    }

    /// Overwrite name, cost and type of every basket entry for this toy and
    /// cap its quantity at the catalog quantity.
    pub async fn update_toy_across_baskets(&self, updated: &Toy) -> Result<usize> {
        tracing::info!(toy_id = updated.id, "updating toy across all baskets");
        self.baskets.sync_toy_everywhere(updated).await
    }

    /// Drop every basket entry for `toy_id`
    pub async fn remove_toy_from_baskets(&self, toy_id: i32) -> Result<usize> {
        tracing::info!(toy_id, "removing toy from all baskets");
        self.baskets.remove_toy_everywhere(toy_id).await
    }
}
