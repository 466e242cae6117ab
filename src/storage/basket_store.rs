//! Basket storage: a JSON file store of funding baskets plus the cart
//! operations that edit a single basket in place.

use super::json_file::{JsonFileStore, Mutation};
use crate::core::error::{Result, StorageError};
use crate::core::service::DataService;
use crate::entities::{FundBasket, Toy};
use std::path::PathBuf;

/// File-backed store of [`FundBasket`]s
pub struct BasketStore {
    inner: JsonFileStore<FundBasket>,
}

impl BasketStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self {
            inner: JsonFileStore::open(path)?,
        })
    }

    pub async fn list(&self) -> Vec<FundBasket> {
        self.inner.list().await
    }

    pub async fn get(&self, id: i32) -> Option<FundBasket> {
        self.inner.get(id).await
    }

    /// Create an empty basket under a fresh id
    pub async fn create(&self) -> Result<FundBasket, StorageError> {
        self.inner.create(FundBasket::new(0)).await
    }

    /// Add `toy` to a basket, merging with an entry of the same identity.
    ///
    /// Returns the updated basket, or `None` if the basket does not exist. A
    /// merge whose quantity overflows is rejected and nothing is written.
    pub async fn add_toy(&self, basket_id: i32, toy: Toy) -> Result<Option<FundBasket>> {
        let added = self
            .inner
            .modify(|baskets| match baskets.get_mut(&basket_id) {
                Some(basket) => match basket.add_toy(toy) {
                    Ok(()) => Mutation::Changed(Ok(Some(basket.clone()))),
                    Err(err) => Mutation::Unchanged(Err(err)),
                },
                None => Mutation::Unchanged(Ok(None)),
            })
            .await??;
        Ok(added)
    }

    /// Remove the first entry for `toy_id` from a basket.
    ///
    /// False when either the basket or the toy is missing.
    pub async fn remove_toy(&self, basket_id: i32, toy_id: i32) -> Result<bool, StorageError> {
        self.inner
            .modify(|baskets| {
                let removed = baskets
                    .get_mut(&basket_id)
                    .and_then(|basket| basket.remove_toy(toy_id))
                    .is_some();
                if removed {
                    Mutation::Changed(true)
                } else {
                    Mutation::Unchanged(false)
                }
            })
            .await
    }

    /// Apply [`FundBasket::sync_toy`] to every basket in one locked pass.
    ///
    /// Returns the number of baskets holding the toy.
    pub async fn sync_toy_everywhere(&self, toy: &Toy) -> Result<usize, StorageError> {
        self.inner
            .modify(|baskets| {
                let changed = baskets
                    .values_mut()
                    .map(|basket| basket.sync_toy(toy))
                    .filter(|matched| *matched)
                    .count();
                changed_if_any(changed)
            })
            .await
    }

    /// Apply [`FundBasket::remove_all`] to every basket in one locked pass.
    ///
    /// Returns the number of baskets that lost at least one entry.
    pub async fn remove_toy_everywhere(&self, toy_id: i32) -> Result<usize, StorageError> {
        self.inner
            .modify(|baskets| {
                let changed = baskets
                    .values_mut()
                    .map(|basket| basket.remove_all(toy_id))
                    .filter(|removed| *removed > 0)
                    .count();
                changed_if_any(changed)
            })
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        self.inner.delete(id).await
    }
}

fn changed_if_any(count: usize) -> Mutation<usize> {
    if count > 0 {
        Mutation::Changed(count)
    } else {
        Mutation::Unchanged(0)
    }
}
