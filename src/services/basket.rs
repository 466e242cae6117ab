//! Basket service: funding basket operations used by the basket routes and,
//! through [`BasketDirectory`], by the catalog.

use crate::core::error::Result;
use crate::core::service::BasketDirectory;
use crate::entities::{FundBasket, Toy};
use crate::storage::BasketStore;
use async_trait::async_trait;
use std::sync::Arc;

#[derive(Clone)]
pub struct BasketService {
    store: Arc<BasketStore>,
}

impl BasketService {
    pub fn new(store: Arc<BasketStore>) -> Self {
        Self { store }
    }

    pub async fn all_baskets(&self) -> Vec<FundBasket> {
        self.store.list().await
    }

    pub async fn get_basket(&self, id: i32) -> Option<FundBasket> {
        self.store.get(id).await
    }

    pub async fn create_basket(&self) -> Result<FundBasket> {
        let basket = self.store.create().await?;
        tracing::info!(basket_id = basket.id, "basket created");
        Ok(basket)
    }

    pub async fn add_toy(&self, basket_id: i32, toy: Toy) -> Result<Option<FundBasket>> {
        self.store.add_toy(basket_id, toy).await
    }

    pub async fn remove_toy(&self, basket_id: i32, toy_id: i32) -> Result<bool> {
        Ok(self.store.remove_toy(basket_id, toy_id).await?)
    }

    pub async fn delete_basket(&self, id: i32) -> Result<bool> {
        Ok(self.store.delete(id).await?)
    }
}

#[async_trait]
impl BasketDirectory for BasketService {
    async fn sync_toy_everywhere(&self, toy: &Toy) -> Result<usize> {
        let changed = self.store.sync_toy_everywhere(toy).await?;
        if changed > 0 {
            tracing::debug!(toy_id = toy.id, baskets = changed, "basket entries updated");
        }
        Ok(changed)
    }

    async fn remove_toy_everywhere(&self, toy_id: i32) -> Result<usize> {
        let changed = self.store.remove_toy_everywhere(toy_id).await?;
        if changed > 0 {
            tracing::info!(toy_id, baskets = changed, "toy removed from baskets");
        }
        Ok(changed)
    }
}
