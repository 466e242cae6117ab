//! Funding basket entity: an anonymous cart of toys addressed by id

use super::Toy;
use crate::core::ValidationError;
use crate::impl_entity;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A funding basket.
///
/// Holds at most one entry per toy identity; adding a toy that is already
/// present bumps its quantity instead of appending a second entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundBasket {
    pub id: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub basket: Vec<Toy>,
}

impl_entity!(FundBasket, "basket");

impl FundBasket {
    /// Create an empty basket
    pub fn new(id: i32) -> Self {
        Self {
            id,
            basket: Vec::new(),
        }
    }

    pub fn toys(&self) -> &[Toy] {
        &self.basket
    }

    pub fn is_empty(&self) -> bool {
        self.basket.is_empty()
    }

    /// Add a toy, merging into an existing entry with the same identity.
    ///
    /// Fails without touching the basket when the merged quantity overflows.
    pub fn add_toy(&mut self, toy: Toy) -> Result<(), ValidationError> {
        match self.basket.iter_mut().find(|entry| **entry == toy) {
            Some(entry) => entry.increase_quantity(toy.quantity)?,
            None => self.basket.push(toy),
        }
        Ok(())
    }

    /// Remove the first entry for `toy_id`
    pub fn remove_toy(&mut self, toy_id: i32) -> Option<Toy> {
        let index = self.basket.iter().position(|entry| entry.id == toy_id)?;
        Some(self.basket.remove(index))
    }

    /// Remove every entry for `toy_id`, returning how many were dropped
    pub fn remove_all(&mut self, toy_id: i32) -> usize {
        let before = self.basket.len();
        self.basket.retain(|entry| entry.id != toy_id);
        before - self.basket.len()
    }

    /// Mirror a catalog edit into every entry for the same toy id.
    ///
    /// Name, cost and type follow the catalog. Quantity only ever goes down:
    /// an entry is capped at the catalog quantity but never raised to it.
    /// Returns whether any entry matched.
    pub fn sync_toy(&mut self, updated: &Toy) -> bool {
        let mut matched = false;
        for entry in self.basket.iter_mut().filter(|entry| entry.id == updated.id) {
            entry.name.clone_from(&updated.name);
            if entry.quantity >= updated.quantity {
                entry.quantity = updated.quantity;
            }
            entry.cost = updated.cost;
            entry.toy_type.clone_from(&updated.toy_type);
            matched = true;
        }
        matched
    }
}

impl fmt::Display for FundBasket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let toys: Vec<String> = self.basket.iter().map(ToString::to_string).collect();
        write!(f, "Funding Basket: [id={}, basket=[{}]]", self.id, toys.join(", "))
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Toy>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Toy>>::deserialize(deserializer)?.unwrap_or_default())
}
