//! Toy entity: one item of the cupboard catalog

use crate::core::ValidationError;
use crate::{impl_entity, impl_identity_eq};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fundable catalog item.
///
/// Two toys are the same toy when id and name match; quantity, cost and type
/// are payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toy {
    #[serde(default)]
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub cost: i32,
    #[serde(rename = "type")]
    pub toy_type: String,
}

impl_entity!(Toy, "toy", named);
impl_identity_eq!(Toy);

impl Toy {
    pub fn new(
        id: i32,
        name: impl Into<String>,
        quantity: i32,
        cost: i32,
        toy_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            cost,
            toy_type: toy_type.into(),
        }
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    pub fn type_is(&self, toy_type: &str) -> bool {
        self.toy_type == toy_type
    }

    /// Add `amount` units, refusing a total that does not fit in an `i32`
    pub fn increase_quantity(&mut self, amount: i32) -> Result<(), ValidationError> {
        self.quantity = self
            .quantity
            .checked_add(amount)
            .ok_or(ValidationError::OutOfRange {
                field: "quantity",
                value: amount,
                message: "total quantity is too large",
            })?;
        Ok(())
    }

    /// Rules for a toy entering the catalog: at least one unit, no negative cost
    pub fn validate_new(&self) -> Result<(), ValidationError> {
        if self.quantity <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                value: self.quantity,
                message: "must be positive",
            });
        }
        self.validate_cost()
    }

    /// Rules for an update: quantity may drop to zero, nothing may go negative
    pub fn validate_update(&self) -> Result<(), ValidationError> {
        if self.quantity < 0 {
            return Err(ValidationError::OutOfRange {
                field: "quantity",
                value: self.quantity,
                message: "must not be negative",
            });
        }
        self.validate_cost()
    }

    fn validate_cost(&self) -> Result<(), ValidationError> {
        if self.cost < 0 {
            return Err(ValidationError::OutOfRange {
                field: "cost",
                value: self.cost,
                message: "must not be negative",
            });
        }
        Ok(())
    }
}

impl fmt::Display for Toy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Toy [id={}, name={}, quantity={}, cost={}, type={}]",
            self.id, self.name, self.quantity, self.cost, self.toy_type
        )
    }
}
