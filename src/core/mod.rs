//! Core module containing the traits and error types shared by every layer

pub mod entity;
pub mod error;
pub mod service;

pub use entity::{Entity, Named};
pub use error::{
    EntityError, PartnershipError, Result, StorageError, UfundError, ValidationError,
};
pub use service::{BasketDirectory, DataService};
