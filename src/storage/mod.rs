//! File-backed storage implementations

pub mod basket_store;
pub mod id_list;
pub mod json_file;

pub use basket_store::BasketStore;
pub use id_list::IdListFile;
pub use json_file::{JsonFileStore, Mutation};
