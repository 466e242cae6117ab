//! Shared application state handed to every handler

use crate::config::StorageConfig;
use crate::core::error::StorageError;
use crate::services::{BasketService, CupboardService, EmailService, UserService};
use crate::storage::{BasketStore, IdListFile, JsonFileStore};
use std::sync::Arc;

/// Services behind the REST routes.
///
/// Cloning is cheap: every service only holds `Arc`s to its stores.
#[derive(Clone)]
pub struct AppState {
    pub cupboard: CupboardService,
    pub baskets: BasketService,
    pub users: UserService,
    pub email: EmailService,
}

impl AppState {
    /// Open every store named in `storage` and wire the services together.
    ///
    /// The toy, user and basket files must already exist; the two id lists
    /// may be missing.
    pub fn open(storage: &StorageConfig, email: EmailService) -> Result<Self, StorageError> {
        let baskets = BasketService::new(Arc::new(BasketStore::open(&storage.baskets)?));
        let cupboard = CupboardService::new(
            Arc::new(JsonFileStore::open(&storage.toys)?),
            Arc::new(baskets.clone()),
        );
        let users = UserService::new(
            Arc::new(JsonFileStore::open(&storage.users)?),
            Arc::new(IdListFile::new(&storage.applications)),
            Arc::new(IdListFile::new(&storage.partners)),
        );

        Ok(Self {
            cupboard,
            baskets,
            users,
            email,
        })
    }
}
