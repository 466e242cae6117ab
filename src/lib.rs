//! # ufund
//!
//! REST backend for a crowdfunding cupboard: a catalog of toys that donors
//! fund through baskets, user accounts, and a partnership application
//! workflow. Every collection is kept in memory and mirrored to a JSON file.
//!
//! ## Layers
//!
//! - **Entities** (`entities`): `Toy`, `User`, `FundBasket`, `EmailRequest`
//! - **Storage** (`storage`): `JsonFileStore<T>` for id-keyed collections,
//!   `BasketStore` for basket edits, `IdListFile` for the partnership lists
//! - **Services** (`services`): catalog rules and basket cascades, users and
//!   partnership, baskets, receipt email
//! - **Server** (`server`): axum handlers, route table and `ServerBuilder`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ufund::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::from_yaml_file("ufund.yaml")?;
//!     ServerBuilder::new(config).serve().await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, Named},
        error::{EntityError, PartnershipError, StorageError, UfundError, ValidationError},
        service::{BasketDirectory, DataService},
    };

    // === Entities ===
    pub use crate::entities::{EmailRequest, FundBasket, Toy, User};

    // === Storage ===
    pub use crate::storage::{BasketStore, IdListFile, JsonFileStore, Mutation};

    // === Services ===
    pub use crate::services::{
        BasketService, CupboardService, EmailService, Mailer, SmtpMailer, UserService,
        email::EmailError,
    };

    // === Config ===
    pub use crate::config::{AppConfig, EmailConfig, ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
