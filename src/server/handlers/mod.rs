//! HTTP handlers, one module per resource
//!
//! Handlers only translate between HTTP and the services: every business
//! rule and every status decision beyond "found or not" lives below them.

pub mod baskets;
pub mod toys;
pub mod users;

use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

/// `?name=` filter of the search routes; absent means no filter
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
