//! Typed error handling for the ufund API
//!
//! Every failure that can reach an HTTP handler is a [`UfundError`]. The
//! top-level enum only groups errors by category; each category carries its
//! own status code and machine-readable code so handlers never have to
//! reclassify an error coming up from a service or store.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing ids and duplicate names
//! - [`ValidationError`]: numeric fields outside their allowed range
//! - [`PartnershipError`]: partner application rules
//! - [`StorageError`]: reading or writing the backing JSON files
//! - [`EmailError`]: receipt delivery
//!
//! Error responses carry the status code only; the body is always empty.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;

pub use crate::services::email::EmailError;

/// Result alias used by the service layer
pub type Result<T, E = UfundError> = std::result::Result<T, E>;

/// The main error type of the API
#[derive(Debug, Error)]
pub enum UfundError {
    /// Missing or conflicting entities
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Invalid field values
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Partner application rules
    #[error(transparent)]
    Partnership(#[from] PartnershipError),

    /// Backing file failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Receipt delivery failures
    #[error(transparent)]
    Email(#[from] EmailError),
}

impl UfundError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            UfundError::Entity(e) => e.status_code(),
            UfundError::Validation(e) => e.status_code(),
            UfundError::Partnership(e) => e.status_code(),
            UfundError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            UfundError::Email(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            UfundError::Entity(e) => e.error_code(),
            UfundError::Validation(_) => "VALIDATION_ERROR",
            UfundError::Partnership(e) => e.error_code(),
            UfundError::Storage(_) => "STORAGE_ERROR",
            UfundError::Email(_) => "EMAIL_ERROR",
        }
    }
}

impl IntoResponse for UfundError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        status.into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups and creation
#[derive(Debug, Error)]
pub enum EntityError {
    /// No entity with this id
    #[error("{entity_type} with id '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: i32,
    },

    /// An entity with this name already exists
    #[error("{entity_type} named '{name}' already exists")]
    AlreadyExists {
        entity_type: &'static str,
        name: String,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &'static str, id: i32) -> Self {
        EntityError::NotFound { entity_type, id }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to field values
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A numeric field is outside its allowed range
    #[error("invalid {field} {value}: {message}")]
    OutOfRange {
        field: &'static str,
        value: i32,
        message: &'static str,
    },
}

impl ValidationError {
    /// Invalid catalog numbers have always been answered with a 500.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

// =============================================================================
// Partnership Errors
// =============================================================================

/// Errors raised by the partner application workflow
#[derive(Debug, Error)]
pub enum PartnershipError {
    /// The user already has a pending application
    #[error("user {user_id} has already applied for partnership")]
    AlreadyApplied { user_id: i32 },
}

impl PartnershipError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PartnershipError::AlreadyApplied { .. } => "ALREADY_APPLIED",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised while reading or writing a backing file
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file does not hold the expected JSON array
    #[error("malformed JSON in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// An in-memory value could not be encoded
    #[error("failed to encode {what}: {source}")]
    Encode {
        what: &'static str,
        source: serde_json::Error,
    },
}
