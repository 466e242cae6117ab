//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors return correct HTTP status codes
//! - Error responses carry no body
//! - Error conversions keep the category
//! - Error matching allows callers to handle specific cases

use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::path::PathBuf;
use ufund::prelude::*;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = UfundError::Entity(EntityError::NotFound {
            entity_type: "toy",
            id: 3,
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_entity_already_exists_returns_409() {
        let err = UfundError::Entity(EntityError::AlreadyExists {
            entity_type: "user",
            name: "admin".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_error_returns_500() {
        let err = UfundError::Validation(ValidationError::OutOfRange {
            field: "quantity",
            value: -1,
            message: "must not be negative",
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_partnership_error_returns_400() {
        let applied = UfundError::from(PartnershipError::AlreadyApplied { user_id: 2 });
        assert_eq!(applied.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_returns_500() {
        let err = UfundError::Storage(StorageError::Write {
            path: PathBuf::from("data/toys.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_email_error_returns_500() {
        let err = UfundError::Email(EmailError::NotConfigured);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let cases = [
            (
                UfundError::from(EntityError::not_found("basket", 1)),
                "ENTITY_NOT_FOUND",
            ),
            (
                UfundError::from(EntityError::AlreadyExists {
                    entity_type: "toy",
                    name: "Kite".to_string(),
                }),
                "ENTITY_ALREADY_EXISTS",
            ),
            (
                UfundError::from(PartnershipError::AlreadyApplied { user_id: 1 }),
                "ALREADY_APPLIED",
            ),
            (UfundError::from(EmailError::NotConfigured), "EMAIL_ERROR"),
        ];

        for (err, code) in cases {
            assert_eq!(err.error_code(), code, "{err}");
        }
    }
}

// =============================================================================
// Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_response_has_status_and_empty_body() {
        let response = UfundError::from(EntityError::not_found("user", 9)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_response_has_empty_body() {
        let response = UfundError::from(EmailError::InvalidAddress("nobody".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }
}

// =============================================================================
// Display Tests
// =============================================================================

mod display_tests {
    use super::*;

    #[test]
    fn test_messages_name_the_entity() {
        let err = UfundError::from(EntityError::not_found("toy", 3));
        assert_eq!(err.to_string(), "toy with id '3' not found");

        let err = UfundError::from(PartnershipError::AlreadyApplied { user_id: 4 });
        assert_eq!(err.to_string(), "user 4 has already applied for partnership");
    }

    #[test]
    fn test_storage_message_names_the_file() {
        let source = serde_json::from_str::<Vec<i32>>("[1,").unwrap_err();
        let err = UfundError::from(StorageError::Malformed {
            path: PathBuf::from("data/partners.json"),
            source,
        });
        assert!(err.to_string().contains("data/partners.json"));
    }
}
