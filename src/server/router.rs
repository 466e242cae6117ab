//! Route table for the REST surface

use super::handlers::{self, baskets, toys, users};
use super::state::AppState;
use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete router.
///
/// Routes:
/// - `/toys`, `/toys/{id}`, `/toys/?name=` - cupboard catalog
/// - `/baskets`, `/baskets/{id}`, `/baskets/{id}/toys/{toy_id}`,
///   `/baskets/send-email` - funding baskets and receipts
/// - `/users`, `/users/{id}`, `/users/?name=`, `/users/id/{username}`,
///   `/users/{id}/apply-partnership`, `/users/{id}/makePartner`,
///   `/users/applications`, `/users/partners` - users and partnership
/// - `/health`
pub fn build_router(state: AppState, server: &ServerConfig) -> Result<Router> {
    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .merge(toy_routes())
        .merge(basket_routes())
        .merge(user_routes())
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    if let Some(cors) = cors_layer(&server.allowed_origins)? {
        app = app.layer(cors);
    }

    Ok(app.with_state(state))
}

fn toy_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/toys",
            get(toys::list_toys)
                .post(toys::create_toy)
                .put(toys::update_toy),
        )
        .route("/toys/", get(toys::search_toys))
        .route("/toys/{id}", get(toys::get_toy).delete(toys::delete_toy))
}

fn basket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/baskets",
            get(baskets::list_baskets).post(baskets::create_basket),
        )
        .route("/baskets/send-email", post(baskets::send_receipt))
        .route(
            "/baskets/{id}",
            get(baskets::get_basket)
                .post(baskets::add_toy)
                .delete(baskets::delete_basket),
        )
        .route("/baskets/{id}/toys/{toy_id}", delete(baskets::remove_toy))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route("/users/", get(users::search_users))
        .route("/users/applications", get(users::list_applications))
        .route("/users/partners", get(users::list_partners))
        .route("/users/id/{username}", get(users::user_id_by_name))
        .route("/users/{id}", get(users::get_user).delete(users::delete_user))
        .route(
            "/users/{id}/apply-partnership",
            post(users::apply_for_partnership),
        )
        .route("/users/{id}/makePartner", post(users::make_partner))
}

/// CORS for the configured origins; `None` when no origin is configured
fn cors_layer(origins: &[String]) -> Result<Option<CorsLayer>> {
    if origins.is_empty() {
        return Ok(None);
    }

    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([CONTENT_TYPE]),
    ))
}
