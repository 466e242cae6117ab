//! Cupboard routes under `/toys`

use super::NameQuery;
use crate::core::error::{EntityError, UfundError};
use crate::core::Entity;
use crate::entities::Toy;
use crate::server::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_toys(State(state): State<AppState>) -> Json<Vec<Toy>> {
    Json(state.cupboard.all_toys().await)
}

pub async fn get_toy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Toy>, UfundError> {
    state
        .cupboard
        .get_toy(id)
        .await
        .map(Json)
        .ok_or_else(|| EntityError::not_found(Toy::entity_type(), id).into())
}

pub async fn search_toys(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Json<Vec<Toy>> {
    Json(state.cupboard.find_toys(query.name.as_deref()).await)
}

pub async fn create_toy(
    State(state): State<AppState>,
    Json(toy): Json<Toy>,
) -> Result<(StatusCode, Json<Toy>), UfundError> {
    let created = state.cupboard.create_toy(toy).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_toy(
    State(state): State<AppState>,
    Json(toy): Json<Toy>,
) -> Result<Json<Toy>, UfundError> {
    let id = toy.id;
    state
        .cupboard
        .update_toy(toy)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found(Toy::entity_type(), id).into())
}

pub async fn delete_toy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, UfundError> {
    if state.cupboard.delete_toy(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(EntityError::not_found(Toy::entity_type(), id).into())
    }
}
