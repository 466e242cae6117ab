//! User and partnership routes under `/users`

use super::NameQuery;
use crate::core::error::{EntityError, UfundError};
use crate::core::Entity;
use crate::entities::User;
use crate::server::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.users.all_users().await)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>, UfundError> {
    state
        .users
        .get_user(id)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found(User::entity_type(), id).into())
}

/// Always 200: the body is the id, or `-1` when nobody has that name
pub async fn user_id_by_name(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<i32> {
    Json(state.users.user_id_by_name(&username).await)
}

pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Json<Vec<User>> {
    Json(state.users.find_users(query.name.as_deref()).await)
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<User>), UfundError> {
    let created = state.users.create_user(user).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<Json<User>, UfundError> {
    let id = user.id;
    state
        .users
        .update_user(user)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found(User::entity_type(), id).into())
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, UfundError> {
    if state.users.delete_user(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(EntityError::not_found(User::entity_type(), id).into())
    }
}

pub async fn apply_for_partnership(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, UfundError> {
    state.users.apply_for_partnership(id).await?;
    Ok(StatusCode::OK)
}

pub async fn make_partner(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, UfundError> {
    state.users.make_partner(id).await?;
    Ok(StatusCode::OK)
}

pub async fn list_applications(State(state): State<AppState>) -> Result<Json<Vec<i32>>, UfundError> {
    Ok(Json(state.users.applications().await?))
}

pub async fn list_partners(State(state): State<AppState>) -> Result<Json<Vec<i32>>, UfundError> {
    Ok(Json(state.users.partners().await?))
}
