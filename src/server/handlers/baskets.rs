//! Funding basket routes under `/baskets`

use crate::core::error::{EntityError, UfundError};
use crate::core::Entity;
use crate::entities::{EmailRequest, FundBasket, Toy};
use crate::server::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_baskets(State(state): State<AppState>) -> Json<Vec<FundBasket>> {
    Json(state.baskets.all_baskets().await)
}

pub async fn get_basket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<FundBasket>, UfundError> {
    state
        .baskets
        .get_basket(id)
        .await
        .map(Json)
        .ok_or_else(|| EntityError::not_found(FundBasket::entity_type(), id).into())
}

pub async fn create_basket(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<FundBasket>), UfundError> {
    let basket = state.baskets.create_basket().await?;
    Ok((StatusCode::CREATED, Json(basket)))
}

pub async fn add_toy(
    State(state): State<AppState>,
    Path(basket_id): Path<i32>,
    Json(toy): Json<Toy>,
) -> Result<Json<FundBasket>, UfundError> {
    state
        .baskets
        .add_toy(basket_id, toy)
        .await?
        .map(Json)
        .ok_or_else(|| EntityError::not_found(FundBasket::entity_type(), basket_id).into())
}

pub async fn remove_toy(
    State(state): State<AppState>,
    Path((basket_id, toy_id)): Path<(i32, i32)>,
) -> Result<StatusCode, UfundError> {
    if state.baskets.remove_toy(basket_id, toy_id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(EntityError::not_found(Toy::entity_type(), toy_id).into())
    }
}

pub async fn delete_basket(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, UfundError> {
    if state.baskets.delete_basket(id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(EntityError::not_found(FundBasket::entity_type(), id).into())
    }
}

pub async fn send_receipt(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<StatusCode, UfundError> {
    state.email.send_receipt(&request).await?;
    Ok(StatusCode::OK)
}
