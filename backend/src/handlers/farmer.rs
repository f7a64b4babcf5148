//! Farmer profile handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::farmer::UpdateProfileInput;
use crate::services::FarmerService;
use crate::AppState;
use shared::models::Farmer;

/// Get the authenticated farmer's profile
pub async fn get_my_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.db);
    let farmer = service.get_profile(current_user.0.id).await?;
    Ok(Json(farmer))
}

/// Update the authenticated farmer's profile
pub async fn update_my_profile(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<UpdateProfileInput>,
) -> AppResult<Json<Farmer>> {
    let service = FarmerService::new(state.db);
    let farmer = service.update_profile(current_user.0.id, input).await?;
    Ok(Json(farmer))
}
