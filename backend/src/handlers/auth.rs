//! Authentication handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::services::auth::{AdminSignupInput, FarmerSignupInput};
use crate::services::AuthService;
use crate::AppState;
use shared::models::{Admin, Farmer};

#[derive(Deserialize)]
pub struct FarmerLoginRequest {
    pub phone: String,
}

#[derive(Serialize)]
pub struct FarmerAuthResponse {
    pub message: String,
    pub token: String,
    pub farmer: Farmer,
}

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminAuthResponse {
    pub message: String,
    pub token: String,
    pub admin: Admin,
}

/// Farmer signup endpoint handler
pub async fn farmer_signup(
    State(state): State<AppState>,
    Json(body): Json<FarmerSignupInput>,
) -> Result<(StatusCode, Json<FarmerAuthResponse>), AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let (token, farmer) = auth_service.farmer_signup(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(FarmerAuthResponse {
            message: "Farmer registered successfully".to_string(),
            token,
            farmer,
        }),
    ))
}

/// Farmer login endpoint handler (phone number only)
pub async fn farmer_login(
    State(state): State<AppState>,
    Json(body): Json<FarmerLoginRequest>,
) -> Result<Json<FarmerAuthResponse>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let (token, farmer) = auth_service.farmer_login(&body.phone).await?;

    Ok(Json(FarmerAuthResponse {
        message: "Farmer authenticated".to_string(),
        token,
        farmer,
    }))
}

/// Admin signup endpoint handler
pub async fn admin_signup(
    State(state): State<AppState>,
    Json(body): Json<AdminSignupInput>,
) -> Result<(StatusCode, Json<AdminAuthResponse>), AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let (token, admin) = auth_service.admin_signup(body).await?;

    Ok((
        StatusCode::CREATED,
        Json(AdminAuthResponse {
            message: "Admin registered successfully".to_string(),
            token,
            admin,
        }),
    ))
}

/// Admin login endpoint handler
pub async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<AdminAuthResponse>, AppError> {
    let auth_service = AuthService::new(state.db.clone(), &state.config);
    let (token, admin) = auth_service.admin_login(&body.email, &body.password).await?;

    Ok(Json(AdminAuthResponse {
        message: "Admin authenticated".to_string(),
        token,
        admin,
    }))
}
