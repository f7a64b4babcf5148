//! Admin dashboard handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::dashboard::{DashboardStats, RegionSummary};
use crate::services::DashboardService;
use crate::AppState;
use shared::models::Farmer;

/// List all registered farmers
pub async fn list_farmers(State(state): State<AppState>) -> AppResult<Json<Vec<Farmer>>> {
    let service = DashboardService::new(state.db);
    let farmers = service.list_farmers().await?;
    Ok(Json(farmers))
}

/// Get headline dashboard statistics
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    let service = DashboardService::new(state.db);
    let stats = service.dashboard_stats().await?;
    Ok(Json(stats))
}

/// Get per-district aggregates for the region overview
pub async fn get_region_overview(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RegionSummary>>> {
    let service = DashboardService::new(state.db);
    let regions = service.region_overview().await?;
    Ok(Json(regions))
}

/// List farmers registered in a district
pub async fn get_farmers_by_district(
    State(state): State<AppState>,
    Path(district): Path<String>,
) -> AppResult<Json<Vec<Farmer>>> {
    let service = DashboardService::new(state.db);
    let farmers = service.farmers_by_district(&district).await?;
    Ok(Json(farmers))
}
