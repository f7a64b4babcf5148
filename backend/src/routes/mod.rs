//! Route definitions for the RootCause Advisory Platform
//!
//! Protected route groups layer the authentication gate plus a role
//! allow-list; both are declared here, next to the routes they guard.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use shared::types::Role;

use crate::{
    handlers,
    middleware::{auth_middleware, require_roles},
    AppState,
};

const FARMER_ONLY: &[Role] = &[Role::Farmer];
const ADMIN_ONLY: &[Role] = &[Role::Admin];
const FARMER_OR_ADMIN: &[Role] = &[Role::Farmer, Role::Admin];

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Protected routes - farmer profile
        .nest("/farmer", farmer_routes(state.clone()))
        // Protected routes - ML predictions
        .nest("/predictions", prediction_routes(state.clone()))
        // Protected routes - weather reports
        .nest("/weather", weather_routes(state.clone()))
        // Protected routes - admin dashboards
        .nest("/admin", admin_routes(state))
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/farmer/signup", post(handlers::farmer_signup))
        .route("/farmer/login", post(handlers::farmer_login))
        .route("/admin/signup", post(handlers::admin_signup))
        .route("/admin/login", post(handlers::admin_login))
}

/// Farmer profile routes (FARMER only)
fn farmer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(handlers::get_my_profile).put(handlers::update_my_profile),
        )
        .route_layer(middleware::from_fn(|req, next| {
            require_roles(FARMER_ONLY, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// ML prediction routes (any authenticated principal)
fn prediction_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/disease", post(handlers::predict_disease))
        .route("/yield", post(handlers::predict_yield))
        .route_layer(middleware::from_fn(|req, next| {
            require_roles(FARMER_OR_ADMIN, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Weather report routes (any authenticated principal)
fn weather_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/:location", get(handlers::get_weather_report))
        .route_layer(middleware::from_fn(|req, next| {
            require_roles(FARMER_OR_ADMIN, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Admin dashboard routes (ADMIN only)
fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/farmers", get(handlers::list_farmers))
        .route("/stats", get(handlers::get_dashboard_stats))
        .route("/region-overview", get(handlers::get_region_overview))
        .route(
            "/districts/:district/farmers",
            get(handlers::get_farmers_by_district),
        )
        .route("/weather-alerts/:location", get(handlers::get_weather_report))
        .route_layer(middleware::from_fn(|req, next| {
            require_roles(ADMIN_ONLY, req, next)
        }))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
