//! Authentication middleware
//!
//! JWT authentication and role-based access control middleware.
//!
//! Protected routes pass through two sequential gates: `auth_middleware`
//! validates the bearer token (401 on failure), then `require_roles` checks
//! the principal's role against the route's allow-list (403 on failure).
//! Both gates are fail-closed. Authorization never consults the database;
//! the role embedded in the token at issuance time is authoritative.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use shared::types::Role;

use crate::error::ErrorResponse;
use crate::AppState;

/// Authenticated principal extracted from a session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: uuid::Uuid,
    pub role: Role,
}

/// Authentication middleware that validates JWT tokens
///
/// Verifies against the same configured secret the token issuer uses;
/// registered with `middleware::from_fn_with_state`.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => &header[7..],
        _ => {
            return unauthorized_response("Missing or invalid Authorization header");
        }
    };

    let claims = match decode_jwt(token, &state.config.jwt.secret) {
        Ok(claims) => claims,
        Err(msg) => {
            return unauthorized_response(&msg);
        }
    };

    let id = match uuid::Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => return unauthorized_response("Invalid principal ID in token"),
    };

    // Create AuthUser and insert into request extensions
    let auth_user = AuthUser {
        id,
        role: claims.role,
    };

    request.extensions_mut().insert(auth_user);

    next.run(request).await
}

/// Role allow-list gate, applied after `auth_middleware`
///
/// Usage in routes:
/// `.route_layer(middleware::from_fn(|req, next| require_roles(&[Role::Admin], req, next)))`
pub async fn require_roles(allowed: &'static [Role], request: Request, next: Next) -> Response {
    let Some(user) = request.extensions().get::<AuthUser>() else {
        return unauthorized_response("Authentication required");
    };

    if role_allowed(user.role, allowed) {
        next.run(request).await
    } else {
        forbidden_response(&format!(
            "Access restricted to roles: {}",
            allowed
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

/// Case-sensitive exact membership check against a route's allow-list
pub fn role_allowed(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// JWT claims structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct Claims {
    sub: String,
    role: Role,
    exp: i64,
    iat: i64,
}

/// Decode and validate JWT token
fn decode_jwt(token: &str, secret: &str) -> Result<Claims, String> {
    use jsonwebtoken::{decode, DecodingKey, Validation};

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("Invalid token: {}", e))
}

/// Create unauthorized response
fn unauthorized_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message_en: message.to_string(),
            message_hi: "प्रमाणीकरण आवश्यक है".to_string(),
            field: None,
        },
    };

    (StatusCode::UNAUTHORIZED, Json(error)).into_response()
}

/// Create forbidden response
fn forbidden_response(message: &str) -> Response {
    let error = ErrorResponse {
        error: crate::error::ErrorDetail {
            code: "FORBIDDEN".to_string(),
            message_en: message.to_string(),
            message_hi: "आपको इस संसाधन तक पहुँच की अनुमति नहीं है".to_string(),
            field: None,
        },
    };

    (StatusCode::FORBIDDEN, Json(error)).into_response()
}

/// Extractor for the authenticated principal
/// Use this in handlers to get the current user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                let error = ErrorResponse {
                    error: crate::error::ErrorDetail {
                        code: "UNAUTHORIZED".to_string(),
                        message_en: "Authentication required".to_string(),
                        message_hi: "प्रमाणीकरण आवश्यक है".to_string(),
                        field: None,
                    },
                };
                (StatusCode::UNAUTHORIZED, Json(error))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_membership_is_exhaustive() {
        let farmer_only: &[Role] = &[Role::Farmer];
        let admin_only: &[Role] = &[Role::Admin];
        let both: &[Role] = &[Role::Farmer, Role::Admin];

        assert!(role_allowed(Role::Farmer, farmer_only));
        assert!(!role_allowed(Role::Admin, farmer_only));
        assert!(role_allowed(Role::Admin, admin_only));
        assert!(!role_allowed(Role::Farmer, admin_only));
        assert!(role_allowed(Role::Farmer, both));
        assert!(role_allowed(Role::Admin, both));
    }

    #[test]
    fn empty_allow_list_denies_everyone() {
        assert!(!role_allowed(Role::Farmer, &[]));
        assert!(!role_allowed(Role::Admin, &[]));
    }
}
