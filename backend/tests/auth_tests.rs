//! Authentication and authorization tests
//!
//! Covers session token round-trips, expiry handling, and the role
//! allow-list gate, exhaustively over both roles.

use proptest::prelude::*;
use uuid::Uuid;

use rootcause_backend::middleware::role_allowed;
use rootcause_backend::services::auth::TokenService;
use shared::types::Role;
use shared::validation;

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate valid Indian mobile numbers (10 digits, leading 6-9)
fn phone_strategy() -> impl Strategy<Value = String> {
    "[6-9][0-9]{9}"
}

/// Generate valid email addresses
fn email_strategy() -> impl Strategy<Value = String> {
    "[a-z]{5,10}@[a-z]{3,8}\\.(com|org|net|in)"
}

/// Generate valid passwords (8+ chars)
fn password_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9!@#$%]{8,20}"
}

/// Generate valid names
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z ]{3,50}"
}

fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Farmer), Just(Role::Admin)]
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    /// Every issued token verifies back to the same identifier and role.
    #[test]
    fn token_round_trip(role in role_strategy(), secret in "[a-z0-9]{16,32}") {
        let tokens = TokenService::from_parts(secret, 86_400);
        let id = Uuid::new_v4();

        let token = tokens.issue(id, role).unwrap();
        let claims = tokens.verify(&token).unwrap();

        prop_assert_eq!(claims.sub, id.to_string());
        prop_assert_eq!(claims.role, role);
        prop_assert_eq!(claims.exp - claims.iat, 86_400);
    }

    /// Generated phone numbers pass validation and survive normalization.
    #[test]
    fn generated_phones_validate(phone in phone_strategy()) {
        prop_assert!(validation::validate_indian_phone(&phone).is_ok());
        prop_assert_eq!(validation::normalize_phone(&phone), phone);
    }

    /// Generated registration inputs satisfy the account constraints.
    #[test]
    fn generated_admin_inputs_validate(
        email in email_strategy(),
        password in password_strategy(),
        name in name_strategy(),
    ) {
        prop_assert!(validation::validate_email(&email).is_ok());
        prop_assert!(validation::validate_password(&password).is_ok());
        prop_assert!(validation::validate_name(&name).is_ok());
    }

    /// The allow-list gate admits a role exactly when the list contains it.
    #[test]
    fn allow_list_decision_matches_membership(
        role in role_strategy(),
        allowed in prop::collection::vec(role_strategy(), 0..3),
    ) {
        prop_assert_eq!(role_allowed(role, &allowed), allowed.contains(&role));
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

/// Exhaustive gate decisions over {FARMER, ADMIN} x typical allow-lists
#[test]
fn role_gate_exhaustive() {
    let cases: &[(&[Role], Role, bool)] = &[
        (&[Role::Farmer], Role::Farmer, true),
        (&[Role::Farmer], Role::Admin, false),
        (&[Role::Admin], Role::Farmer, false),
        (&[Role::Admin], Role::Admin, true),
        (&[Role::Farmer, Role::Admin], Role::Farmer, true),
        (&[Role::Farmer, Role::Admin], Role::Admin, true),
    ];

    for (allowed, role, expected) in cases {
        assert_eq!(
            role_allowed(*role, allowed),
            *expected,
            "role {:?} against allow-list {:?}",
            role,
            allowed
        );
    }
}

#[test]
fn token_validity_is_exactly_one_day() {
    let tokens = TokenService::from_parts("test-secret", 86_400);
    let token = tokens.issue(Uuid::new_v4(), Role::Farmer).unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 86_400);
}

#[test]
fn expired_token_always_fails() {
    use rootcause_backend::error::AppError;

    // Issued with the expiry two days in the past
    let tokens = TokenService::from_parts("test-secret", -172_800);
    let token = tokens.issue(Uuid::new_v4(), Role::Admin).unwrap();

    assert!(matches!(
        tokens.verify(&token).unwrap_err(),
        AppError::TokenExpired
    ));
}

#[test]
fn tampered_token_fails() {
    use rootcause_backend::error::AppError;

    let tokens = TokenService::from_parts("test-secret", 86_400);
    let token = tokens.issue(Uuid::new_v4(), Role::Farmer).unwrap();

    // Flip a character in the signature segment
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert!(matches!(
        tokens.verify(&tampered).unwrap_err(),
        AppError::InvalidToken
    ));
}

#[test]
fn duplicate_registration_conflicts_and_issues_no_token() {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use rootcause_backend::error::AppError;
    use rootcause_backend::services::auth::ensure_not_registered;

    // A fresh phone or email passes the gate
    assert!(ensure_not_registered(0, "phone number").is_ok());
    assert!(ensure_not_registered(0, "email").is_ok());

    // Any existing holder aborts the signup before a token can be issued;
    // the conflict maps to 409 on the wire
    for field in ["phone number", "email"] {
        let err = ensure_not_registered(1, field).unwrap_err();
        assert!(matches!(err, AppError::DuplicateEntry(ref f) if f == field));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}

#[test]
fn role_claims_serialize_uppercase() {
    // The wire form of the role claim is the uppercase role name
    assert_eq!(
        serde_json::to_string(&Role::Farmer).unwrap(),
        "\"FARMER\""
    );
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
}
