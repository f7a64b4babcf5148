//! Authentication service for account registration, login, and token management
//!
//! Farmers authenticate by phone number alone; administrators by email and
//! bcrypt-hashed password. Both receive a stateless session token embedding
//! their identifier and role, valid for exactly one day.

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use shared::models::{Admin, Farmer};
use shared::types::{Language, Role};
use shared::validation;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Principal ID
    pub sub: String,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

/// Stateless session token issuance and verification
///
/// Pure over the signing secret and the clock; holds no server-side session
/// state. The embedded role is the sole source of authorization decisions.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    validity_secs: i64,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self::from_parts(config.jwt.secret.clone(), config.jwt.token_expiry)
    }

    pub fn from_parts(secret: impl Into<String>, validity_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            validity_secs,
        }
    }

    /// Issue a signed token binding a principal's identifier and role
    pub fn issue(&self, id: Uuid, role: Role) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: id.to_string(),
            role,
            exp: (now + Duration::seconds(self.validity_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Verify a token and return its claims
    ///
    /// Fails with a 401-class error on malformed, expired, or badly signed
    /// tokens.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    tokens: TokenService,
}

/// Input for registering a new farmer
#[derive(Debug, Deserialize)]
pub struct FarmerSignupInput {
    pub name: String,
    pub phone: String,
    pub city: String,
    pub district: String,
    pub village: String,
    pub language: Option<Language>,
}

/// Input for registering a new administrator
#[derive(Debug, Deserialize)]
pub struct AdminSignupInput {
    pub name: String,
    pub email: String,
    pub organisation_name: String,
    pub password: String,
    pub state: String,
}

/// Farmer row as stored in PostgreSQL
#[derive(Debug, sqlx::FromRow)]
pub struct FarmerRow {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub city: String,
    pub district: String,
    pub village: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            name: row.name,
            phone: row.phone,
            city: row.city,
            district: row.district,
            village: row.village,
            language: Language::from_code(&row.language),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Admin row as stored in PostgreSQL
#[derive(Debug, sqlx::FromRow)]
pub struct AdminRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub organisation_name: String,
    pub password_hash: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            name: row.name,
            email: row.email,
            organisation_name: row.organisation_name,
            state: row.state,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Reject registration when an account already holds the unique field
///
/// A conflict here aborts the signup before any token is issued.
pub fn ensure_not_registered(existing: i64, field: &str) -> AppResult<()> {
    if existing > 0 {
        return Err(AppError::DuplicateEntry(field.to_string()));
    }
    Ok(())
}

fn validate_admin_signup(input: &AdminSignupInput) -> AppResult<()> {
    validation::validate_name(&input.name).map_err(|msg| AppError::Validation {
        field: "name".to_string(),
        message: msg.to_string(),
        message_hi: "नाम मान्य नहीं है".to_string(),
    })?;
    validation::validate_name(&input.organisation_name).map_err(|msg| AppError::Validation {
        field: "organisation_name".to_string(),
        message: msg.to_string(),
        message_hi: "संगठन का नाम मान्य नहीं है".to_string(),
    })?;
    validation::validate_email(&input.email).map_err(|msg| AppError::Validation {
        field: "email".to_string(),
        message: msg.to_string(),
        message_hi: "ईमेल मान्य नहीं है".to_string(),
    })?;
    validation::validate_password(&input.password).map_err(|msg| AppError::Validation {
        field: "password".to_string(),
        message: msg.to_string(),
        message_hi: "पासवर्ड कम से कम 8 अक्षरों का होना चाहिए".to_string(),
    })?;
    Ok(())
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            tokens: TokenService::new(config),
        }
    }

    /// Register a new farmer and issue a FARMER session token
    pub async fn farmer_signup(&self, input: FarmerSignupInput) -> AppResult<(String, Farmer)> {
        validation::validate_name(&input.name).map_err(|msg| AppError::Validation {
            field: "name".to_string(),
            message: msg.to_string(),
            message_hi: "नाम मान्य नहीं है".to_string(),
        })?;
        validation::validate_indian_phone(&input.phone).map_err(|msg| AppError::Validation {
            field: "phone".to_string(),
            message: msg.to_string(),
            message_hi: "मोबाइल नंबर मान्य नहीं है".to_string(),
        })?;

        let phone = validation::normalize_phone(&input.phone);

        // Check if farmer already exists
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE phone = $1")
                .bind(&phone)
                .fetch_one(&self.db)
                .await?;
        ensure_not_registered(existing, "phone number")?;

        let language = input.language.unwrap_or_default();

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            INSERT INTO farmers (name, phone, city, district, village, language)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, phone, city, district, village, language, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&phone)
        .bind(&input.city)
        .bind(&input.district)
        .bind(&input.village)
        .bind(language.code())
        .fetch_one(&self.db)
        .await?;

        let token = self.tokens.issue(row.id, Role::Farmer)?;
        Ok((token, row.into()))
    }

    /// Authenticate a farmer by phone number
    pub async fn farmer_login(&self, phone: &str) -> AppResult<(String, Farmer)> {
        let phone = validation::normalize_phone(phone);

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, name, phone, city, district, village, language, created_at, updated_at
            FROM farmers
            WHERE phone = $1
            "#,
        )
        .bind(&phone)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "Phone number not registered. Please sign up first.".to_string(),
            message_hi: "यह मोबाइल नंबर पंजीकृत नहीं है। कृपया पहले साइन अप करें।".to_string(),
        })?;

        let token = self.tokens.issue(row.id, Role::Farmer)?;
        Ok((token, row.into()))
    }

    /// Register a new administrator and issue an ADMIN session token
    pub async fn admin_signup(&self, input: AdminSignupInput) -> AppResult<(String, Admin)> {
        validate_admin_signup(&input)?;

        // Check if admin already exists
        let existing =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admins WHERE email = $1")
                .bind(&input.email)
                .fetch_one(&self.db)
                .await?;
        ensure_not_registered(existing, "email")?;

        // Hash password
        let password_hash = hash(&input.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            INSERT INTO admins (name, email, organisation_name, password_hash, state)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, organisation_name, password_hash, state, created_at, updated_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.organisation_name)
        .bind(&password_hash)
        .bind(&input.state)
        .fetch_one(&self.db)
        .await?;

        let token = self.tokens.issue(row.id, Role::Admin)?;
        Ok((token, row.into()))
    }

    /// Authenticate an administrator with email and password
    pub async fn admin_login(&self, email: &str, password: &str) -> AppResult<(String, Admin)> {
        let row = sqlx::query_as::<_, AdminRow>(
            r#"
            SELECT id, name, email, organisation_name, password_hash, state, created_at, updated_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        // Verify password
        let valid = verify(password, &row.password_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(row.id, Role::Admin)?;
        Ok((token, row.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let tokens = TokenService::from_parts("test-secret", 86_400);
        let id = Uuid::new_v4();

        let token = tokens.issue(id, Role::Farmer).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.role, Role::Farmer);
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn expired_token_is_rejected() {
        // Validity two days in the past, well beyond the default leeway
        let tokens = TokenService::from_parts("test-secret", -172_800);
        let token = tokens.issue(Uuid::new_v4(), Role::Admin).unwrap();

        let err = tokens.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::TokenExpired));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = TokenService::from_parts("secret-a", 86_400);
        let verifier = TokenService::from_parts("secret-b", 86_400);

        let token = issuer.issue(Uuid::new_v4(), Role::Farmer).unwrap();
        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = TokenService::from_parts("test-secret", 86_400);
        assert!(matches!(
            tokens.verify("not.a.token").unwrap_err(),
            AppError::InvalidToken
        ));
    }

    #[test]
    fn existing_account_blocks_registration() {
        assert!(ensure_not_registered(0, "phone number").is_ok());
        assert!(matches!(
            ensure_not_registered(1, "phone number").unwrap_err(),
            AppError::DuplicateEntry(ref field) if field == "phone number"
        ));
    }

    fn admin_input() -> AdminSignupInput {
        AdminSignupInput {
            name: "Asha Rao".to_string(),
            email: "asha@agridept.in".to_string(),
            organisation_name: "State Agriculture Department".to_string(),
            password: "long-enough".to_string(),
            state: "Karnataka".to_string(),
        }
    }

    #[test]
    fn admin_signup_requires_a_name() {
        let input = AdminSignupInput {
            name: "   ".to_string(),
            ..admin_input()
        };
        assert!(matches!(
            validate_admin_signup(&input).unwrap_err(),
            AppError::Validation { ref field, .. } if field == "name"
        ));
    }

    #[test]
    fn admin_signup_requires_an_organisation_name() {
        let input = AdminSignupInput {
            organisation_name: String::new(),
            ..admin_input()
        };
        assert!(matches!(
            validate_admin_signup(&input).unwrap_err(),
            AppError::Validation { ref field, .. } if field == "organisation_name"
        ));
    }

    #[test]
    fn well_formed_admin_input_passes() {
        assert!(validate_admin_signup(&admin_input()).is_ok());
    }
}
