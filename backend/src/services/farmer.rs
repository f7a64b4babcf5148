//! Farmer profile service

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::auth::{ensure_not_registered, FarmerRow};
use shared::models::Farmer;
use shared::types::Language;
use shared::validation;

/// Farmer profile management
#[derive(Clone)]
pub struct FarmerService {
    db: PgPool,
}

/// Input for updating a farmer profile; absent fields are left untouched
#[derive(Debug, serde::Deserialize)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
    pub language: Option<Language>,
}

impl FarmerService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Fetch a farmer's own profile
    pub async fn get_profile(&self, farmer_id: Uuid) -> AppResult<Farmer> {
        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, name, phone, city, district, village, language, created_at, updated_at
            FROM farmers
            WHERE id = $1
            "#,
        )
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }

    /// Update a farmer's own profile
    ///
    /// Changing the phone number to one held by another farmer is a conflict.
    pub async fn update_profile(
        &self,
        farmer_id: Uuid,
        input: UpdateProfileInput,
    ) -> AppResult<Farmer> {
        let phone = match &input.phone {
            Some(phone) => {
                validation::validate_indian_phone(phone).map_err(|msg| AppError::Validation {
                    field: "phone".to_string(),
                    message: msg.to_string(),
                    message_hi: "मोबाइल नंबर मान्य नहीं है".to_string(),
                })?;
                let normalized = validation::normalize_phone(phone);

                let taken = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM farmers WHERE phone = $1 AND id <> $2",
                )
                .bind(&normalized)
                .bind(farmer_id)
                .fetch_one(&self.db)
                .await?;

                ensure_not_registered(taken, "phone number")?;
                Some(normalized)
            }
            None => None,
        };

        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            UPDATE farmers
            SET name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                city = COALESCE($4, city),
                district = COALESCE($5, district),
                village = COALESCE($6, village),
                language = COALESCE($7, language),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, phone, city, district, village, language, created_at, updated_at
            "#,
        )
        .bind(farmer_id)
        .bind(&input.name)
        .bind(&phone)
        .bind(&input.city)
        .bind(&input.district)
        .bind(&input.village)
        .bind(input.language.map(|l| l.code()))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Farmer".to_string()))?;

        Ok(row.into())
    }
}
