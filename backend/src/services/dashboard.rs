//! Admin dashboard aggregations
//!
//! All figures are computed from the farmers table at request time; nothing
//! is cached.

use serde::Serialize;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::auth::FarmerRow;
use shared::models::Farmer;

/// Admin dashboard service
#[derive(Clone)]
pub struct DashboardService {
    db: PgPool,
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_farmers: i64,
    pub districts_covered: i64,
    pub recent_signups: i64,
}

/// Per-district aggregate for the region overview
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct RegionSummary {
    pub district: String,
    pub farmer_count: i64,
    pub villages: i64,
}

impl DashboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all registered farmers, newest first
    pub async fn list_farmers(&self) -> AppResult<Vec<Farmer>> {
        let rows = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, name, phone, city, district, village, language, created_at, updated_at
            FROM farmers
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Headline statistics for the admin dashboard
    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let total_farmers =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers")
                .fetch_one(&self.db)
                .await?;

        let districts_covered =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT district) FROM farmers")
                .fetch_one(&self.db)
                .await?;

        let recent_signups = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM farmers WHERE created_at > NOW() - INTERVAL '30 days'",
        )
        .fetch_one(&self.db)
        .await?;

        Ok(DashboardStats {
            total_farmers,
            districts_covered,
            recent_signups,
        })
    }

    /// Farmer counts aggregated per district, largest first
    pub async fn region_overview(&self) -> AppResult<Vec<RegionSummary>> {
        let regions = sqlx::query_as::<_, RegionSummary>(
            r#"
            SELECT district, COUNT(*) AS farmer_count, COUNT(DISTINCT village) AS villages
            FROM farmers
            GROUP BY district
            ORDER BY farmer_count DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(regions)
    }

    /// All farmers registered in a given district
    pub async fn farmers_by_district(&self, district: &str) -> AppResult<Vec<Farmer>> {
        let rows = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT id, name, phone, city, district, village, language, created_at, updated_at
            FROM farmers
            WHERE district = $1
            ORDER BY name
            "#,
        )
        .bind(district)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
