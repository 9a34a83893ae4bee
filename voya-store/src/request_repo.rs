use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use voya_core::repository::TravelRequestRepository;
use voya_request::{RequestStatus, TravelRequest};

pub struct PostgresTravelRequestRepository {
    pool: PgPool,
}

impl PostgresTravelRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TravelRequestRow {
    id: Uuid,
    user_id: String,
    user_email: String,
    user_name: String,
    preferences: serde_json::Value,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TravelRequestRow {
    fn into_model(self) -> Result<TravelRequest, Box<dyn std::error::Error + Send + Sync>> {
        Ok(TravelRequest {
            id: self.id,
            user_id: self.user_id,
            user_email: self.user_email,
            user_name: self.user_name,
            preferences: serde_json::from_value(self.preferences)?,
            status: self.status.parse::<RequestStatus>()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, user_id, user_email, user_name, preferences, status, created_at, updated_at";

#[async_trait]
impl TravelRequestRepository for PostgresTravelRequestRepository {
    async fn insert(
        &self,
        request: &TravelRequest,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let preferences = serde_json::to_value(&request.preferences)?;

        sqlx::query(
            r#"
            INSERT INTO travel_requests (id, user_id, user_email, user_name, preferences, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(request.id)
        .bind(&request.user_id)
        .bind(&request.user_email)
        .bind(&request.user_name)
        .bind(preferences)
        .bind(request.status.to_string())
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<TravelRequest>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, TravelRequestRow>(&format!(
            "SELECT {} FROM travel_requests WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TravelRequestRow::into_model).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<TravelRequest>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, TravelRequestRow>(&format!(
            "SELECT {} FROM travel_requests WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TravelRequestRow::into_model).collect()
    }

    async fn list_all(
        &self,
    ) -> Result<Vec<TravelRequest>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, TravelRequestRow>(&format!(
            "SELECT {} FROM travel_requests ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TravelRequestRow::into_model).collect()
    }
}
