use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use voya_core::repository::{QuoteRepository, ResponseOutcome};
use voya_quote::{Quote, QuoteDecision, QuoteStatus};

pub struct PostgresQuoteRepository {
    pool: PgPool,
}

impl PostgresQuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct QuoteRow {
    id: Uuid,
    request_id: Uuid,
    user_id: String,
    title: String,
    description: String,
    itinerary: String,
    price: f64,
    currency: String,
    valid_until: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl QuoteRow {
    fn into_model(self) -> Result<Quote, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Quote {
            id: self.id,
            request_id: self.request_id,
            user_id: self.user_id,
            title: self.title,
            description: self.description,
            itinerary: self.itinerary,
            price: self.price,
            currency: self.currency,
            valid_until: self.valid_until,
            status: self.status.parse::<QuoteStatus>()?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, request_id, user_id, title, description, itinerary, price, currency, valid_until, status, created_at, updated_at";

#[async_trait]
impl QuoteRepository for PostgresQuoteRepository {
    async fn create(
        &self,
        quote: &Quote,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO quotes (id, request_id, user_id, title, description, itinerary, price, currency, valid_until, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(quote.id)
        .bind(quote.request_id)
        .bind(&quote.user_id)
        .bind(&quote.title)
        .bind(&quote.description)
        .bind(&quote.itinerary)
        .bind(quote.price)
        .bind(&quote.currency)
        .bind(quote.valid_until)
        .bind(quote.status.to_string())
        .bind(quote.created_at)
        .bind(quote.updated_at)
        .execute(&mut *tx)
        .await?;

        let updated = sqlx::query(
            "UPDATE travel_requests SET status = 'quoted', updated_at = $2 WHERE id = $1",
        )
        .bind(quote.request_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls the insert back.
            return Err("referenced travel request not found".into());
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get(
        &self,
        id: Uuid,
    ) -> Result<Option<Quote>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, QuoteRow>(&format!(
            "SELECT {} FROM quotes WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(QuoteRow::into_model).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<Quote>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, QuoteRow>(&format!(
            "SELECT {} FROM quotes WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(QuoteRow::into_model).collect()
    }

    async fn respond(
        &self,
        id: Uuid,
        decision: QuoteDecision,
    ) -> Result<ResponseOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let status = decision.target_status();
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Compare-and-set: only a still-pending quote matches, so two
        // concurrent responders cannot both get a row back.
        let flipped: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE quotes SET status = $2, updated_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING request_id
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((request_id,)) = flipped else {
            return Ok(ResponseOutcome::NotPending);
        };

        sqlx::query("UPDATE travel_requests SET status = $2, updated_at = $3 WHERE id = $1")
            .bind(request_id)
            .bind(status.to_string())
            .bind(now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(ResponseOutcome::Applied)
    }
}
