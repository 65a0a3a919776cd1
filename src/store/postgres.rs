use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::OfferStore;
use crate::models::{
    date::{CareDate, NewCareDate},
    offer::{CreateOfferRequest, Offer},
};

const OFFER_SELECT: &str =
    r#"id, date_id, child_name, "group", taken_by_name, created_at, taken_at"#;

/// DB row struct: `group` is fetched as TEXT and parsed into the enum.
#[derive(Debug, FromRow)]
struct OfferRow {
    id: i64,
    date_id: i64,
    child_name: String,
    group: String,
    taken_by_name: Option<String>,
    created_at: DateTime<Utc>,
    taken_at: Option<DateTime<Utc>>,
}

impl TryFrom<OfferRow> for Offer {
    type Error = anyhow::Error;

    fn try_from(row: OfferRow) -> Result<Self, Self::Error> {
        Ok(Offer {
            id: row.id,
            date_id: row.date_id,
            child_name: row.child_name,
            group: row.group.parse()?,
            taken_by_name: row.taken_by_name,
            created_at: row.created_at,
            taken_at: row.taken_at,
        })
    }
}

/// PostgreSQL-backed store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferStore for PgStore {
    async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_dates(&self) -> anyhow::Result<Vec<CareDate>> {
        let dates = sqlx::query_as::<_, CareDate>(
            "SELECT id, date_value AS date, label FROM dates ORDER BY date_value ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }

    async fn insert_date(&self, date: &NewCareDate) -> anyhow::Result<CareDate> {
        let row = sqlx::query_as::<_, CareDate>(
            "INSERT INTO dates (date_value, label)
             VALUES ($1, $2)
             ON CONFLICT (date_value) DO UPDATE SET label = COALESCE(EXCLUDED.label, dates.label)
             RETURNING id, date_value AS date, label",
        )
        .bind(date.date)
        .bind(&date.label)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_offers(&self, date_id: i64) -> anyhow::Result<Vec<Offer>> {
        let rows = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT {OFFER_SELECT} FROM offers
             WHERE date_id = $1
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(date_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Offer::try_from).collect()
    }

    async fn insert_offer(&self, req: &CreateOfferRequest) -> anyhow::Result<Option<Offer>> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            r#"INSERT INTO offers (date_id, child_name, "group")
               SELECT d.id, $2, $3 FROM dates d WHERE d.id = $1
               RETURNING {OFFER_SELECT}"#
        ))
        .bind(req.date_id)
        .bind(&req.child_name)
        .bind(req.group.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Offer::try_from).transpose()
    }

    async fn mark_taken(&self, offer_id: i64, taker_name: &str) -> anyhow::Result<u64> {
        let result = sqlx::query(
            "UPDATE offers
             SET taken_by_name = $1, taken_at = NOW()
             WHERE id = $2 AND taken_by_name IS NULL",
        )
        .bind(taker_name)
        .bind(offer_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    async fn find_offer(&self, offer_id: i64) -> anyhow::Result<Option<Offer>> {
        let row = sqlx::query_as::<_, OfferRow>(&format!(
            "SELECT {OFFER_SELECT} FROM offers WHERE id = $1"
        ))
        .bind(offer_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Offer::try_from).transpose()
    }
}
