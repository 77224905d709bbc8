//! Repository for the `conversions` table.

use sqlx::PgPool;
use stashbook_core::pagination::PageRequest;
use stashbook_core::types::DocId;
use uuid::Uuid;

use crate::models::conversion::{Conversion, ConversionFilter, CreateConversion, UpdateConversion};

const COLUMNS: &str = "id, gauge_id, name, comments, from_value, from_unit, to_value, to_unit, \
     created_at, updated_at";

/// Provides CRUD operations for conversions.
pub struct ConversionRepo;

impl ConversionRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateConversion,
    ) -> Result<Conversion, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversions (id, gauge_id, name, comments, from_value, from_unit,
                 to_value, to_unit)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversion>(&query)
            .bind(Uuid::now_v7())
            .bind(input.gauge_id)
            .bind(&input.name)
            .bind(&input.comments)
            .bind(input.from_value)
            .bind(input.from_unit.as_str())
            .bind(input.to_value)
            .bind(input.to_unit.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<Conversion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversions WHERE id = $1");
        sqlx::query_as::<_, Conversion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of conversions, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &ConversionFilter,
        page: PageRequest,
    ) -> Result<(Vec<Conversion>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversions
             WHERE ($1::uuid IS NULL OR gauge_id = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Conversion>(&query)
            .bind(filter.gauge_id)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM conversions WHERE ($1::uuid IS NULL OR gauge_id = $1)",
        )
        .bind(filter.gauge_id)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Every conversion of one gauge, newest first.
    pub async fn list_by_gauge(
        pool: &PgPool,
        gauge_id: DocId,
    ) -> Result<Vec<Conversion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversions WHERE gauge_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Conversion>(&query)
            .bind(gauge_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DocId,
        input: &UpdateConversion,
    ) -> Result<Option<Conversion>, sqlx::Error> {
        let query = format!(
            "UPDATE conversions SET
                gauge_id = COALESCE($2, gauge_id),
                name = COALESCE($3, name),
                comments = COALESCE($4, comments),
                from_value = COALESCE($5, from_value),
                from_unit = COALESCE($6, from_unit),
                to_value = COALESCE($7, to_value),
                to_unit = COALESCE($8, to_unit),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversion>(&query)
            .bind(id)
            .bind(input.gauge_id)
            .bind(&input.name)
            .bind(&input.comments)
            .bind(input.from_value)
            .bind(input.from_unit.map(|u| u.as_str()))
            .bind(input.to_value)
            .bind(input.to_unit.map(|u| u.as_str()))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM conversions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
