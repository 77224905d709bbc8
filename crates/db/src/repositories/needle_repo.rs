//! Repository for the `needles` table.

use sqlx::PgPool;
use stashbook_core::pagination::PageRequest;
use stashbook_core::types::DocId;
use uuid::Uuid;

use crate::models::needle::{CreateNeedle, Needle, NeedleFilter, UpdateNeedle};

const COLUMNS: &str = "id, size_mm, size_us, needle_type, length_cm, material, brand, price, \
     currency, notes, created_at, updated_at";

const FILTER: &str = "($1::text IS NULL OR needle_type = $1)
     AND ($2::float8 IS NULL OR size_mm = $2)
     AND ($3::text IS NULL OR material = $3)
     AND ($4::text IS NULL OR brand = $4)";

/// Provides CRUD operations for needles.
pub struct NeedleRepo;

impl NeedleRepo {
    pub async fn create(pool: &PgPool, input: &CreateNeedle) -> Result<Needle, sqlx::Error> {
        let query = format!(
            "INSERT INTO needles (id, size_mm, size_us, needle_type, length_cm, material,
                 brand, price, currency, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'EUR'), $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Needle>(&query)
            .bind(Uuid::now_v7())
            .bind(input.size_mm)
            .bind(&input.size_us)
            .bind(input.needle_type.as_str())
            .bind(input.length_cm)
            .bind(&input.material)
            .bind(&input.brand)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<Needle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM needles WHERE id = $1");
        sqlx::query_as::<_, Needle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_many(pool: &PgPool, ids: &[DocId]) -> Result<Vec<Needle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM needles WHERE id = ANY($1)");
        sqlx::query_as::<_, Needle>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &NeedleFilter,
        page: PageRequest,
    ) -> Result<(Vec<Needle>, i64), sqlx::Error> {
        let needle_type = filter.needle_type.map(|t| t.as_str());
        let query = format!(
            "SELECT {COLUMNS} FROM needles WHERE {FILTER}
             ORDER BY updated_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, Needle>(&query)
            .bind(needle_type)
            .bind(filter.size_mm)
            .bind(&filter.material)
            .bind(&filter.brand)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM needles WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(needle_type)
            .bind(filter.size_mm)
            .bind(&filter.material)
            .bind(&filter.brand)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn update(
        pool: &PgPool,
        id: DocId,
        input: &UpdateNeedle,
    ) -> Result<Option<Needle>, sqlx::Error> {
        let query = format!(
            "UPDATE needles SET
                size_mm = COALESCE($2, size_mm),
                size_us = COALESCE($3, size_us),
                needle_type = COALESCE($4, needle_type),
                length_cm = COALESCE($5, length_cm),
                material = COALESCE($6, material),
                brand = COALESCE($7, brand),
                price = COALESCE($8, price),
                currency = COALESCE($9, currency),
                notes = COALESCE($10, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Needle>(&query)
            .bind(id)
            .bind(input.size_mm)
            .bind(&input.size_us)
            .bind(input.needle_type.map(|t| t.as_str()))
            .bind(input.length_cm)
            .bind(&input.material)
            .bind(&input.brand)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM needles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
