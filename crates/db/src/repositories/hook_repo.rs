//! Repository for the `hooks` table.

use sqlx::PgPool;
use stashbook_core::pagination::PageRequest;
use stashbook_core::types::DocId;
use uuid::Uuid;

use crate::models::hook::{CreateHook, Hook, HookFilter, UpdateHook};

const COLUMNS: &str =
    "id, size_mm, size_us, material, brand, price, currency, notes, created_at, updated_at";

const FILTER: &str = "($1::text IS NULL OR material = $1)
     AND ($2::text IS NULL OR brand = $2)
     AND ($3::float8 IS NULL OR size_mm = $3)";

/// Provides CRUD operations for crochet hooks.
pub struct HookRepo;

impl HookRepo {
    pub async fn create(pool: &PgPool, input: &CreateHook) -> Result<Hook, sqlx::Error> {
        let query = format!(
            "INSERT INTO hooks (id, size_mm, size_us, material, brand, price, currency, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'EUR'), $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hook>(&query)
            .bind(Uuid::now_v7())
            .bind(input.size_mm)
            .bind(&input.size_us)
            .bind(&input.material)
            .bind(&input.brand)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<Hook>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hooks WHERE id = $1");
        sqlx::query_as::<_, Hook>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_many(pool: &PgPool, ids: &[DocId]) -> Result<Vec<Hook>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM hooks WHERE id = ANY($1)");
        sqlx::query_as::<_, Hook>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        filter: &HookFilter,
        page: PageRequest,
    ) -> Result<(Vec<Hook>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hooks WHERE {FILTER}
             ORDER BY updated_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, Hook>(&query)
            .bind(&filter.material)
            .bind(&filter.brand)
            .bind(filter.size_mm)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM hooks WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&filter.material)
            .bind(&filter.brand)
            .bind(filter.size_mm)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn update(
        pool: &PgPool,
        id: DocId,
        input: &UpdateHook,
    ) -> Result<Option<Hook>, sqlx::Error> {
        let query = format!(
            "UPDATE hooks SET
                size_mm = COALESCE($2, size_mm),
                size_us = COALESCE($3, size_us),
                material = COALESCE($4, material),
                brand = COALESCE($5, brand),
                price = COALESCE($6, price),
                currency = COALESCE($7, currency),
                notes = COALESCE($8, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Hook>(&query)
            .bind(id)
            .bind(input.size_mm)
            .bind(&input.size_us)
            .bind(&input.material)
            .bind(&input.brand)
            .bind(input.price)
            .bind(&input.currency)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hooks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
