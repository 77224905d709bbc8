//! Repository for the `yarns` table.

use sqlx::types::Json;
use sqlx::PgPool;
use stashbook_core::pagination::PageRequest;
use stashbook_core::types::DocId;
use uuid::Uuid;

use crate::models::photo::CatalogPhoto;
use crate::models::yarn::{CreateYarn, UpdateYarn, Yarn, YarnFilter, YarnWithUsage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, brand, yarn_type, fiber_content, color, lot_number, \
     length, length_unit, weight, weight_unit, price_per_unit, currency, \
     purchase_date, purchase_location, quantity_in_stash, notes, photos, \
     created_at, updated_at";

/// Number of projects whose `yarns_used` references the yarn.
const PROJECT_COUNT: &str = "(SELECT COUNT(*) FROM projects p
      WHERE p.yarns_used @> jsonb_build_array(jsonb_build_object('yarn_id', yarns.id)))
      AS project_count";

const FILTER: &str = "($1::text IS NULL OR brand = $1)
     AND ($2::text IS NULL OR yarn_type = $2)
     AND ($3::text IS NULL OR color = $3)";

/// Provides CRUD operations for yarns.
pub struct YarnRepo;

impl YarnRepo {
    /// Insert a new yarn. `input` is expected to be normalized already.
    pub async fn create(pool: &PgPool, input: &CreateYarn) -> Result<Yarn, sqlx::Error> {
        let query = format!(
            "INSERT INTO yarns (id, name, brand, yarn_type, fiber_content, color, lot_number,
                 length, length_unit, weight, weight_unit, price_per_unit, currency,
                 purchase_date, purchase_location, quantity_in_stash, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'meters'), $10,
                 COALESCE($11, 'grams'), $12, COALESCE($13, 'EUR'), $14, $15,
                 COALESCE($16, 1), $17)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Yarn>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.yarn_type)
            .bind(&input.fiber_content)
            .bind(&input.color)
            .bind(&input.lot_number)
            .bind(input.length)
            .bind(input.length_unit.map(|u| u.as_str()))
            .bind(input.weight)
            .bind(input.weight_unit.map(|u| u.as_str()))
            .bind(input.price_per_unit)
            .bind(&input.currency)
            .bind(input.purchase_date)
            .bind(&input.purchase_location)
            .bind(input.quantity_in_stash)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a yarn with its project count.
    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<YarnWithUsage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS}, {PROJECT_COUNT} FROM yarns WHERE id = $1");
        sqlx::query_as::<_, YarnWithUsage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every yarn whose id is in `ids`.
    pub async fn find_many(pool: &PgPool, ids: &[DocId]) -> Result<Vec<Yarn>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM yarns WHERE id = ANY($1)");
        sqlx::query_as::<_, Yarn>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// One page of yarns, most recently updated first, with project counts.
    pub async fn list(
        pool: &PgPool,
        filter: &YarnFilter,
        page: PageRequest,
    ) -> Result<(Vec<YarnWithUsage>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {PROJECT_COUNT} FROM yarns WHERE {FILTER}
             ORDER BY updated_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, YarnWithUsage>(&query)
            .bind(&filter.brand)
            .bind(&filter.yarn_type)
            .bind(&filter.color)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM yarns WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(&filter.brand)
            .bind(&filter.yarn_type)
            .bind(&filter.color)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Update a yarn. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DocId,
        input: &UpdateYarn,
    ) -> Result<Option<Yarn>, sqlx::Error> {
        let query = format!(
            "UPDATE yarns SET
                name = COALESCE($2, name),
                brand = COALESCE($3, brand),
                yarn_type = COALESCE($4, yarn_type),
                fiber_content = COALESCE($5, fiber_content),
                color = COALESCE($6, color),
                lot_number = COALESCE($7, lot_number),
                length = COALESCE($8, length),
                length_unit = COALESCE($9, length_unit),
                weight = COALESCE($10, weight),
                weight_unit = COALESCE($11, weight_unit),
                price_per_unit = COALESCE($12, price_per_unit),
                currency = COALESCE($13, currency),
                purchase_date = COALESCE($14, purchase_date),
                purchase_location = COALESCE($15, purchase_location),
                quantity_in_stash = COALESCE($16, quantity_in_stash),
                notes = COALESCE($17, notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Yarn>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.brand)
            .bind(&input.yarn_type)
            .bind(&input.fiber_content)
            .bind(&input.color)
            .bind(&input.lot_number)
            .bind(input.length)
            .bind(input.length_unit.map(|u| u.as_str()))
            .bind(input.weight)
            .bind(input.weight_unit.map(|u| u.as_str()))
            .bind(input.price_per_unit)
            .bind(&input.currency)
            .bind(input.purchase_date)
            .bind(&input.purchase_location)
            .bind(input.quantity_in_stash)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a yarn. Projects referencing it keep their usage items.
    pub async fn delete(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM yarns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append a photo. Returns `None` if the yarn does not exist.
    pub async fn add_photo(
        pool: &PgPool,
        id: DocId,
        photo: &CatalogPhoto,
    ) -> Result<Option<Yarn>, sqlx::Error> {
        let query = format!(
            "UPDATE yarns SET
                photos = photos || jsonb_build_array($2::jsonb),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Yarn>(&query)
            .bind(id)
            .bind(Json(photo))
            .fetch_optional(pool)
            .await
    }
}
