//! Repository for the `gauges` table.

use sqlx::types::Json;
use sqlx::PgPool;
use stashbook_core::pagination::PageRequest;
use stashbook_core::types::DocId;
use uuid::Uuid;

use crate::models::gauge::{CreateGauge, Gauge, GaugeFilter, UpdateGauge};
use crate::models::photo::CatalogPhoto;

const COLUMNS: &str = "id, project_id, name, gauge_type, comments, yarn_id, needle_id, hook_id, \
     stitches, rows, width_cm, height_cm, photos, created_at, updated_at";

const FILTER: &str = "($1::uuid IS NULL OR project_id = $1) AND ($2::text IS NULL OR gauge_type = $2)";

/// Provides CRUD operations for gauge swatches.
pub struct GaugeRepo;

impl GaugeRepo {
    pub async fn create(pool: &PgPool, input: &CreateGauge) -> Result<Gauge, sqlx::Error> {
        let query = format!(
            "INSERT INTO gauges (id, project_id, name, gauge_type, comments, yarn_id,
                 needle_id, hook_id, stitches, rows, width_cm, height_cm)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gauge>(&query)
            .bind(Uuid::now_v7())
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.gauge_type.as_str())
            .bind(&input.comments)
            .bind(input.yarn_id)
            .bind(input.needle_id)
            .bind(input.hook_id)
            .bind(input.stitches)
            .bind(input.rows)
            .bind(input.width_cm)
            .bind(input.height_cm)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DocId) -> Result<Option<Gauge>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM gauges WHERE id = $1");
        sqlx::query_as::<_, Gauge>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of gauges, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &GaugeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Gauge>, i64), sqlx::Error> {
        let gauge_type = filter.gauge_type.map(|t| t.as_str());
        let query = format!(
            "SELECT {COLUMNS} FROM gauges WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, Gauge>(&query)
            .bind(filter.project_id)
            .bind(gauge_type)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM gauges WHERE {FILTER}");
        let (total,): (i64,) = sqlx::query_as(&count_query)
            .bind(filter.project_id)
            .bind(gauge_type)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    pub async fn update(
        pool: &PgPool,
        id: DocId,
        input: &UpdateGauge,
    ) -> Result<Option<Gauge>, sqlx::Error> {
        let query = format!(
            "UPDATE gauges SET
                project_id = COALESCE($2, project_id),
                name = COALESCE($3, name),
                gauge_type = COALESCE($4, gauge_type),
                comments = COALESCE($5, comments),
                yarn_id = COALESCE($6, yarn_id),
                needle_id = COALESCE($7, needle_id),
                hook_id = COALESCE($8, hook_id),
                stitches = COALESCE($9, stitches),
                rows = COALESCE($10, rows),
                width_cm = COALESCE($11, width_cm),
                height_cm = COALESCE($12, height_cm),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gauge>(&query)
            .bind(id)
            .bind(input.project_id)
            .bind(&input.name)
            .bind(input.gauge_type.map(|t| t.as_str()))
            .bind(&input.comments)
            .bind(input.yarn_id)
            .bind(input.needle_id)
            .bind(input.hook_id)
            .bind(input.stitches)
            .bind(input.rows)
            .bind(input.width_cm)
            .bind(input.height_cm)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DocId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM gauges WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn add_photo(
        pool: &PgPool,
        id: DocId,
        photo: &CatalogPhoto,
    ) -> Result<Option<Gauge>, sqlx::Error> {
        let query = format!(
            "UPDATE gauges SET
                photos = photos || jsonb_build_array($2::jsonb),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Gauge>(&query)
            .bind(id)
            .bind(Json(photo))
            .fetch_optional(pool)
            .await
    }
}
