//! [`CatalogLookup`] over the catalog tables.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use stashbook_core::catalog::{CatalogLookup, HookSummary, NeedleSummary, YarnSummary};
use stashbook_core::error::CoreError;
use stashbook_core::types::DocId;

use crate::models::gauge::{Gauge, GaugeReferenceIds, GaugeReferences, GaugeView};
use crate::repositories::{internal, HookRepo, NeedleRepo, ProjectRepo, YarnRepo};

#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Resolve the project and catalog references of a batch of gauges.
    pub async fn gauge_references(&self, gauges: &[Gauge]) -> Result<GaugeReferences, CoreError> {
        let ids = GaugeReferenceIds::collect(gauges);
        let projects = ProjectRepo::find_summaries(&self.pool, &ids.projects)
            .await
            .map_err(internal)?;
        Ok(GaugeReferences {
            projects: projects.into_iter().map(|p| (p.id, p)).collect(),
            yarns: self.yarn_summaries(&ids.yarns).await?,
            needles: self.needle_summaries(&ids.needles).await?,
            hooks: self.hook_summaries(&ids.hooks).await?,
        })
    }

    pub async fn expand_gauges(&self, gauges: Vec<Gauge>) -> Result<Vec<GaugeView>, CoreError> {
        let refs = self.gauge_references(&gauges).await?;
        Ok(gauges
            .into_iter()
            .map(|gauge| GaugeView::expand(gauge, &refs))
            .collect())
    }

    pub async fn expand_gauge(&self, gauge: Gauge) -> Result<GaugeView, CoreError> {
        let refs = self.gauge_references(std::slice::from_ref(&gauge)).await?;
        Ok(GaugeView::expand(gauge, &refs))
    }
}

#[async_trait]
impl CatalogLookup for PgCatalog {
    async fn yarn_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, YarnSummary>, CoreError> {
        let yarns = YarnRepo::find_many(&self.pool, ids)
            .await
            .map_err(internal)?;
        Ok(yarns.iter().map(|y| (y.id, YarnSummary::from(y))).collect())
    }

    async fn needle_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, NeedleSummary>, CoreError> {
        let needles = NeedleRepo::find_many(&self.pool, ids)
            .await
            .map_err(internal)?;
        Ok(needles
            .iter()
            .map(|n| (n.id, NeedleSummary::from(n)))
            .collect())
    }

    async fn hook_summaries(
        &self,
        ids: &[DocId],
    ) -> Result<HashMap<DocId, HookSummary>, CoreError> {
        let hooks = HookRepo::find_many(&self.pool, ids)
            .await
            .map_err(internal)?;
        Ok(hooks.iter().map(|h| (h.id, HookSummary::from(h))).collect())
    }
}
