//! Crochet hook catalog entity model and DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stashbook_core::catalog::HookSummary;
use stashbook_core::error::CoreError;
use stashbook_core::query_filter::FilterParams;
use stashbook_core::types::{DocId, Timestamp};
use stashbook_core::validation::{empty_patch, normalize_currency, validate_input};
use validator::Validate;

use crate::models::all_none;

/// A row from the `hooks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Hook {
    pub id: DocId,
    pub size_mm: f64,
    pub size_us: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Hook> for HookSummary {
    fn from(hook: &Hook) -> Self {
        HookSummary {
            id: hook.id,
            size_mm: hook.size_mm,
            size_us: hook.size_us.clone(),
            material: hook.material.clone(),
            brand: hook.brand.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateHook {
    #[validate(range(exclusive_min = 0.0))]
    pub size_mm: f64,
    pub size_us: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub currency: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl CreateHook {
    pub fn new(size_mm: f64) -> Self {
        Self {
            size_mm,
            size_us: None,
            material: None,
            brand: None,
            price: None,
            currency: None,
            notes: None,
        }
    }

    pub fn normalize(&mut self) -> Result<(), CoreError> {
        validate_input(&*self)?;
        self.currency = Some(normalize_currency(self.currency.as_deref())?);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateHook {
    #[validate(range(exclusive_min = 0.0))]
    pub size_mm: Option<f64>,
    pub size_us: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub currency: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl UpdateHook {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        if all_none!(
            self;
            size_mm, size_us, material, brand, price, currency, notes,
        ) {
            return Err(empty_patch());
        }
        validate_input(&*self)?;
        self.currency = self
            .currency
            .as_deref()
            .map(|c| normalize_currency(Some(c)))
            .transpose()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HookFilter {
    pub material: Option<String>,
    pub brand: Option<String>,
    pub size_mm: Option<f64>,
}

impl HookFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        let mut values = FilterParams::from_query(params);
        let filter = Self {
            material: values.text("material"),
            brand: values.text("brand"),
            size_mm: values.parse("size_mm")?,
        };
        values.finish()?;
        Ok(filter)
    }
}
