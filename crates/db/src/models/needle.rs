//! Needle catalog entity model and DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stashbook_core::catalog::NeedleSummary;
use stashbook_core::enums::NeedleType;
use stashbook_core::error::CoreError;
use stashbook_core::query_filter::FilterParams;
use stashbook_core::types::{DocId, Timestamp};
use stashbook_core::validation::{empty_patch, normalize_currency, validate_input};
use validator::Validate;

use crate::models::all_none;

/// A row from the `needles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Needle {
    pub id: DocId,
    pub size_mm: f64,
    pub size_us: Option<String>,
    #[sqlx(try_from = "String")]
    pub needle_type: NeedleType,
    pub length_cm: Option<f64>,
    pub material: Option<String>,
    pub brand: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Needle> for NeedleSummary {
    fn from(needle: &Needle) -> Self {
        NeedleSummary {
            id: needle.id,
            size_mm: needle.size_mm,
            size_us: needle.size_us.clone(),
            needle_type: needle.needle_type,
            material: needle.material.clone(),
            brand: needle.brand.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNeedle {
    #[validate(range(exclusive_min = 0.0))]
    pub size_mm: f64,
    pub size_us: Option<String>,
    pub needle_type: NeedleType,
    #[validate(range(min = 0.0))]
    pub length_cm: Option<f64>,
    pub material: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub currency: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl CreateNeedle {
    pub fn new(size_mm: f64, needle_type: NeedleType) -> Self {
        Self {
            size_mm,
            size_us: None,
            needle_type,
            length_cm: None,
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
pub struct UpdateNeedle {
    #[validate(range(exclusive_min = 0.0))]
    pub size_mm: Option<f64>,
    pub size_us: Option<String>,
    pub needle_type: Option<NeedleType>,
    #[validate(range(min = 0.0))]
    pub length_cm: Option<f64>,
    pub material: Option<String>,
    pub brand: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub currency: Option<String>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

impl UpdateNeedle {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        if all_none!(
            self;
            size_mm, size_us, needle_type, length_cm, material, brand, price, currency, notes,
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
pub struct NeedleFilter {
    pub needle_type: Option<NeedleType>,
    pub size_mm: Option<f64>,
    pub material: Option<String>,
    pub brand: Option<String>,
}

impl NeedleFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        let mut values = FilterParams::from_query(params);
        let filter = Self {
            needle_type: values.parse("needle_type")?,
            size_mm: values.parse("size_mm")?,
            material: values.text("material"),
            brand: values.text("brand"),
        };
        values.finish()?;
        Ok(filter)
    }
}
