//! Yarn catalog entity model and DTOs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use stashbook_core::catalog::YarnSummary;
use stashbook_core::enums::{LengthUnit, WeightUnit};
use stashbook_core::error::CoreError;
use stashbook_core::query_filter::FilterParams;
use stashbook_core::types::{Date, DocId, Timestamp};
use stashbook_core::validation::{empty_patch, normalize_currency, trim_optional, validate_input};
use validator::Validate;

use crate::models::all_none;
use crate::models::photo::CatalogPhoto;

/// A row from the `yarns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Yarn {
    pub id: DocId,
    pub name: String,
    pub brand: Option<String>,
    pub yarn_type: Option<String>,
    pub fiber_content: Option<String>,
    pub color: Option<String>,
    pub lot_number: Option<String>,
    pub length: Option<f64>,
    #[sqlx(try_from = "String")]
    pub length_unit: LengthUnit,
    pub weight: Option<f64>,
    #[sqlx(try_from = "String")]
    pub weight_unit: WeightUnit,
    pub price_per_unit: Option<f64>,
    pub currency: String,
    pub purchase_date: Option<Date>,
    pub purchase_location: Option<String>,
    pub quantity_in_stash: i32,
    pub notes: Option<String>,
    pub photos: Json<Vec<CatalogPhoto>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Yarn> for YarnSummary {
    fn from(yarn: &Yarn) -> Self {
        YarnSummary {
            id: yarn.id,
            name: yarn.name.clone(),
            brand: yarn.brand.clone(),
            yarn_type: yarn.yarn_type.clone(),
            color: yarn.color.clone(),
        }
    }
}

/// A yarn with the number of projects that use it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct YarnWithUsage {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub yarn: Yarn,
    pub project_count: i64,
}

/// DTO for creating a yarn.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateYarn {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub brand: Option<String>,
    pub yarn_type: Option<String>,
    pub fiber_content: Option<String>,
    pub color: Option<String>,
    pub lot_number: Option<String>,
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,
    /// Defaults to meters.
    pub length_unit: Option<LengthUnit>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    /// Defaults to grams.
    pub weight_unit: Option<WeightUnit>,
    #[validate(range(min = 0.0))]
    pub price_per_unit: Option<f64>,
    pub currency: Option<String>,
    pub purchase_date: Option<Date>,
    pub purchase_location: Option<String>,
    #[validate(range(min = 0))]
    pub quantity_in_stash: Option<i32>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl CreateYarn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand: None,
            yarn_type: None,
            fiber_content: None,
            color: None,
            lot_number: None,
            length: None,
            length_unit: None,
            weight: None,
            weight_unit: None,
            price_per_unit: None,
            currency: None,
            purchase_date: None,
            purchase_location: None,
            quantity_in_stash: None,
            notes: None,
        }
    }

    /// Trim, validate and fill the currency default.
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        self.name = self.name.trim().to_string();
        self.brand = trim_optional(self.brand.take());
        self.color = trim_optional(self.color.take());
        validate_input(&*self)?;
        self.currency = Some(normalize_currency(self.currency.as_deref())?);
        Ok(())
    }
}

/// DTO for updating a yarn. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateYarn {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub brand: Option<String>,
    pub yarn_type: Option<String>,
    pub fiber_content: Option<String>,
    pub color: Option<String>,
    pub lot_number: Option<String>,
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,
    pub length_unit: Option<LengthUnit>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    pub weight_unit: Option<WeightUnit>,
    #[validate(range(min = 0.0))]
    pub price_per_unit: Option<f64>,
    pub currency: Option<String>,
    pub purchase_date: Option<Date>,
    pub purchase_location: Option<String>,
    #[validate(range(min = 0))]
    pub quantity_in_stash: Option<i32>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

impl UpdateYarn {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        if all_none!(
            self;
            name, brand, yarn_type, fiber_content, color, lot_number, length, length_unit,
            weight, weight_unit, price_per_unit, currency, purchase_date, purchase_location,
            quantity_in_stash, notes,
        ) {
            return Err(empty_patch());
        }
        self.name = self.name.take().map(|n| n.trim().to_string());
        validate_input(&*self)?;
        self.currency = self
            .currency
            .as_deref()
            .map(|c| normalize_currency(Some(c)))
            .transpose()?;
        Ok(())
    }
}

/// Exact-match filters for yarn listings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YarnFilter {
    pub brand: Option<String>,
    pub yarn_type: Option<String>,
    pub color: Option<String>,
}

impl YarnFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        let mut values = FilterParams::from_query(params);
        let filter = Self {
            brand: values.text("brand"),
            yarn_type: values.text("yarn_type"),
            color: values.text("color"),
        };
        values.finish()?;
        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn normalize_fills_currency_and_trims() {
        let mut input = CreateYarn::new("  Worsted Merino ");
        input.currency = Some("gbp".into());
        input.brand = Some("   ".into());
        input.normalize().unwrap();
        assert_eq!(input.name, "Worsted Merino");
        assert_eq!(input.currency.as_deref(), Some("GBP"));
        assert_eq!(input.brand, None);
    }

    #[test]
    fn normalize_rejects_negative_stash() {
        let mut input = CreateYarn::new("Merino");
        input.quantity_in_stash = Some(-1);
        assert_matches!(input.normalize(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn filter_reads_known_keys() {
        let params: HashMap<String, String> = [("brand", "Drops"), ("page", "1")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let filter = YarnFilter::from_query(&params).unwrap();
        assert_eq!(filter.brand.as_deref(), Some("Drops"));
        assert_eq!(filter.color, None);
    }
}
