//! Unit conversion records attached to a gauge.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stashbook_core::enums::ConversionUnit;
use stashbook_core::error::CoreError;
use stashbook_core::query_filter::FilterParams;
use stashbook_core::types::{DocId, Timestamp};
use stashbook_core::validation::{empty_patch, trim_optional, validate_input};
use validator::Validate;

use crate::models::all_none;

/// A row from the `conversions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversion {
    pub id: DocId,
    pub gauge_id: DocId,
    pub name: Option<String>,
    pub comments: Option<String>,
    pub from_value: f64,
    #[sqlx(try_from = "String")]
    pub from_unit: ConversionUnit,
    pub to_value: f64,
    #[sqlx(try_from = "String")]
    pub to_unit: ConversionUnit,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConversion {
    pub gauge_id: DocId,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub comments: Option<String>,
    #[validate(range(min = 0.0))]
    pub from_value: f64,
    pub from_unit: ConversionUnit,
    #[validate(range(min = 0.0))]
    pub to_value: f64,
    pub to_unit: ConversionUnit,
}

impl CreateConversion {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        self.name = trim_optional(self.name.take());
        validate_input(&*self)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateConversion {
    pub gauge_id: Option<DocId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub comments: Option<String>,
    #[validate(range(min = 0.0))]
    pub from_value: Option<f64>,
    pub from_unit: Option<ConversionUnit>,
    #[validate(range(min = 0.0))]
    pub to_value: Option<f64>,
    pub to_unit: Option<ConversionUnit>,
}

impl UpdateConversion {
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        if all_none!(self; gauge_id, name, comments, from_value, from_unit, to_value, to_unit) {
            return Err(empty_patch());
        }
        self.name = self.name.take().map(|n| n.trim().to_string());
        validate_input(&*self)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionFilter {
    pub gauge_id: Option<DocId>,
}

impl ConversionFilter {
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, CoreError> {
        let mut values = FilterParams::from_query(params);
        let filter = Self {
            gauge_id: values.id("gauge")?,
        };
        values.finish()?;
        Ok(filter)
    }
}
