//! Photo metadata attached to catalog yarns and gauges.

use serde::{Deserialize, Serialize};
use stashbook_core::error::CoreError;
use stashbook_core::types::{DocId, Timestamp};
use stashbook_core::validation::validate_input;
use uuid::Uuid;
use validator::Validate;

/// A photo stored inside a yarn or gauge row's `photos` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPhoto {
    pub id: DocId,
    pub file_path: String,
    pub is_primary: bool,
    pub caption: Option<String>,
    pub taken_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCatalogPhoto {
    #[validate(length(min = 1))]
    pub file_path: String,
    #[serde(default)]
    pub is_primary: bool,
    #[validate(length(max = 500))]
    pub caption: Option<String>,
    pub taken_at: Option<Timestamp>,
}

impl CatalogPhoto {
    pub fn from_input(mut input: NewCatalogPhoto, now: Timestamp) -> Result<Self, CoreError> {
        input.file_path = input.file_path.trim().to_string();
        validate_input(&input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            file_path: input.file_path,
            is_primary: input.is_primary,
            caption: input.caption,
            taken_at: input.taken_at,
            created_at: now,
        })
    }
}
