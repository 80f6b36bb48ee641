use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::store::Entity;

/// A named program of study under a domain (e.g. "IGCSE").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Curriculum {
    pub id: i64,
    pub name_ar: String,
    pub name_en: String,
    pub country: String,
    pub domain_id: i64,
    pub description_ar: String,
    pub description_en: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl Entity for Curriculum {
    fn key(&self) -> i64 {
        self.id
    }

    fn with_key(&self, key: i64) -> Self {
        Self {
            id: key,
            ..self.clone()
        }
    }
}
