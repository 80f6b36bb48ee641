use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::store::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: i64,
    pub level_id: i64,
    pub name_ar: String,
    pub name_en: String,
    pub order_index: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

impl Entity for Grade {
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
