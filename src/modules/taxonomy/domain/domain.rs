use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::shared::store::Entity;

/// Top-level subject-area grouping (e.g. "Science & Technology").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationDomain {
    pub id: i64,
    pub name_ar: String,
    pub name_en: String,
    pub code: String,
    pub description_ar: String,
    pub description_en: String,
    pub created_at: NaiveDateTime,
}

impl Entity for EducationDomain {
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

/// Form input for creating a domain. Validated before it becomes a record.
#[derive(Debug, Clone, Default)]
pub struct DomainDraft {
    pub name_ar: String,
    pub name_en: String,
    pub code: String,
    pub description_ar: String,
    pub description_en: String,
}

impl DomainDraft {
    /// Record ready for an optimistic insert; the id is a placeholder until
    /// the server assigns one, and `createdAt` is provisional.
    pub fn into_record(self) -> EducationDomain {
        EducationDomain {
            id: 0,
            name_ar: self.name_ar,
            name_en: self.name_en,
            code: self.code,
            description_ar: self.description_ar,
            description_en: self.description_en,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
