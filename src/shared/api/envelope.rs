//! Wire shapes shared by every Qalam API endpoint.
//!
//! Each response is wrapped in [`ApiEnvelope`]; list endpoints carry a
//! [`Page`] inside `data`. `succeeded: false` is an application-level
//! failure regardless of the HTTP status, and `message` is the user-facing
//! error text.

use serde::{Deserialize, Serialize};

use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub status_code: i32,
    pub succeeded: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
    #[serde(default)]
    pub meta: Option<PageMeta>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps `data`, treating an absent payload as a malformed response.
    pub fn require_data(self) -> AppResult<T> {
        self.data.ok_or_else(|| {
            AppError::SerializationError("response envelope has no data".to_string())
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_count: i64,
    pub page_number: i32,
    pub page_size: i32,
    pub total_pages: i32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

/// Paginated list payload used by the education collection endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page_number: i32,
    pub page_size: i32,
    pub total_pages: i32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}
