use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::shared::api::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::store::RemoteCollection;

use super::model::{PendingTeacher, TeacherDetail};

/// Admin teacher-management endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeacherRemote: Send + Sync {
    async fn fetch_pending(&self) -> AppResult<Vec<PendingTeacher>>;

    async fn fetch_detail(&self, teacher_id: i64) -> AppResult<TeacherDetail>;

    /// Resolves to the envelope message (user-facing confirmation text).
    async fn approve_document(&self, teacher_id: i64, document_id: i64) -> AppResult<String>;

    async fn reject_document(
        &self,
        teacher_id: i64,
        document_id: i64,
        reason: &str,
    ) -> AppResult<String>;

    async fn block(&self, teacher_id: i64) -> AppResult<String>;
}

pub struct TeacherManagementApi {
    api: Arc<ApiClient>,
}

impl TeacherManagementApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TeacherRemote for TeacherManagementApi {
    async fn fetch_pending(&self) -> AppResult<Vec<PendingTeacher>> {
        // Plain array payload, unlike the paginated education listings.
        self.api
            .get_data("/Api/V1/Admin/TeacherManagement/Pending")
            .await
    }

    async fn fetch_detail(&self, teacher_id: i64) -> AppResult<TeacherDetail> {
        self.api
            .get_data(&format!("/Api/V1/Admin/TeacherManagement/{}", teacher_id))
            .await
    }

    async fn approve_document(&self, teacher_id: i64, document_id: i64) -> AppResult<String> {
        self.api
            .post_message(
                &format!(
                    "/Api/V1/Admin/TeacherManagement/{}/Documents/{}/Approve",
                    teacher_id, document_id
                ),
                None,
            )
            .await
    }

    async fn reject_document(
        &self,
        teacher_id: i64,
        document_id: i64,
        reason: &str,
    ) -> AppResult<String> {
        self.api
            .post_message(
                &format!(
                    "/Api/V1/Admin/TeacherManagement/{}/Documents/{}/Reject",
                    teacher_id, document_id
                ),
                Some(json!({ "rejectionReason": reason })),
            )
            .await
    }

    async fn block(&self, teacher_id: i64) -> AppResult<String> {
        self.api
            .post_message(
                &format!("/Api/V1/Admin/TeacherManagement/{}/Block", teacher_id),
                None,
            )
            .await
    }
}

/// Adapter exposing the pending listing as a loadable collection.
pub struct PendingTeachersSource {
    remote: Arc<dyn TeacherRemote>,
}

impl PendingTeachersSource {
    pub fn new(remote: Arc<dyn TeacherRemote>) -> Self {
        Self { remote }
    }
}

#[async_trait]
impl RemoteCollection<PendingTeacher> for PendingTeachersSource {
    async fn fetch_all(&self) -> AppResult<Vec<PendingTeacher>> {
        self.remote.fetch_pending().await
    }
}
