use parking_lot::RwLock;
use std::sync::Arc;

use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::store::{EntityStore, OptimisticMutation};

use super::api::{PendingTeachersSource, TeacherRemote};
use super::model::{PendingTeacher, TeacherDetail, TeacherStatus, VerificationStatus};

/// Teacher-verification workflow: the pending-registrations store, the
/// currently open detail record, and the optimistic review actions.
///
/// Document review and blocking follow the same shape as the taxonomy
/// actions: apply locally, confirm against the server, refetch the
/// affected state on success, restore on failure.
pub struct TeacherService {
    remote: Arc<dyn TeacherRemote>,
    pending: EntityStore<PendingTeacher>,
    detail: Arc<RwLock<Option<TeacherDetail>>>,
}

impl TeacherService {
    pub fn new(remote: Arc<dyn TeacherRemote>) -> Self {
        let pending = EntityStore::new(
            "pending-teachers",
            Arc::new(PendingTeachersSource::new(remote.clone())),
        );
        Self {
            remote,
            pending,
            detail: Arc::new(RwLock::new(None)),
        }
    }

    pub fn pending(&self) -> &EntityStore<PendingTeacher> {
        &self.pending
    }

    pub async fn load_pending(&self) -> AppResult<usize> {
        self.pending.load().await
    }

    /// Fetches a teacher's full record and makes it the open detail.
    pub async fn open_detail(&self, teacher_id: i64) -> AppResult<TeacherDetail> {
        let detail = self.remote.fetch_detail(teacher_id).await?;
        *self.detail.write() = Some(detail.clone());
        Ok(detail)
    }

    pub fn detail(&self) -> Option<TeacherDetail> {
        self.detail.read().clone()
    }

    pub async fn approve_document(
        &self,
        teacher_id: i64,
        document_id: i64,
    ) -> AppResult<String> {
        let mutation = self.patch_document(
            "teacher.document-approve",
            teacher_id,
            document_id,
            VerificationStatus::Approved,
            None,
        )?;

        match self.remote.approve_document(teacher_id, document_id).await {
            Ok(message) => {
                mutation.commit();
                self.refresh_detail(teacher_id).await?;
                log_info!("Approved document {} for teacher {}", document_id, teacher_id);
                Ok(message)
            }
            Err(err) => {
                mutation.roll_back();
                Err(err)
            }
        }
    }

    pub async fn reject_document(
        &self,
        teacher_id: i64,
        document_id: i64,
        reason: String,
    ) -> AppResult<String> {
        if reason.trim().is_empty() {
            return Err(AppError::ValidationError(
                "A rejection reason is required".to_string(),
            ));
        }

        let mutation = self.patch_document(
            "teacher.document-reject",
            teacher_id,
            document_id,
            VerificationStatus::Rejected,
            Some(reason.clone()),
        )?;

        match self
            .remote
            .reject_document(teacher_id, document_id, &reason)
            .await
        {
            Ok(message) => {
                mutation.commit();
                self.refresh_detail(teacher_id).await?;
                log_info!("Rejected document {} for teacher {}", document_id, teacher_id);
                Ok(message)
            }
            Err(err) => {
                mutation.roll_back();
                Err(err)
            }
        }
    }

    /// Blocks a teacher. The pending row flips to blocked immediately; the
    /// listing is refetched once the server confirms.
    pub async fn block_teacher(&self, teacher_id: i64) -> AppResult<String> {
        let patched = self
            .pending
            .mutate_local(teacher_id, |t| t.status = TeacherStatus::Blocked);

        let undo: Box<dyn FnOnce() + Send> = match patched {
            Some((before, after)) => {
                let store = self.pending.clone();
                Box::new(move || store.restore(teacher_id, &after, before))
            }
            // Row not cached (e.g. blocking straight from the detail page);
            // there is no optimistic state to restore.
            None => Box::new(|| {}),
        };
        let mutation = OptimisticMutation::begin("teacher.block", undo);

        match self.remote.block(teacher_id).await {
            Ok(message) => {
                mutation.commit();
                self.pending.load().await?;
                self.refresh_detail(teacher_id).await?;
                log_info!("Blocked teacher {}", teacher_id);
                Ok(message)
            }
            Err(err) => {
                mutation.roll_back();
                Err(err)
            }
        }
    }

    /// Applies a review verdict to the open detail and returns the mutation
    /// guard whose undo restores the previous detail state. When the detail
    /// is not open for this teacher there is nothing to patch locally and
    /// the undo is a no-op.
    fn patch_document(
        &self,
        label: &'static str,
        teacher_id: i64,
        document_id: i64,
        verdict: VerificationStatus,
        reason: Option<String>,
    ) -> AppResult<OptimisticMutation> {
        let before = {
            let mut guard = self.detail.write();
            match guard.as_mut() {
                Some(detail) if detail.teacher_id == teacher_id => {
                    let before = detail.clone();
                    let document = detail
                        .documents
                        .iter_mut()
                        .find(|d| d.id == document_id)
                        .ok_or_else(|| {
                            AppError::NotFound(format!(
                                "document {} is not on teacher {}",
                                document_id, teacher_id
                            ))
                        })?;
                    document.verification_status = verdict;
                    document.rejection_reason = reason;
                    detail.recount_documents();
                    Some(before)
                }
                _ => None,
            }
        };

        let detail = self.detail.clone();
        Ok(OptimisticMutation::begin(label, move || {
            if let Some(before) = before {
                let mut guard = detail.write();
                if matches!(guard.as_ref(), Some(d) if d.teacher_id == teacher_id) {
                    *guard = Some(before);
                }
            }
        }))
    }

    /// Conservative refresh: refetch the open detail after a confirmed
    /// action so the local copy converges on the authoritative state.
    async fn refresh_detail(&self, teacher_id: i64) -> AppResult<()> {
        let is_open =
            matches!(self.detail.read().as_ref(), Some(d) if d.teacher_id == teacher_id);
        if is_open {
            let fresh = self.remote.fetch_detail(teacher_id).await?;
            *self.detail.write() = Some(fresh);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::teachers::api::MockTeacherRemote;
    use crate::modules::teachers::model::{DocumentType, TeacherDocument};

    fn document(id: i64, status: VerificationStatus) -> TeacherDocument {
        TeacherDocument {
            id,
            document_type: DocumentType::Certificate,
            file_path: format!("uploads/teachers/1/certificates/{}.png", id),
            verification_status: status,
            rejection_reason: None,
            reviewed_at: None,
            document_number: None,
            identity_type: None,
            issuing_country_code: None,
            certificate_title: Some("BSc Mathematics Education".to_string()),
            issuer: Some("King Saud University".to_string()),
            issue_date: Some("2016-05-15".parse().unwrap()),
            created_at: "2026-01-29T03:19:48.144917".parse().unwrap(),
        }
    }

    fn detail_fixture(documents: Vec<TeacherDocument>) -> TeacherDetail {
        let mut detail = TeacherDetail {
            teacher_id: 1,
            user_id: 2,
            full_name: "Ahmed Al-Farsi".to_string(),
            phone_number: "+966554709484".to_string(),
            email: "ahmed.alfarsi@qalam.com".to_string(),
            bio: None,
            status: TeacherStatus::Pending,
            location: 1,
            created_at: "2026-01-29T03:16:58.38936".parse().unwrap(),
            documents,
            total_documents: 0,
            pending_documents: 0,
            approved_documents: 0,
            rejected_documents: 0,
        };
        detail.recount_documents();
        detail
    }

    #[tokio::test]
    async fn approve_patches_detail_and_refetches() {
        let mut remote = MockTeacherRemote::new();
        // First call opens the detail with a pending document; the second
        // is the post-approve refresh with it approved.
        let calls = Arc::new(std::sync::atomic::AtomicU32::new(0));
        remote.expect_fetch_detail().times(2).returning({
            let calls = calls.clone();
            move |_| {
                let refreshed = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) > 0;
                let status = if refreshed {
                    VerificationStatus::Approved
                } else {
                    VerificationStatus::Pending
                };
                Ok(detail_fixture(vec![document(10, status)]))
            }
        });
        remote
            .expect_approve_document()
            .withf(|teacher_id, document_id| *teacher_id == 1 && *document_id == 10)
            .returning(|_, _| Ok("Document approved".to_string()));

        let service = TeacherService::new(Arc::new(remote));
        service.open_detail(1).await.unwrap();

        let message = service.approve_document(1, 10).await.unwrap();
        assert_eq!(message, "Document approved");

        let detail = service.detail().unwrap();
        assert_eq!(
            detail.documents[0].verification_status,
            VerificationStatus::Approved
        );
        assert!(detail.can_be_activated());
    }

    #[tokio::test]
    async fn failed_reject_restores_the_detail() {
        let mut remote = MockTeacherRemote::new();
        remote
            .expect_fetch_detail()
            .times(1)
            .returning(|_| Ok(detail_fixture(vec![document(10, VerificationStatus::Pending)])));
        remote
            .expect_reject_document()
            .returning(|_, _, _| Err(AppError::ApiError("Document already reviewed".to_string())));

        let service = TeacherService::new(Arc::new(remote));
        service.open_detail(1).await.unwrap();

        let err = service
            .reject_document(1, 10, "Blurry scan".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ApiError(_)));

        // The optimistic rejection was rolled back.
        let detail = service.detail().unwrap();
        assert_eq!(
            detail.documents[0].verification_status,
            VerificationStatus::Pending
        );
        assert!(detail.documents[0].rejection_reason.is_none());
        assert_eq!(detail.pending_documents, 1);
    }

    #[tokio::test]
    async fn reject_requires_a_reason() {
        let remote = MockTeacherRemote::new();
        let service = TeacherService::new(Arc::new(remote));
        let err = service
            .reject_document(1, 10, "   ".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn approving_an_unknown_document_is_not_found() {
        let mut remote = MockTeacherRemote::new();
        remote
            .expect_fetch_detail()
            .returning(|_| Ok(detail_fixture(vec![document(10, VerificationStatus::Pending)])));

        let service = TeacherService::new(Arc::new(remote));
        service.open_detail(1).await.unwrap();

        let err = service.approve_document(1, 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
