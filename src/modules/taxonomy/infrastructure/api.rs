//! Remote sources for the taxonomy collections.
//!
//! Domains and curriculums are fully writable; levels, grades, and subjects
//! are list-only on the admin API and keep the read-only defaults.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::shared::api::{ApiClient, Page};
use crate::shared::errors::AppResult;
use crate::shared::store::RemoteCollection;

use super::super::domain::{Curriculum, EducationDomain, Grade, Level, Subject};

pub struct DomainsApi {
    api: Arc<ApiClient>,
}

impl DomainsApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

/// Body sent on domain create/update; the server owns id and createdAt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DomainBody<'a> {
    name_ar: &'a str,
    name_en: &'a str,
    code: &'a str,
    description_ar: &'a str,
    description_en: &'a str,
}

impl<'a> From<&'a EducationDomain> for DomainBody<'a> {
    fn from(record: &'a EducationDomain) -> Self {
        Self {
            name_ar: &record.name_ar,
            name_en: &record.name_en,
            code: &record.code,
            description_ar: &record.description_ar,
            description_en: &record.description_en,
        }
    }
}

#[async_trait]
impl RemoteCollection<EducationDomain> for DomainsApi {
    async fn fetch_all(&self) -> AppResult<Vec<EducationDomain>> {
        let page: Page<EducationDomain> =
            self.api.get_data("/Api/V1/Education/Domains").await?;
        Ok(page.items)
    }

    async fn create(&self, record: &EducationDomain) -> AppResult<EducationDomain> {
        self.api
            .post_data(
                "/Api/V1/Education/Domains",
                serde_json::to_value(DomainBody::from(record))?,
            )
            .await
    }

    async fn replace(&self, record: &EducationDomain) -> AppResult<EducationDomain> {
        self.api
            .put_data(
                &format!("/Api/V1/Education/Domains/{}", record.id),
                serde_json::to_value(DomainBody::from(record))?,
            )
            .await
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.api
            .delete(&format!("/Api/V1/Education/Domains/{}", id))
            .await
    }
}

/// Curriculum endpoints beyond the collection CRUD.
#[async_trait]
pub trait CurriculumRemote: Send + Sync {
    /// PATCH the toggle-status endpoint; resolves to the authoritative
    /// record. The body carries the record as the caller last saw it.
    async fn toggle_status(&self, record: &Curriculum) -> AppResult<Curriculum>;
}

pub struct CurriculumsApi {
    api: Arc<ApiClient>,
}

impl CurriculumsApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CurriculumBody<'a> {
    name_ar: &'a str,
    name_en: &'a str,
    country: &'a str,
    domain_id: i64,
    description_ar: &'a str,
    description_en: &'a str,
    is_active: bool,
}

impl<'a> From<&'a Curriculum> for CurriculumBody<'a> {
    fn from(record: &'a Curriculum) -> Self {
        Self {
            name_ar: &record.name_ar,
            name_en: &record.name_en,
            country: &record.country,
            domain_id: record.domain_id,
            description_ar: &record.description_ar,
            description_en: &record.description_en,
            is_active: record.is_active,
        }
    }
}

#[async_trait]
impl RemoteCollection<Curriculum> for CurriculumsApi {
    async fn fetch_all(&self) -> AppResult<Vec<Curriculum>> {
        let page: Page<Curriculum> = self.api.get_data("/Api/V1/Curriculum").await?;
        Ok(page.items)
    }

    async fn create(&self, record: &Curriculum) -> AppResult<Curriculum> {
        self.api
            .post_data(
                "/Api/V1/Curriculum",
                serde_json::to_value(CurriculumBody::from(record))?,
            )
            .await
    }

    async fn replace(&self, record: &Curriculum) -> AppResult<Curriculum> {
        self.api
            .put_data(
                &format!("/Api/V1/Curriculum/{}", record.id),
                serde_json::to_value(CurriculumBody::from(record))?,
            )
            .await
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.api.delete(&format!("/Api/V1/Curriculum/{}", id)).await
    }
}

#[async_trait]
impl CurriculumRemote for CurriculumsApi {
    async fn toggle_status(&self, record: &Curriculum) -> AppResult<Curriculum> {
        self.api
            .patch_data(
                &format!("/Api/V1/Curriculum/{}/toggle-status", record.id),
                serde_json::to_value(record)?,
            )
            .await
    }
}

pub struct LevelsApi {
    api: Arc<ApiClient>,
}

impl LevelsApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RemoteCollection<Level> for LevelsApi {
    async fn fetch_all(&self) -> AppResult<Vec<Level>> {
        let page: Page<Level> = self.api.get_data("/Api/V1/Education/Levels").await?;
        Ok(page.items)
    }
}

pub struct GradesApi {
    api: Arc<ApiClient>,
}

impl GradesApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RemoteCollection<Grade> for GradesApi {
    async fn fetch_all(&self) -> AppResult<Vec<Grade>> {
        let page: Page<Grade> = self.api.get_data("/Api/V1/Education/Grades").await?;
        Ok(page.items)
    }
}

pub struct SubjectsApi {
    api: Arc<ApiClient>,
}

impl SubjectsApi {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RemoteCollection<Subject> for SubjectsApi {
    async fn fetch_all(&self) -> AppResult<Vec<Subject>> {
        let page: Page<Subject> = self.api.get_data("/Api/V1/Subjects").await?;
        Ok(page.items)
    }
}
