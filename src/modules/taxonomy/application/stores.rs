use std::sync::Arc;

use crate::shared::api::ApiClient;
use crate::shared::errors::AppResult;
use crate::shared::store::EntityStore;

use super::super::domain::{Curriculum, EducationDomain, Grade, Level, Subject};
use super::super::infrastructure::{
    CurriculumRemote, CurriculumsApi, DomainsApi, GradesApi, LevelsApi, SubjectsApi,
};
use super::actions;

/// The five taxonomy collections, each cached in an [`EntityStore`] backed
/// by its REST endpoint.
pub struct TaxonomyStores {
    pub domains: EntityStore<EducationDomain>,
    pub curriculums: EntityStore<Curriculum>,
    pub levels: EntityStore<Level>,
    pub grades: EntityStore<Grade>,
    pub subjects: EntityStore<Subject>,
    curriculum_remote: Arc<dyn CurriculumRemote>,
}

impl TaxonomyStores {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let curriculums_api = Arc::new(CurriculumsApi::new(api.clone()));
        Self {
            domains: EntityStore::new("domains", Arc::new(DomainsApi::new(api.clone()))),
            curriculums: EntityStore::new("curriculums", curriculums_api.clone()),
            levels: EntityStore::new("levels", Arc::new(LevelsApi::new(api.clone()))),
            grades: EntityStore::new("grades", Arc::new(GradesApi::new(api.clone()))),
            subjects: EntityStore::new("subjects", Arc::new(SubjectsApi::new(api))),
            curriculum_remote: curriculums_api,
        }
    }

    /// Loads every collection concurrently.
    pub async fn load_all(&self) -> AppResult<()> {
        futures::try_join!(
            self.domains.load(),
            self.curriculums.load(),
            self.levels.load(),
            self.grades.load(),
            self.subjects.load(),
        )?;
        Ok(())
    }

    /// Optimistically flips a curriculum's active flag; see
    /// [`actions::toggle_curriculum_status`].
    pub async fn toggle_curriculum_status(&self, id: i64) -> AppResult<Curriculum> {
        actions::toggle_curriculum_status(self.curriculum_remote.as_ref(), &self.curriculums, id)
            .await
    }
}
