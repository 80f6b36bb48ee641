use crate::shared::errors::{AppError, AppResult};
use crate::shared::store::{Confirmation, EntityStore, OptimisticMutation};
use crate::shared::validation::{Required, ValidationChain};

use super::super::domain::{Curriculum, DomainDraft, EducationDomain};
use super::super::infrastructure::CurriculumRemote;

fn domain_rules() -> ValidationChain<DomainDraft> {
    ValidationChain::new()
        .add_rule(Required::new("nameAr", |d: &DomainDraft| &d.name_ar))
        .add_rule(Required::new("nameEn", |d: &DomainDraft| &d.name_en))
        .add_rule(Required::new("code", |d: &DomainDraft| &d.code))
}

/// Validates the draft and inserts it optimistically. The confirmation
/// resolves to the record with its server-assigned id.
pub fn create_domain(
    domains: &EntityStore<EducationDomain>,
    draft: DomainDraft,
) -> AppResult<Confirmation<EducationDomain>> {
    domain_rules().validate(&draft).into_result()?;
    Ok(domains.insert(draft.into_record()))
}

/// Flips a curriculum's active flag in the cache immediately, confirms it
/// through the toggle-status endpoint, then refetches the collection so the
/// cache converges on the authoritative state. On failure the flag is
/// restored.
pub async fn toggle_curriculum_status(
    remote: &dyn CurriculumRemote,
    curriculums: &EntityStore<Curriculum>,
    id: i64,
) -> AppResult<Curriculum> {
    let (before, after) = curriculums
        .mutate_local(id, |c| c.is_active = !c.is_active)
        .ok_or_else(|| {
            AppError::NotFound(format!("curriculum {} is not in the local cache", id))
        })?;

    // The endpoint expects the record as last seen, pre-toggle.
    let pre_toggle = before.clone();
    let mutation = OptimisticMutation::begin("curriculum.toggle-status", {
        let store = curriculums.clone();
        move || store.restore(id, &after, before)
    });

    match remote.toggle_status(&pre_toggle).await {
        Ok(confirmed) => {
            mutation.commit();
            curriculums.load().await?;
            Ok(confirmed)
        }
        Err(err) => {
            mutation.roll_back();
            Err(err)
        }
    }
}
