//! Aggregation view semantics: group/count correctness, join kinds, the
//! per-view active-only filter policy, and lazy recomputation.

mod utils;

use qalam_admin::modules::taxonomy::application::views::{
    curriculum_with_levels_count, domain_with_curriculums_count, grade_with_subjects_count,
    level_with_grades_count,
};
use qalam_admin::modules::taxonomy::{Curriculum, EducationDomain};
use qalam_admin::{AggregationView, EntityStore, JoinKind};

use utils::factories::{curriculum, domain, grade, level, subject};
use utils::FakeCollection;

async fn domain_stores() -> (EntityStore<EducationDomain>, EntityStore<Curriculum>) {
    // Domain 1 has 3 curriculums, 2 active; domain 2 has none.
    let domains = EntityStore::new(
        "domains",
        FakeCollection::new(vec![
            domain(1, "SCI", "Science & Technology"),
            domain(2, "ART", "Arts"),
        ]),
    );
    let curriculums = EntityStore::new(
        "curriculums",
        FakeCollection::new(vec![
            curriculum(10, 1, true),
            curriculum(11, 1, true),
            curriculum(12, 1, false),
        ]),
    );
    domains.load().await.unwrap();
    curriculums.load().await.unwrap();
    (domains, curriculums)
}

#[tokio::test]
async fn domains_view_counts_only_active_curriculums() {
    let (domains, curriculums) = domain_stores().await;
    let view = domain_with_curriculums_count(&domains, &curriculums);
    assert_eq!(view.join_kind(), JoinKind::Left);

    let rows = view.read();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].domain.id, 1);
    assert_eq!(rows[0].curriculums_count, 2);
    // Left join: a domain with no curriculums still appears, count zero.
    assert_eq!(rows[1].domain.id, 2);
    assert_eq!(rows[1].curriculums_count, 0);
}

#[tokio::test]
async fn inner_join_omits_parents_without_children() {
    let (domains, curriculums) = domain_stores().await;
    let view: AggregationView<EducationDomain, Curriculum, (i64, u64)> = AggregationView::new(
        "active-curriculums-inner",
        domains.clone(),
        curriculums.clone(),
        |c| c.domain_id,
        JoinKind::Inner,
        |d, n| (d.id, n),
    )
    .with_filter(|c| c.is_active);

    assert_eq!(view.read(), vec![(1, 2)]);

    // Deactivate every curriculum of domain 1: with the active-only filter
    // it now has no matching children and drops out entirely.
    for id in [10, 11] {
        curriculums
            .update(id, |c| c.is_active = false)
            .unwrap()
            .confirm()
            .await
            .unwrap();
    }
    assert_eq!(view.read(), Vec::<(i64, u64)>::new());
}

#[tokio::test]
async fn unfiltered_views_count_inactive_children_too() {
    let curriculums = EntityStore::new(
        "curriculums",
        FakeCollection::new(vec![curriculum(10, 1, true)]),
    );
    let levels = EntityStore::new(
        "levels",
        FakeCollection::new(vec![level(100, 10, true), level(101, 10, false)]),
    );
    curriculums.load().await.unwrap();
    levels.load().await.unwrap();

    // Unlike the domains view there is no is_active filter here.
    let view = curriculum_with_levels_count(&curriculums, &levels);
    let rows = view.read();
    assert_eq!(rows[0].levels_count, 2);

    let grades_store = EntityStore::new(
        "grades",
        FakeCollection::new(vec![grade(200, 100, false), grade(201, 100, false)]),
    );
    grades_store.load().await.unwrap();
    let level_view = level_with_grades_count(&levels, &grades_store);
    let rows = level_view.read();
    assert_eq!(rows[0].grades_count, 2);
    assert_eq!(rows[1].grades_count, 0);

    let subjects_store = EntityStore::new(
        "subjects",
        FakeCollection::new(vec![subject(300, 100, 200, false)]),
    );
    subjects_store.load().await.unwrap();
    let grade_view = grade_with_subjects_count(&grades_store, &subjects_store);
    let rows = grade_view.read();
    assert_eq!(rows[0].subjects_count, 1);
    assert_eq!(rows[1].subjects_count, 0);
}

#[tokio::test]
async fn views_recompute_after_any_upstream_mutation() {
    let (domains, curriculums) = domain_stores().await;
    let view = domain_with_curriculums_count(&domains, &curriculums);
    assert_eq!(view.read()[0].curriculums_count, 2);

    // Deactivating an active curriculum changes the count.
    curriculums
        .update(10, |c| c.is_active = false)
        .unwrap()
        .confirm()
        .await
        .unwrap();
    assert_eq!(view.read()[0].curriculums_count, 1);

    // Deleting the other active one drops it to zero.
    curriculums.delete(11).unwrap().confirm().await.unwrap();
    assert_eq!(view.read()[0].curriculums_count, 0);

    // Mutating the parent store alone also invalidates the view.
    domains
        .update(2, |d| d.name_en = "Fine Arts".to_string())
        .unwrap()
        .confirm()
        .await
        .unwrap();
    assert_eq!(view.read()[1].domain.name_en, "Fine Arts");
}

#[tokio::test]
async fn a_read_sees_the_optimistic_state_before_confirmation() {
    let (domains, curriculums) = domain_stores().await;
    let view = domain_with_curriculums_count(&domains, &curriculums);
    assert_eq!(view.read()[0].curriculums_count, 2);

    // The optimistic flip is visible to the view before the server
    // confirms; the confirmation is awaited afterwards.
    let confirmation = curriculums.update(10, |c| c.is_active = false).unwrap();
    assert_eq!(view.read()[0].curriculums_count, 1);
    confirmation.confirm().await.unwrap();
    assert_eq!(view.read()[0].curriculums_count, 1);
}
