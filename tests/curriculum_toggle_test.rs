//! Optimistic toggle-status action: instant local flip, server
//! confirmation, convergence through the post-success refetch, and
//! mandatory rollback on rejection.

mod utils;

use qalam_admin::modules::taxonomy::application::actions::toggle_curriculum_status;
use qalam_admin::modules::taxonomy::Curriculum;
use qalam_admin::shared::errors::AppError;
use qalam_admin::shared::store::RemoteCollection;
use qalam_admin::EntityStore;

use utils::factories::curriculum;
use utils::{FakeCollection, FakeCurriculumRemote};

fn setup() -> (
    std::sync::Arc<FakeCollection<Curriculum>>,
    FakeCurriculumRemote,
    EntityStore<Curriculum>,
) {
    let backend = FakeCollection::new(vec![curriculum(10, 1, true), curriculum(11, 1, false)]);
    let remote = FakeCurriculumRemote::new(backend.clone());
    let store = EntityStore::new("curriculums", backend.clone());
    (backend, remote, store)
}

#[tokio::test]
async fn toggle_twice_returns_to_the_initial_state() {
    let (backend, remote, store) = setup();
    store.load().await.unwrap();
    assert!(store.get(10).unwrap().is_active);

    // First toggle: active -> inactive, locally and on the server.
    let confirmed = toggle_curriculum_status(&remote, &store, 10).await.unwrap();
    assert!(!confirmed.is_active);
    assert!(!store.get(10).unwrap().is_active);
    assert!(!backend.records()[0].is_active);

    // Second toggle: back to active, cache matching the confirmed state.
    let confirmed = toggle_curriculum_status(&remote, &store, 10).await.unwrap();
    assert!(confirmed.is_active);
    assert!(store.get(10).unwrap().is_active);
    assert!(backend.records()[0].is_active);
}

#[tokio::test]
async fn rejected_toggle_rolls_the_flag_back() {
    let (backend, remote, store) = setup();
    store.load().await.unwrap();

    remote.fail_next();
    let err = toggle_curriculum_status(&remote, &store, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ApiError(_)));

    // The flag no longer reflects the optimistic change that was never
    // confirmed, and the server state is untouched.
    assert!(store.get(10).unwrap().is_active);
    assert!(backend.records()[0].is_active);
}

#[tokio::test]
async fn success_refetches_the_collection_for_convergence() {
    let (backend, remote, store) = setup();
    store.load().await.unwrap();

    // Another admin created a curriculum meanwhile; the post-toggle
    // refetch picks it up along with the toggled flag.
    backend
        .create(&curriculum(0, 1, true))
        .await
        .unwrap();

    toggle_curriculum_status(&remote, &store, 11).await.unwrap();
    assert_eq!(store.len(), 3);
    assert!(store.get(11).unwrap().is_active);
}

#[tokio::test]
async fn toggling_an_uncached_curriculum_is_not_found() {
    let (_backend, remote, store) = setup();
    store.load().await.unwrap();

    let err = toggle_curriculum_status(&remote, &store, 99)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
