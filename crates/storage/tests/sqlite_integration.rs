use mcq_core::model::UserProfile;
use mcq_core::time::fixed_now;
use storage::repository::{IdentityRepository, ProfileRecord};
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn sqlite_round_trips_the_profile() {
    let store = SqliteStore::connect("sqlite:file:memdb_profile?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert!(store.load_profile().await.unwrap().is_none());

    let profile = UserProfile::onboard("Asha K", "asha.k@example.com").unwrap();
    store
        .save_profile(ProfileRecord::from_profile(&profile, fixed_now()))
        .await
        .unwrap();

    let loaded = store.load_profile().await.unwrap().expect("profile stored");
    assert_eq!(loaded, profile);
}

#[tokio::test]
async fn saving_again_replaces_the_single_row() {
    let store = SqliteStore::connect("sqlite:file:memdb_profile_replace?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    let first = UserProfile::onboard("Asha", "asha@example.com").unwrap();
    let second = UserProfile::onboard("Ben", "ben@example.com").unwrap();
    store
        .save_profile(ProfileRecord::from_profile(&first, fixed_now()))
        .await
        .unwrap();
    store
        .save_profile(ProfileRecord::from_profile(&second, fixed_now()))
        .await
        .unwrap();

    let loaded = store.load_profile().await.unwrap().expect("profile stored");
    assert_eq!(loaded.user_id(), "ben@example.com");

    store.clear_profile().await.unwrap();
    assert!(store.load_profile().await.unwrap().is_none());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_migrate_twice?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first run");
    store.migrate().await.expect("second run");
}
