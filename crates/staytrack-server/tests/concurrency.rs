mod common;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};
use staytrack_db::entities::{admin_settings, guest};
use staytrack_server::format::DisplayConfig;
use staytrack_server::registry::{check_in, check_out, CheckIn, CheckInOutcome, CheckOutOutcome};
use staytrack_server::settings::{self, SettingsInput};
use staytrack_server::{build_router, cors_layer};

fn guest_request(uid: i64) -> CheckIn {
    CheckIn::new(Some(uid), Some(format!("Guest{uid}")), Some("Tester".into())).unwrap()
}

fn settings_input(capacity: i64) -> SettingsInput {
    SettingsInput::new(Some(capacity), Some(24), Some(24)).unwrap()
}

async fn counts(db: &DatabaseConnection) -> (i64, u64) {
    let stored = settings::require(db).await.unwrap().active_guests;
    let live = guest::Entity::find().count(db).await.unwrap();
    (stored, live)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_check_ins_create_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let db = common::test_pooled_db(dir.path()).await;
    settings::upsert(&db, &settings_input(100)).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 19, 20, 30, 0).unwrap();

    for uid in 1..=20 {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move {
                    check_in(&db, &DisplayConfig::default(), guest_request(uid), now).await
                })
            })
            .collect();

        let mut created = 0;
        let mut already = 0;
        for handle in handles {
            match handle.await.unwrap().unwrap() {
                CheckInOutcome::Created(_) => created += 1,
                CheckInOutcome::AlreadyPresent => already += 1,
            }
        }
        assert_eq!((created, already), (1, 1), "uid {uid}");
    }

    assert_eq!(counts(&db).await, (20, 20));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_check_outs_decrement_once() {
    let dir = tempfile::tempdir().unwrap();
    let db = common::test_pooled_db(dir.path()).await;
    settings::upsert(&db, &settings_input(100)).await.unwrap();
    let now = Utc.with_ymd_and_hms(2024, 3, 19, 20, 30, 0).unwrap();
    let display = DisplayConfig::default();

    // Guest 100 stays, so a double decrement would show up as a mismatch.
    for uid in (1..=20).chain([100]) {
        check_in(&db, &display, guest_request(uid), now).await.unwrap();
    }
    assert_eq!(counts(&db).await, (21, 21));

    for uid in 1..=20 {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { check_out(&db, uid).await })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap().unwrap());
        }
        let removed = outcomes
            .iter()
            .filter(|o| **o == CheckOutOutcome::Removed)
            .count();
        assert_eq!(removed, 1, "uid {uid}: {outcomes:?}");
    }

    assert_eq!(counts(&db).await, (1, 1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_first_settings_submissions_share_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let db = common::test_pooled_db(dir.path()).await;

    let handles: Vec<_> = [40, 60]
        .into_iter()
        .map(|capacity| {
            let db = db.clone();
            tokio::spawn(async move { settings::upsert(&db, &settings_input(capacity)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(admin_settings::Entity::find().count(&db).await.unwrap(), 1);
    let saved = settings::require(&db).await.unwrap();
    assert_eq!(saved.id, admin_settings::SETTINGS_ID);
    assert!([40, 60].contains(&saved.capacity));
    assert_eq!(saved.active_guests, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_set_guest_requests() {
    let dir = tempfile::tempdir().unwrap();
    let db = common::test_pooled_db(dir.path()).await;
    settings::upsert(&db, &settings_input(10)).await.unwrap();
    let app = build_router(common::test_app_state(db.clone(), dir.path()), cors_layer(&[]));

    let body = r#"{"UID": "42", "name": "Ali", "family": "Rahimi"}"#;
    let (first, second) = tokio::join!(
        common::send(&app, Method::POST, "/set_guest/", Some(body)),
        common::send(&app, Method::POST, "/set_guest/", Some(body)),
    );

    let mut replies = [first, second];
    replies.sort_by_key(|(status, _)| status.as_u16());
    assert_eq!(replies[0].0, StatusCode::OK);
    assert_eq!(replies[0].1["status"], "created before");
    assert_eq!(replies[1].0, StatusCode::CREATED);
    assert_eq!(replies[1].1["UID"], 42);

    assert_eq!(counts(&db).await, (1, 1));
}
