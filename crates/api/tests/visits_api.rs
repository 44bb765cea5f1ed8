//! Integration tests for the visit simulator and the visit history.
//!
//! Visits are applied with fixed rolls through the engine so outcomes are
//! deterministic; the history endpoints are then exercised over HTTP.

mod common;

use axum::http::StatusCode;
use baba_api::engine::visits::{apply_visit, run_pass};
use baba_core::visits::VisitRoll;
use baba_db::models::cat_visit::NewCatVisit;
use baba_db::models::placed_item::ActiveFood;
use baba_db::repositories::{CatVisitRepo, SpoonRepo, YardRepo};
use baba_events::{event_types, EventBus};
use common::{body_json, buy, get_auth, grant_spoons, post_auth, post_json_auth, token_for};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn cat_id(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM cats WHERE name = $1")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Fund a user, buy a food goodie and place it in the food slot.
async fn user_with_food(pool: &PgPool, uid: &str, food: &str) -> (i64, String) {
    let user = common::user_id_for(pool, uid).await;
    grant_spoons(pool, user, 300).await;
    let token = token_for(uid);

    let item = buy(pool, &token, food).await;
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/slots/food1",
        json!({ "inventory_item_id": item }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    (user, token)
}

async fn active_food(pool: &PgPool, user: i64) -> Option<ActiveFood> {
    YardRepo::list_active_food(pool, Some(user))
        .await
        .unwrap()
        .into_iter()
        .next()
}

/// Record `n` visits directly, bypassing the simulator.
async fn seed_visits(pool: &PgPool, user: i64, n: usize) {
    let cat = cat_id(pool, "Mochi").await;
    let food: i64 = sqlx::query_scalar("SELECT id FROM goodies WHERE name = 'Kibble Bowl'")
        .fetch_one(pool)
        .await
        .unwrap();

    let mut tx = pool.begin().await.unwrap();
    for _ in 0..n {
        CatVisitRepo::create(
            &mut tx,
            &NewCatVisit {
                user_id: user,
                cat_id: cat,
                food_goodie_id: food,
                toy_goodie_ids: vec![],
                reward: 5,
            },
        )
        .await
        .unwrap();
    }
    tx.commit().await.unwrap();
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_common_food_is_consumed_by_one_visit(pool: PgPool) {
    let (user, _token) = user_with_food(&pool, "uid-one-visit", "Kibble Bowl").await;
    let before = SpoonRepo::balance(&pool, user).await.unwrap();
    let food = active_food(&pool, user).await.unwrap();
    assert_eq!(food.remaining_visits, 1);

    let bus = EventBus::new(16);
    let mut rx = bus.subscribe();
    let roll = VisitRoll {
        cat_id: cat_id(&pool, "Mochi").await,
        reward: 5,
    };

    let outcome = apply_visit(&pool, &bus, &food, &[], &roll)
        .await
        .unwrap()
        .expect("visit should be recorded");

    assert_eq!(outcome.remaining_visits, 0);
    assert!(outcome.food_consumed);
    assert_eq!(outcome.balance, before + 5);
    assert_eq!(outcome.visit.reward, 5);
    assert!(!outcome.visit.is_read);

    // The bowl is gone and the visit is waiting unread.
    assert!(YardRepo::list_for_user(&pool, user).await.unwrap().is_empty());
    assert_eq!(CatVisitRepo::unread_count(&pool, user).await.unwrap(), 1);
    assert_eq!(SpoonRepo::balance(&pool, user).await.unwrap(), before + 5);
    assert_eq!(
        SpoonRepo::ledger_total(&pool, user).await.unwrap(),
        before + 5
    );

    let types: Vec<String> = std::iter::from_fn(|| rx.try_recv().ok())
        .map(|e| e.event_type)
        .collect();
    assert_eq!(
        types,
        vec![
            event_types::CAT_VISITED,
            event_types::FOOD_CONSUMED,
            event_types::SPOONS_CHANGED
        ]
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_uncommon_food_supports_three_visits(pool: PgPool) {
    let (user, _token) = user_with_food(&pool, "uid-three-visits", "Sardine Plate").await;
    let food = active_food(&pool, user).await.unwrap();
    let bus = EventBus::default();
    let roll = VisitRoll {
        cat_id: cat_id(&pool, "Baklava").await,
        reward: 10,
    };

    let mut remaining = Vec::new();
    for _ in 0..3 {
        let outcome = apply_visit(&pool, &bus, &food, &[], &roll)
            .await
            .unwrap()
            .unwrap();
        remaining.push(outcome.remaining_visits);
    }
    assert_eq!(remaining, vec![2, 1, 0]);

    // A stale read of the exhausted placement writes nothing.
    assert!(apply_visit(&pool, &bus, &food, &[], &roll)
        .await
        .unwrap()
        .is_none());
    assert_eq!(CatVisitRepo::count_for_user(&pool, user).await.unwrap(), 3);
    assert!(active_food(&pool, user).await.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_visit_records_toys_on_the_board(pool: PgPool) {
    let (user, token) = user_with_food(&pool, "uid-toy-visit", "Salmon Fillet").await;
    let yarn = buy(&pool, &token, "Yarn Ball").await;
    post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/slots/toy2",
        json!({ "inventory_item_id": yarn }),
        &token,
    )
    .await;

    let food = active_food(&pool, user).await.unwrap();
    let toys: Vec<i64> = YardRepo::toys_for_user(&pool, user)
        .await
        .unwrap()
        .into_iter()
        .map(|(_, goodie)| goodie)
        .collect();
    let roll = VisitRoll {
        cat_id: cat_id(&pool, "Sarma").await,
        reward: 15,
    };

    let outcome = apply_visit(&pool, &EventBus::default(), &food, &toys, &roll)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(outcome.visit.toy_goodie_ids, toys);
    assert!(!outcome.food_consumed);
    assert_eq!(outcome.remaining_visits, 4);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pass_without_food_checks_nothing(pool: PgPool) {
    common::user_id_for(&pool, "uid-no-food").await;
    let mut rng = StdRng::seed_from_u64(1);

    let summary = run_pass(&pool, &EventBus::default(), None, &mut rng)
        .await
        .unwrap();
    assert_eq!(summary.checked, 0);
    assert!(summary.visits.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_pass_visits_stay_within_food_tier(pool: PgPool) {
    let (user, _token) = user_with_food(&pool, "uid-pass", "Golden Caviar").await;
    let legendary = cat_id(&pool, "Baba Selo").await;
    let mut rng = StdRng::seed_from_u64(99);

    let mut visits = Vec::new();
    for _ in 0..20 {
        let summary = run_pass(&pool, &EventBus::default(), Some(user), &mut rng)
            .await
            .unwrap();
        assert_eq!(summary.failed, 0);
        visits.extend(summary.visits);
    }

    assert!(!visits.is_empty());
    assert!(visits.iter().all(|v| v.visit.cat_id == legendary));
    assert!(visits.iter().all(|v| v.visit.reward == 80));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_check_visits_endpoint_only_touches_caller(pool: PgPool) {
    let (_, token) = user_with_food(&pool, "uid-checker", "Kibble Bowl").await;
    let (other, _) = user_with_food(&pool, "uid-bystander", "Kibble Bowl").await;

    for _ in 0..10 {
        let response = post_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/yard/check-visits",
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["data"]["checked"].as_u64().unwrap() <= 1);
    }

    assert_eq!(CatVisitRepo::count_for_user(&pool, other).await.unwrap(), 0);
    assert!(active_food(&pool, other).await.is_some());
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_all_marks_every_unread_visit(pool: PgPool) {
    let user = common::user_id_for(&pool, "uid-reader").await;
    let token = token_for("uid-reader");
    seed_visits(&pool, user, 5).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/visits/unread-count",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["unread_count"], 5);

    let response = post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/visits/read-all",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["marked"], 5);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/visits/unread-count",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["unread_count"], 0);

    let response = post_auth(
        common::build_test_app(pool),
        "/api/v1/yard/visits/read-all",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["marked"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_is_paginated(pool: PgPool) {
    let user = common::user_id_for(&pool, "uid-pages").await;
    let token = token_for("uid-pages");
    seed_visits(&pool, user, 5).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/visits?limit=2&offset=4",
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["total"], 5);
    assert_eq!(json["data"]["limit"], 2);
    assert_eq!(json["data"]["offset"], 4);
    assert_eq!(json["data"]["items"][0]["cat_name"], "Mochi");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unread_only_filter(pool: PgPool) {
    let user = common::user_id_for(&pool, "uid-filter").await;
    let token = token_for("uid-filter");
    seed_visits(&pool, user, 2).await;
    CatVisitRepo::mark_all_read(&pool, user).await.unwrap();
    seed_visits(&pool, user, 1).await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/yard/visits?unread_only=true",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["is_read"], false);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/yard/visits",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["total"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_history_is_private(pool: PgPool) {
    let user = common::user_id_for(&pool, "uid-private").await;
    seed_visits(&pool, user, 3).await;

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/yard/visits",
        &token_for("uid-snoop"),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["total"], 0);
}
