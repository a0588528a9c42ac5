use chrono::NaiveDate;
use poem::{http::StatusCode, test::TestClient};
use serde_json::{json, Value::Null};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    core::test_utils::{generate_test_user, test_app_state, test_config},
    factory::{
        profile::ProfileFactory, tournament_history::TournamentHistoryFactory,
        user::AccountFactory,
    },
    init_openapi_route,
    model::tournament_history::TournamentHistory,
    repository::tournament_history::count_by_profile,
};

#[sqlx::test]
async fn test_editor_requires_session(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let config = test_config();
    let app_state = test_app_state(pool, &config);
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .get("/api/me/profile")
        .header("authorization", "Bearer not-a-session")
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::UNAUTHORIZED);
    Ok(())
}

#[sqlx::test]
async fn test_save_profile(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let config = test_config();
    let app_state = test_app_state(pool, &config);
    let backend = app_state.backend()?;
    let mut db = backend.db.acquire().await?;
    let mut redis_conn = backend.redis_conn.get()?;
    let test_user =
        generate_test_user(&mut db, &mut redis_conn, &config, "asha@local.com", "Asha").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put("/api/me/profile")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "name": "Asha Kulkarni",
            "age": 29,
            "gender": "Prefer not to say",
            "dominant_hand": "Left",
            "dupr_id": "DUPR-1001",
            "bio": "Third-shot drop enthusiast",
            "city": "Pune",
            "state": "Maharashtra",
            "country": "India",
            "has_sponsorship": false,
            "sponsorship_details": "Selkirk",
            "next_tournament": "Goa Open"
        }))
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let json_value = json.value().object();
    json_value
        .get("message")
        .assert_string("Profile saved successfully!");
    let profile = json_value.get("editor").object().get("profile").object();
    profile.get("name").assert_string("Asha Kulkarni");
    profile.get("gender").assert_string("Prefer not to say");
    profile.get("dominant_hand").assert_string("Left");
    profile.get("city").assert_string("Pune");
    profile.get("sponsorship_details").assert_null();

    let row: (String, Option<String>, bool, bool) = sqlx::query_as(
        r#"SELECT name, sponsorship_details, has_sponsorship, updated_at > $2
        FROM public.profiles WHERE id = $1"#,
    )
    .bind(test_user.account.id)
    .bind(test_user.profile.updated_at)
    .fetch_one(&mut *db)
    .await?;
    assert_eq!(
        row,
        ("Asha Kulkarni".to_string(), None, false, true)
    );
    Ok(())
}

#[sqlx::test]
async fn test_save_profile_requires_name(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let config = test_config();
    let app_state = test_app_state(pool, &config);
    let backend = app_state.backend()?;
    let mut db = backend.db.acquire().await?;
    let mut redis_conn = backend.redis_conn.get()?;
    let test_user =
        generate_test_user(&mut db, &mut redis_conn, &config, "asha@local.com", "Asha").await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put("/api/me/profile")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"name": "  "}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({"message": "name is required"})).await;

    // When the backend rejects the age
    let resp = cli
        .put("/api/me/profile")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"name": "Asha", "age": -1}))
        .send()
        .await;

    // Expect the database message verbatim, profile untouched
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(json!({
        "message": "new row for relation \"profiles\" violates check constraint \"profiles_age_check\""
    }))
    .await;
    let age: (Option<i32>,) = sqlx::query_as("SELECT age FROM public.profiles WHERE id = $1")
        .bind(test_user.account.id)
        .fetch_one(&mut *db)
        .await?;
    assert_eq!(age.0, None);
    Ok(())
}

#[sqlx::test]
async fn test_add_then_delete_tournament(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let config = test_config();
    let app_state = test_app_state(pool, &config);
    let backend = app_state.backend()?;
    let mut db = backend.db.acquire().await?;
    let mut redis_conn = backend.redis_conn.get()?;
    let test_user =
        generate_test_user(&mut db, &mut redis_conn, &config, "asha@local.com", "Asha").await?;
    let mut factory = TournamentHistoryFactory::new();
    factory.modified_many(|data, idx| TournamentHistory {
        tournament_date: NaiveDate::from_ymd_opt(2024, 3, idx as u32 + 1),
        ..data.clone()
    });
    factory
        .generate_many(&backend.db, 2, test_user.account.id)
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);
    let mut tx = backend.db.begin().await?;
    let count_before = count_by_profile(&mut tx, &test_user.account.id).await?;
    tx.rollback().await?;

    // When add
    let resp = cli
        .post("/api/me/tournaments")
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "tournament_name": "Goa Open",
            "tournament_date": "2099-01-15",
            "location": "Panaji",
            "singles_result": "1st place",
            "doubles_result": null,
            "mixed_doubles_result": "Quarter-finals",
            "notes": ""
        }))
        .send()
        .await;

    // Expect add, newest date first in the refreshed list
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    let json_value = json.value().object();
    json_value
        .get("message")
        .assert_string("Tournament added successfully!");
    let tournaments = json_value.get("editor").object().get("tournaments").array();
    tournaments.assert_len(3);
    let added = tournaments.get(0).object();
    added.get("tournament_name").assert_string("Goa Open");
    added.get("tournament_date").assert_string("2099-01-15");
    added.get("notes").assert_null();
    added
        .get("singles_result")
        .object()
        .get("medal")
        .assert_string("gold");
    added
        .get("mixed_doubles_result")
        .object()
        .get("medal")
        .assert_string("other");
    let added_id: String = added.get("id").deserialize();

    // When delete without confirmation
    let resp = cli
        .delete(format!("/api/me/tournaments/{}", added_id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect nothing deleted
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When delete
    let resp = cli
        .delete(format!("/api/me/tournaments/{}", added_id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .query("confirm", &true)
        .send()
        .await;

    // Expect
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let json_value = json.value().object();
    json_value
        .get("message")
        .assert_string("Tournament entry deleted successfully!");
    json_value
        .get("editor")
        .object()
        .get("tournaments")
        .array()
        .assert_len(2);
    let mut tx = backend.db.begin().await?;
    let count_after = count_by_profile(&mut tx, &test_user.account.id).await?;
    assert_eq!(count_before, count_after);

    // When delete again
    let resp = cli
        .delete(format!("/api/me/tournaments/{}", added_id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .query("confirm", &true)
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
async fn test_update_tournament(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let config = test_config();
    let app_state = test_app_state(pool, &config);
    let backend = app_state.backend()?;
    let mut db = backend.db.acquire().await?;
    let mut redis_conn = backend.redis_conn.get()?;
    let test_user =
        generate_test_user(&mut db, &mut redis_conn, &config, "asha@local.com", "Asha").await?;
    let entry = TournamentHistoryFactory::new()
        .generate_one(&backend.db, test_user.account.id)
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When
    let resp = cli
        .put(format!("/api/me/tournaments/{}", entry.id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({
            "tournament_name": "Hyderabad Open",
            "tournament_date": null,
            "doubles_result": "Silver"
        }))
        .send()
        .await;

    // Expect every field overwritten
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let json_value = json.value().object();
    json_value
        .get("message")
        .assert_string("Tournament updated successfully!");
    let tournaments: Vec<serde_json::Value> = json_value
        .get("editor")
        .object()
        .get("tournaments")
        .deserialize();
    assert_eq!(tournaments.len(), 1);
    assert_eq!(tournaments[0]["id"], entry.id.to_string());
    assert_eq!(tournaments[0]["tournament_name"], "Hyderabad Open");
    assert_eq!(tournaments[0]["tournament_date"], Null);
    assert_eq!(tournaments[0]["location"], Null);
    assert_eq!(tournaments[0]["doubles_result"]["medal"], "silver");

    // When the name is missing
    let resp = cli
        .put(format!("/api/me/tournaments/{}", entry.id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"tournament_name": ""}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::BAD_REQUEST);

    // When unknown id
    let resp = cli
        .put(format!("/api/me/tournaments/{}", Uuid::now_v7()))
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"tournament_name": "Hyderabad Open"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[sqlx::test]
async fn test_foreign_tournament_is_forbidden(pool: PgPool) -> anyhow::Result<()> {
    // Given
    let config = test_config();
    let app_state = test_app_state(pool, &config);
    let backend = app_state.backend()?;
    let mut db = backend.db.acquire().await?;
    let mut redis_conn = backend.redis_conn.get()?;
    let test_user =
        generate_test_user(&mut db, &mut redis_conn, &config, "asha@local.com", "Asha").await?;
    let other = AccountFactory::<()>::new()
        .generate_one(&backend.db, ())
        .await?;
    ProfileFactory::new().generate_one(&backend.db, other.id).await?;
    let entry = TournamentHistoryFactory::new()
        .generate_one(&backend.db, other.id)
        .await?;
    let app = init_openapi_route(app_state.clone(), &config);
    let cli = TestClient::new(app);

    // When update
    let resp = cli
        .put(format!("/api/me/tournaments/{}", entry.id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .body_json(&json!({"tournament_name": "Stolen Open"}))
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);

    // When delete
    let resp = cli
        .delete(format!("/api/me/tournaments/{}", entry.id))
        .header("authorization", format!("Bearer {}", test_user.token))
        .query("confirm", &true)
        .send()
        .await;

    // Expect
    resp.assert_status(StatusCode::FORBIDDEN);
    let mut tx = backend.db.begin().await?;
    assert_eq!(count_by_profile(&mut tx, &other.id).await?, 1);

    // When own editor
    let resp = cli
        .get("/api/me/profile")
        .header("authorization", format!("Bearer {}", test_user.token))
        .send()
        .await;

    // Expect only own entries
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let editor = json.value().object();
    editor.get("profile").object().get("name").assert_string("Asha");
    editor.get("tournaments").array().assert_len(0);
    Ok(())
}
