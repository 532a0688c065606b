//! Store-backed CRUD tests. Each case runs in its own database created by
//! `#[sqlx::test]`, with the migrations applied; a reachable Postgres
//! (`DATABASE_URL`) is required.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use sqlx::PgPool;

use buildpro_api::auth::Role;

fn project_payload(code: &str) -> Value {
    json!({
        "name": "Riverside Tower",
        "code": code,
        "description": "Mixed-use development",
        "location": "Leeds",
        "type": "Commercial",
        "budget": 1_500_000,
        "start_date": "2026-09-01",
        "end_date": "2027-09-01",
    })
}

#[sqlx::test]
async fn duplicate_email_registration_conflicts_and_stores_one_row(pool: PgPool) {
    let app = common::app_with_pool(pool.clone());
    let payload = json!({
        "name": "Ann Lee",
        "email": "ann@example.com",
        "password": "secret123",
    });

    let (status, body) = common::send(
        app.clone(),
        "POST",
        "/api/v1/auth/register",
        None,
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["email"], "ann@example.com");

    let (status, body) = common::send(
        app,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already registered");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("ann@example.com")
        .fetch_one(&pool)
        .await
        .expect("count");
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn created_project_round_trips_through_find(pool: PgPool) {
    let app = common::app_with_pool(pool);
    let token = common::token_for(Role::CompanyAdmin);

    let (status, created) = common::send(
        app.clone(),
        "POST",
        "/api/v1/projects",
        Some(&token),
        Some(project_payload("RT-2026")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["data"]["id"].as_str().expect("id").to_string();
    let (status, fetched) = common::send(
        app,
        "GET",
        &format!("/api/v1/projects/{}", id),
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
}

#[sqlx::test]
async fn deleting_a_project_cascades_tasks_and_detaches_team(pool: PgPool) {
    let app = common::app_with_pool(pool.clone());
    let token = common::token_for(Role::CompanyAdmin);

    let (_, project) = common::send(
        app.clone(),
        "POST",
        "/api/v1/projects",
        Some(&token),
        Some(project_payload("RT-2026")),
    )
    .await;
    let project_id = project["data"]["id"].as_str().expect("id").to_string();

    let (status, _) = common::send(
        app.clone(),
        "POST",
        "/api/v1/tasks",
        Some(&token),
        Some(json!({ "title": "Pour foundation", "project_id": project_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, member) = common::send(
        app.clone(),
        "POST",
        "/api/v1/team",
        Some(&token),
        Some(json!({
            "name": "Ann Lee", "initials": "AL", "role": "Foreman",
            "status": "On Site", "project_id": project_id,
            "phone": "0700", "email": "ann@crew.com", "color": "teal"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let member_id = member["data"]["id"].as_str().expect("id").to_string();

    let (status, _) = common::send(
        app,
        "DELETE",
        &format!("/api/v1/projects/{}", project_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let tasks: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
        .bind(&project_id)
        .fetch_one(&pool)
        .await
        .expect("task count");
    assert_eq!(tasks, 0);

    let detached: Option<String> =
        sqlx::query_scalar("SELECT project_id FROM team_members WHERE id = $1")
            .bind(&member_id)
            .fetch_one(&pool)
            .await
            .expect("member row");
    assert_eq!(detached, None);
}

#[sqlx::test]
async fn deleting_a_missing_row_is_404(pool: PgPool) {
    let app = common::app_with_pool(pool);
    let token = common::token_for(Role::CompanyAdmin);

    let (status, body) = common::send(
        app,
        "DELETE",
        "/api/v1/projects/no-such-project",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Project not found");
}

#[sqlx::test]
async fn task_pointing_at_a_missing_project_is_rejected(pool: PgPool) {
    let app = common::app_with_pool(pool);
    let token = common::token_for(Role::Operative);

    let (status, body) = common::send(
        app,
        "POST",
        "/api/v1/tasks",
        Some(&token),
        Some(json!({ "title": "Orphan", "project_id": "no-such-project" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Referenced record does not exist");
}
