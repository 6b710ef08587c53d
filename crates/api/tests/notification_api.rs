//! HTTP-level tests for recipient notification endpoints and admin direct send.

mod common;

use academy_core::announcement::Priority;
use academy_core::notification::{CATEGORY_BROADCAST, TYPE_ANNOUNCEMENT};
use academy_core::roles::Role;
use academy_core::types::DbId;
use academy_db::models::notification::NewNotification;
use academy_db::repositories::NotificationRepo;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{
    admin_token, body_json, create_profile, delete_auth, get_auth, post_auth, post_json_auth,
    token_for,
};
use serde_json::json;
use sqlx::PgPool;

async fn seed(pool: &PgPool, user_id: DbId, title: &str) -> DbId {
    NotificationRepo::create(
        pool,
        &NewNotification {
            user_id,
            notification_type: TYPE_ANNOUNCEMENT.to_string(),
            category: CATEGORY_BROADCAST.to_string(),
            title: title.to_string(),
            message: format!("{title} message"),
            payload: None,
            action_url: None,
            priority: Priority::Normal,
            expires_at: Some(Utc::now() + Duration::days(30)),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Listing and counts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_only_returns_own_notifications(pool: PgPool) {
    let me = create_profile(&pool, "me@example.com", Role::Student).await;
    let other = create_profile(&pool, "other@example.com", Role::Student).await;
    seed(&pool, me, "Mine").await;
    seed(&pool, other, "Theirs").await;
    let token = token_for(me, Role::Student);

    let response = get_auth(common::build_test_app(pool), "/api/v1/notifications", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let items = json["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["title"], "Mine");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_read_flow_updates_unread_count(pool: PgPool) {
    let me = create_profile(&pool, "me@example.com", Role::Student).await;
    let first = seed(&pool, me, "One").await;
    seed(&pool, me, "Two").await;
    seed(&pool, me, "Three").await;
    let token = token_for(me, Role::Student);

    let count = |pool: PgPool, token: String| async move {
        let response = get_auth(
            common::build_test_app(pool),
            "/api/v1/notifications/unread-count",
            &token,
        )
        .await;
        body_json(response).await["data"]["count"].as_i64().unwrap()
    };

    assert_eq!(count(pool.clone(), token.clone()).await, 3);

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{first}/read"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(count(pool.clone(), token.clone()).await, 2);

    let unread = body_json(
        get_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/notifications?unread_only=true",
            &token,
        )
        .await,
    )
    .await;
    assert_eq!(unread["data"].as_array().unwrap().len(), 2);

    let response = post_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/notifications/read-all",
        &token,
    )
    .await;
    assert_eq!(body_json(response).await["data"]["marked_read"], 2);
    assert_eq!(count(pool, token).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_touch_someone_elses_notification(pool: PgPool) {
    let me = create_profile(&pool, "me@example.com", Role::Student).await;
    let other = create_profile(&pool, "other@example.com", Role::Student).await;
    let theirs = seed(&pool, other, "Theirs").await;
    let token = token_for(me, Role::Student);

    let response = post_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{theirs}/read"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{theirs}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(NotificationRepo::unread_count(&pool, other).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_own_notification(pool: PgPool) {
    let me = create_profile(&pool, "me@example.com", Role::Student).await;
    let mine = seed(&pool, me, "Mine").await;
    let token = token_for(me, Role::Student);

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/notifications/{mine}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(NotificationRepo::unread_count(&pool, me).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Admin direct send
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_sends_direct_message(pool: PgPool) {
    let token = admin_token(&pool).await;
    let student = create_profile(&pool, "s@example.com", Role::Student).await;

    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/notifications",
        &token,
        json!({
            "user_id": student,
            "title": "Office hours moved",
            "message": "Thursday at 4pm",
            "priority": "high",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], student);
    assert_eq!(json["data"]["notification_type"], "admin_message");
    assert_eq!(json["data"]["category"], "direct");
    assert_eq!(json["data"]["priority"], "high");
    assert!(json["data"]["expires_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_direct_send_to_unknown_profile_is_404(pool: PgPool) {
    let token = admin_token(&pool).await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/notifications",
        &token,
        json!({ "user_id": 999999, "title": "Hi", "message": "There" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_direct_send_requires_admin(pool: PgPool) {
    let student = create_profile(&pool, "s@example.com", Role::Student).await;
    let token = token_for(student, Role::Student);

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/notifications",
        &token,
        json!({ "user_id": student, "title": "Hi", "message": "There" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
