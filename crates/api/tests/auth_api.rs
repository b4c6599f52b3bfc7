//! Integration tests for token obtain, `/me/`, and the permission tiers.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, post_json_auth, seed_user_with_token};
use escola_api::auth::password::hash_password;
use escola_core::groups::GROUP_VIEWER;
use escola_db::models::user::CreateUser;
use escola_db::repositories::UserRepo;
use sqlx::PgPool;

async fn seed_login_user(pool: &PgPool, username: &str, password: &str, group: &str) {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@escola.dev"),
            password_hash: hash_password(password).expect("hashing should succeed"),
            is_superuser: false,
            is_staff: false,
            permission_group: group.to_string(),
        },
    )
    .await
    .expect("user insert should succeed");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_obtain_token_and_me(pool: PgPool) {
    seed_login_user(&pool, "maria", "senha-forte", "api_editor").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api-token-auth/",
        serde_json::json!({"username": "maria", "password": "senha-forte"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token in response").to_string();
    assert!(!token.is_empty());

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/me/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], "maria");
    assert_eq!(me["is_superuser"], false);
    assert_eq!(me["is_staff"], false);
    assert_eq!(me["groups"], serde_json::json!(["api_editor"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_obtain_token_bad_credentials(pool: PgPool) {
    seed_login_user(&pool, "maria", "senha-forte", "api_editor").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api-token-auth/",
        serde_json::json!({"username": "maria", "password": "errada"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["non_field_errors"][0],
        "Unable to log in with provided credentials."
    );

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api-token-auth/",
        serde_json::json!({"username": "ninguem", "password": "x"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reauth_rotates_token(pool: PgPool) {
    seed_login_user(&pool, "maria", "senha-forte", "api_editor").await;

    let app = common::build_test_app(pool.clone());
    let first = body_json(
        post_json(
            app,
            "/api-token-auth/",
            serde_json::json!({"username": "maria", "password": "senha-forte"}),
        )
        .await,
    )
    .await;
    let first_token = first["token"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let second = body_json(
        post_json(
            app,
            "/api-token-auth/",
            serde_json::json!({"username": "maria", "password": "senha-forte"}),
        )
        .await,
    )
    .await;
    let second_token = second["token"].as_str().unwrap().to_string();
    assert_ne!(first_token, second_token);

    // The old token is no longer valid.
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/me/", &first_token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/me/", &second_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/me/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Authentication credentials were not provided.");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/me/", "invalid-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["detail"], "Invalid token.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_viewer_group_cannot_write(pool: PgPool) {
    let token = seed_user_with_token(&pool, "viewer", GROUP_VIEWER).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/cursos/",
        &token,
        serde_json::json!({"codigo": "X1", "descricao": "X"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("permission"));

    // The viewer still reads.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/cursos/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_enrollments_requires_auth(pool: PgPool) {
    let token = seed_user_with_token(&pool, "viewer", GROUP_VIEWER).await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/estudantes/1/matriculas/").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated: an unknown student yields an empty page, not a 404.
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/estudantes/999/matriculas/", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["count"], 0);
}
