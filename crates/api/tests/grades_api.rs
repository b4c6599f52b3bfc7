//! End-to-end tests for the grading endpoint: the validation chain, the
//! enrollment gate, uniqueness, and the round-trip through the student
//! grade listing.

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, get, get_auth, post_json_auth, put_json_auth, seed_user_with_token};
use escola_core::groups::GROUP_EDITOR;
use sqlx::PgPool;

/// Seed a student and a course; enroll the student when asked. Returns
/// (student_id, course_id, token).
async fn seed_pair(pool: &PgPool, enroll: bool) -> (i64, i64, String) {
    let token = seed_user_with_token(pool, "editor", GROUP_EDITOR).await;

    let app = common::build_test_app(pool.clone());
    let student = body_json(
        post_json_auth(
            app,
            "/estudantes/",
            &token,
            serde_json::json!({
                "nome": "Ana Souza",
                "email": "ana@example.com",
                "cpf": "11111111111",
                "data_nascimento": "2001-07-20",
                "celular": "11 98888-7777",
            }),
        )
        .await,
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let course = body_json(
        post_json_auth(
            app,
            "/cursos/",
            &token,
            serde_json::json!({"codigo": "RUST01", "descricao": "Rust"}),
        )
        .await,
    )
    .await;

    let student_id = student["id"].as_i64().unwrap();
    let course_id = course["id"].as_i64().unwrap();

    if enroll {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/matriculas/",
            &token,
            serde_json::json!({"estudante": student_id, "curso": course_id, "periodo": "M"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    (student_id, course_id, token)
}

fn today() -> String {
    Utc::now().date_naive().to_string()
}

// ---------------------------------------------------------------------------
// Happy path and round-trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_grade_round_trip(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, true).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 7.5,
            "avaliacao": "Prova 1",
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let grade = body_json(response).await;
    assert_eq!(grade["valor"], 7.5);
    assert_eq!(grade["avaliacao"], "Prova 1");
    assert_eq!(grade["estudante_nome"], "Ana Souza");
    assert_eq!(grade["curso_codigo"], "RUST01");

    // A second, later grade must list first (newest date first).
    let tomorrow = (Utc::now().date_naive() + Duration::days(1)).to_string();
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 9.0,
            "avaliacao": "Prova 2",
            "data": tomorrow,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/estudantes/{student_id}/notas/")).await).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["results"][0]["avaliacao"], "Prova 2");
    assert_eq!(json["results"][1]["avaliacao"], "Prova 1");
    assert_eq!(json["results"][1]["valor"], 7.5);
}

// ---------------------------------------------------------------------------
// Value bounds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_grade_bounds_are_inclusive(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, true).await;

    for (valor, expect_ok, avaliacao) in [
        (serde_json::json!(0.0), true, "P1"),
        (serde_json::json!(10.0), true, "P2"),
        (serde_json::json!(-0.01), false, "P3"),
        (serde_json::json!(10.01), false, "P4"),
    ] {
        let app = common::build_test_app(pool.clone());
        let response = post_json_auth(
            app,
            "/notas/",
            &token,
            serde_json::json!({
                "estudante": student_id,
                "curso": course_id,
                "valor": valor,
                "avaliacao": avaliacao,
                "data": today(),
            }),
        )
        .await;

        if expect_ok {
            assert_eq!(response.status(), StatusCode::CREATED, "valor {valor}");
        } else {
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "valor {valor}");
            let json = body_json(response).await;
            assert_eq!(json["valor"][0], "grade must be between 0 and 10");
        }
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_grade_value_missing_and_garbage(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, true).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["valor"][0], "grade is required");

    // Numeric strings are accepted; non-numeric strings are not.
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": "8.25",
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["valor"], 8.25);

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": "sete",
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["valor"][0], "invalid grade");
}

// ---------------------------------------------------------------------------
// Date rule
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_retroactive_date_rejected_today_accepted(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, true).await;

    let yesterday = (Utc::now().date_naive() - Duration::days(1)).to_string();
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 7.0,
            "data": yesterday,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["data"][0], "date cannot be retroactive");

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 7.0,
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Enrollment gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unenrolled_student_rejected_and_nothing_persisted(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, false).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 7.5,
            "avaliacao": "Prova 1",
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(
        json["non_field_errors"][0],
        "student is not enrolled in this course"
    );

    // The rejection must not have created a record.
    let app = common::build_test_app(pool);
    let json = body_json(get(app, &format!("/estudantes/{student_id}/notas/")).await).await;
    assert_eq!(json["count"], 0);
}

/// Fail-fast ordering: on an unenrolled pair with an out-of-bounds value,
/// the value rule fires first and the enrollment error never appears.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_value_rule_fires_before_enrollment_gate(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, false).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/notas/",
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 11,
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["valor"][0], "grade must be between 0 and 10");
    assert!(json.get("non_field_errors").is_none());
}

// ---------------------------------------------------------------------------
// Uniqueness and update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_duplicate_tuple_rejected(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, true).await;

    let payload = serde_json::json!({
        "estudante": student_id,
        "curso": course_id,
        "valor": 6.0,
        "avaliacao": "Prova 1",
        "data": today(),
    });

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/notas/", &token, payload.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/notas/", &token, payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["non_field_errors"][0]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_reruns_validation(pool: PgPool) {
    let (student_id, course_id, token) = seed_pair(&pool, true).await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json_auth(
            app,
            "/notas/",
            &token,
            serde_json::json!({
                "estudante": student_id,
                "curso": course_id,
                "valor": 6.0,
                "avaliacao": "Prova 1",
                "data": today(),
            }),
        )
        .await,
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    // Updating the same row with its own tuple is not a duplicate.
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/notas/{id}/"),
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 8.0,
            "avaliacao": "Prova 1",
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["valor"], 8.0);

    // An out-of-bounds update is rejected like a create.
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/notas/{id}/"),
        &token,
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 12.0,
            "avaliacao": "Prova 1",
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Auth gate on writes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_anonymous_grade_write_rejected(pool: PgPool) {
    let (student_id, course_id, _token) = seed_pair(&pool, true).await;

    let app = common::build_test_app(pool.clone());
    let response = common::post_json(
        app,
        "/notas/",
        serde_json::json!({
            "estudante": student_id,
            "curso": course_id,
            "valor": 7.0,
            "data": today(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(
        json["detail"],
        "Authentication credentials were not provided."
    );

    // Reads stay open.
    let app = common::build_test_app(pool);
    let response = get_auth(app, &format!("/estudantes/{student_id}/notas/"), "bogus").await;
    // A bogus token on an open endpoint is simply not consulted.
    assert_eq!(response.status(), StatusCode::OK);
}
