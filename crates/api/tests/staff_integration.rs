//! Integration tests for the staff marking surface: capability check,
//! manual marks, rosters and the per-student overview.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_can_mark_reflects_staff_claim() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    let app = common::create_test_app(pool);

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::get(&app, "/api/v1/staff/can-mark", Some(&staff_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::parse_response_body(response).await, json!(true));

    let student_token = common::identity_token("kid@example.edu", "kid-device", false);
    let response = common::get(&app, "/api/v1/staff/can-mark", Some(&student_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::parse_response_body(response).await, json!(false));
}

#[tokio::test]
async fn test_can_mark_without_token_is_forbidden() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    let app = common::create_test_app(pool);

    let response = common::get(&app, "/api/v1/staff/can-mark", None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["message"], "You are not authorized to access this page");
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_staff_marks_current_class() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    common::seed_active_class(&pool, "Algorithms").await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::post_json_with_bearer(
        &app,
        "/api/v1/staff/attendance",
        json!({"mail": mail, "status": "Late"}),
        &staff_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["mail"], mail);
    assert_eq!(body["status"], "Late");
}

#[tokio::test]
async fn test_manual_mark_overrides_geo_check_in_on_roster() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    let class_id = common::seed_active_class(&pool, "Algorithms").await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;
    let token = common::identity_token(&mail, "device-1", false);

    let body = common::check_in_body(&token, common::CLASSROOM_LAT, common::CLASSROOM_LON, 5.0);
    let response = common::post_json(&app, "/api/v1/attendance/check-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::post_json_with_bearer(
        &app,
        "/api/v1/staff/attendance",
        json!({"mail": mail, "status": "Late"}),
        &staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/v1/staff/classes/{}/roster", class_id);
    let response = common::get(&app, &uri, Some(&staff_token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let roster = common::parse_response_body(response).await;
    let entry = roster["all_attendance"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["mail"] == mail)
        .expect("student missing from roster");
    assert_eq!(entry["status"], "Late");
}

#[tokio::test]
async fn test_staff_marks_present_after_false_attempt() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    let class_id = common::seed_active_class(&pool, "Algorithms").await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;
    let token = common::identity_token(&mail, "device-1", false);

    // Out of bounds; check-in is rejected but logged.
    let body = common::check_in_body(
        &token,
        common::CLASSROOM_LAT + 0.01,
        common::CLASSROOM_LON,
        5.0,
    );
    let response = common::post_json(&app, "/api/v1/attendance/check-in", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Staff can still mark the student present manually.
    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::post_json_with_bearer(
        &app,
        "/api/v1/staff/attendance",
        json!({"mail": mail, "status": "Present"}),
        &staff_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let uri = format!("/api/v1/staff/classes/{}/roster", class_id);
    let response = common::get(&app, &uri, Some(&staff_token)).await;
    let roster = common::parse_response_body(response).await;
    let entry = roster["all_attendance"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["mail"] == mail)
        .unwrap();
    assert_eq!(entry["status"], "Present");
}

#[tokio::test]
async fn test_non_staff_cannot_mark() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    common::seed_active_class(&pool, "Algorithms").await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;

    let student_token = common::identity_token(&mail, "device-1", false);
    let response = common::post_json_with_bearer(
        &app,
        "/api/v1/staff/attendance",
        json!({"mail": mail, "status": "Present"}),
        &student_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["message"], "You are not authorized to access this page");
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn test_mark_unknown_student_is_not_found() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    common::seed_active_class(&pool, "Algorithms").await;
    let app = common::create_test_app(pool);

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::post_json_with_bearer(
        &app,
        "/api/v1/staff/attendance",
        json!({"mail": "nobody@example.edu", "status": "Present"}),
        &staff_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mark_with_no_active_class() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::post_json_with_bearer(
        &app,
        "/api/v1/staff/attendance",
        json!({"mail": mail, "status": "Present"}),
        &staff_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["message"], "No class active for attendance");
}

#[tokio::test]
async fn test_mark_specific_class_by_id() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    // A class whose window closed an hour ago; still reachable by id.
    let class_id = common::seed_class(&pool, "Databases", -120, -60, -120, -100).await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let uri = format!("/api/v1/staff/classes/{}/attendance", class_id);
    let response = common::post_json_with_bearer(
        &app,
        &uri,
        json!({"mail": mail, "status": "ExcusedAbsent"}),
        &staff_token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::parse_response_body(response).await;
    assert_eq!(body["status"], "ExcusedAbsent");
}

#[tokio::test]
async fn test_roster_defaults_unmarked_students_to_absent() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    common::seed_active_class(&pool, "Algorithms").await;
    let app = common::create_test_app(pool);

    let marked = common::unique_mail();
    let unmarked = common::unique_mail();
    common::register_student(&app, &marked, "device-1", "Alice").await;
    common::register_student(&app, &unmarked, "device-2", "Bob").await;

    let token = common::identity_token(&marked, "device-1", false);
    let body = common::check_in_body(&token, common::CLASSROOM_LAT, common::CLASSROOM_LON, 5.0);
    let response = common::post_json(&app, "/api/v1/attendance/check-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::get(&app, "/api/v1/attendance/current/roster", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let roster = common::parse_response_body(response).await;
    assert_eq!(roster["current_class"]["name"], "Algorithms");

    let entries = roster["all_attendance"].as_array().unwrap();
    let status_of = |mail: &str| {
        entries
            .iter()
            .find(|e| e["mail"] == mail)
            .map(|e| e["status"].clone())
            .unwrap()
    };
    assert_eq!(status_of(&marked), "Present");
    assert_eq!(status_of(&unmarked), "Absent");
}

#[tokio::test]
async fn test_student_overview_lists_every_class() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    common::seed_active_class(&pool, "Algorithms").await;
    common::seed_class(&pool, "Databases", -120, -60, -120, -100).await;
    let app = common::create_test_app(pool);

    let mail = common::unique_mail();
    common::register_student(&app, &mail, "device-1", "Alice").await;
    let token = common::identity_token(&mail, "device-1", false);

    let body = common::check_in_body(&token, common::CLASSROOM_LAT, common::CLASSROOM_LON, 5.0);
    let response = common::post_json(&app, "/api/v1/attendance/check-in", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let uri = format!("/api/v1/staff/students/{}/attendance", mail);
    let response = common::get(&app, &uri, Some(&staff_token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let overview = common::parse_response_body(response).await;
    assert_eq!(overview["student"]["mail"], mail);
    assert_eq!(overview["student"]["name"], "Alice");
    let classes = overview["all_attendance"].as_array().unwrap();
    assert_eq!(classes.len(), 2);

    let by_name = |name: &str| {
        classes
            .iter()
            .find(|c| c["name"] == name)
            .expect("class missing from overview")
    };
    // Checked-in class carries a recorded status, the other stays null.
    assert_eq!(by_name("Algorithms")["status"], "Present");
    assert!(by_name("Databases")["status"].is_null());
}

#[tokio::test]
async fn test_student_overview_unknown_mail_is_not_found() {
    let Some(pool) = common::try_test_pool().await else {
        return;
    };
    let _guard = common::TEST_LOCK.lock().await;
    common::cleanup(&pool).await;
    let app = common::create_test_app(pool);

    let staff_token = common::identity_token("prof@example.edu", "staff-device", true);
    let response = common::get(
        &app,
        "/api/v1/staff/students/nobody@example.edu/attendance",
        Some(&staff_token),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
