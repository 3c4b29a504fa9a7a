mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend::state::security_config::SecurityConfig;
use backend_test_support::problem_details::assert_problem_details;
use backend_test_support::unique_helpers::unique_email;
use common::set_cookie_names;
use serde_json::json;
use support::{create_test_app, test_state};

#[actix_web::test]
async fn signup_rejects_bad_email() {
    let app = create_test_app(test_state(SecurityConfig::for_tests()).await).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "name": "Ada", "email": "not-an-email", "password": "correct horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(set_cookie_names(&resp).is_empty());
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_EMAIL").await;
}

#[actix_web::test]
async fn signup_rejects_short_password() {
    let app = create_test_app(test_state(SecurityConfig::for_tests()).await).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "name": "Ada", "email": unique_email("ada"), "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_PASSWORD").await;
}

#[actix_web::test]
async fn malformed_json_is_a_problem_details_400() {
    let app = create_test_app(test_state(SecurityConfig::for_tests()).await).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"email": "a@b.c", "password": "#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    let problem = assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
    assert!(problem.detail.starts_with("Invalid JSON"));
}

#[actix_web::test]
async fn missing_fields_are_rejected() {
    let app = create_test_app(test_state(SecurityConfig::for_tests()).await).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({ "email": unique_email("ada") }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}
